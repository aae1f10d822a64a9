use std::fmt;

/// Input that cannot be turned into an id-augmented table.
///
/// Returned inside `anyhow::Error`; use `downcast_ref::<MalformedInput>()`
/// to tell it apart from I/O failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    /// The source had no records at all, so there is no header.
    MissingHeader,
    /// The header record has zero columns.
    EmptyHeader,
    /// A data row has zero columns and empty rows are rejected.
    /// `row` is 1-based and counts data rows only.
    EmptyRow { row: usize },
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInput::MissingHeader => write!(f, "input has no header row"),
            MalformedInput::EmptyHeader => write!(f, "header row has no columns"),
            MalformedInput::EmptyRow { row } => write!(f, "data row {} has no columns", row),
        }
    }
}

impl std::error::Error for MalformedInput {}
