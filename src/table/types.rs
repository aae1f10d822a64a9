// src/table/types.rs

use serde::{Deserialize, Serialize};

/// One CSV record. The first field is the exercise name, the rest are
/// carried through untouched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash, Default)]
pub struct Row(Vec<String>);

impl Row {
    /// The exercise name, or `None` for a row with no fields.
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New row with `field` in front of the existing fields.
    pub fn prepend(&self, field: impl Into<String>) -> Row {
        let mut fields = Vec::with_capacity(self.0.len() + 1);
        fields.push(field.into());
        fields.extend(self.0.iter().cloned());
        Row(fields)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

/// A header row plus the data rows in file order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Default)]
pub struct Table {
    header: Row,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(header: Row, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &Row {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
