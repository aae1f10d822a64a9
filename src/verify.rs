use anyhow::Result;
use serde::Serialize;
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

use crate::{
    assign::{OrderPolicy, ID_COLUMN},
    table::{Row, Table},
};

/// First property an augmented table was found to break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    HeaderMismatch { expected: Vec<String>, found: Vec<String> },
    RowCountMismatch { expected: usize, found: usize },
    /// `row` is 1-based over data rows.
    BadId { row: usize, value: String },
    RowMismatch { row: usize },
    InconsistentId { name: String, first: u32, second: u32 },
    SharedId { id: u32, first: String, second: String },
    NotContiguous { max_id: u32, unique: usize },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::HeaderMismatch { expected, found } => {
                write!(f, "header is {:?}, expected {:?}", found, expected)
            }
            VerifyError::RowCountMismatch { expected, found } => {
                write!(f, "output has {} data rows, expected {}", found, expected)
            }
            VerifyError::BadId { row, value } => {
                write!(f, "row {}: {:?} is not a positive integer id", row, value)
            }
            VerifyError::RowMismatch { row } => {
                write!(f, "row {}: fields differ from the input row", row)
            }
            VerifyError::InconsistentId { name, first, second } => {
                write!(f, "{:?} has ids {} and {}", name, first, second)
            }
            VerifyError::SharedId { id, first, second } => {
                write!(f, "id {} is used by both {:?} and {:?}", id, first, second)
            }
            VerifyError::NotContiguous { max_id, unique } => write!(
                f,
                "ids run up to {} but there are {} unique exercises",
                max_id, unique
            ),
        }
    }
}

impl std::error::Error for VerifyError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub rows: usize,
    pub unique_exercises: usize,
    /// Numbering scheme the ids are consistent with, if any.
    pub order: Option<OrderPolicy>,
}

/// Check that `output` is `input` with a well-formed id column in front.
pub fn verify(input: &Table, output: &Table) -> Result<VerifyReport> {
    let expected_header = input.header().prepend(ID_COLUMN);
    if output.header() != &expected_header {
        return Err(VerifyError::HeaderMismatch {
            expected: expected_header.into_fields(),
            found: output.header().fields().to_vec(),
        }
        .into());
    }

    let expected: Vec<&Row> = input.rows().iter().filter(|r| !r.is_empty()).collect();
    if expected.len() != output.len() {
        return Err(VerifyError::RowCountMismatch {
            expected: expected.len(),
            found: output.len(),
        }
        .into());
    }

    let mut by_name: HashMap<&str, u32> = HashMap::new();
    let mut by_id: HashMap<u32, &str> = HashMap::new();
    // ids in order of each name's first appearance
    let mut first_seen: Vec<(u32, &str)> = Vec::new();

    for (idx, (want, got)) in expected.iter().zip(output.rows()).enumerate() {
        let row = idx + 1;
        let (id_field, rest) = match got.fields().split_first() {
            Some(split) => split,
            None => return Err(VerifyError::RowMismatch { row }.into()),
        };
        // only the canonical decimal form, so "01" and "+1" are rejected
        let id = match id_field.parse::<u32>() {
            Ok(id) if id > 0 && id.to_string() == *id_field => id,
            _ => {
                return Err(VerifyError::BadId {
                    row,
                    value: id_field.clone(),
                }
                .into())
            }
        };
        if rest != want.fields() {
            return Err(VerifyError::RowMismatch { row }.into());
        }

        let name = want.name().unwrap_or_default();
        match by_name.entry(name) {
            Entry::Occupied(e) if *e.get() != id => {
                return Err(VerifyError::InconsistentId {
                    name: name.to_string(),
                    first: *e.get(),
                    second: id,
                }
                .into())
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(e) => {
                e.insert(id);
                first_seen.push((id, name));
            }
        }
        match by_id.entry(id) {
            Entry::Occupied(e) if *e.get() != name => {
                return Err(VerifyError::SharedId {
                    id,
                    first: e.get().to_string(),
                    second: name.to_string(),
                }
                .into())
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(e) => {
                e.insert(name);
            }
        }
    }

    // ids are distinct per name, so max == count means exactly 1..=N
    let unique = by_name.len();
    let max_id = by_id.keys().copied().max().unwrap_or(0);
    if max_id as usize != unique {
        return Err(VerifyError::NotContiguous { max_id, unique }.into());
    }

    Ok(VerifyReport {
        rows: output.len(),
        unique_exercises: unique,
        order: detect_order(&first_seen),
    })
}

fn detect_order(first_seen: &[(u32, &str)]) -> Option<OrderPolicy> {
    if first_seen
        .iter()
        .enumerate()
        .all(|(i, (id, _))| *id as usize == i + 1)
    {
        return Some(OrderPolicy::FirstSeen);
    }
    let mut by_id = first_seen.to_vec();
    by_id.sort_unstable_by_key(|(id, _)| *id);
    if by_id.windows(2).all(|w| w[0].1 < w[1].1) {
        return Some(OrderPolicy::Sorted);
    }
    None
}
