// src/assign.rs

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::{
    error::MalformedInput,
    table::{Row, Table},
};

/// Label of the column prepended to the header.
pub const ID_COLUMN: &str = "id";

/// Order in which distinct exercise names are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Number names as they first appear in the input.
    #[default]
    FirstSeen,
    /// Number names in lexicographic order.
    Sorted,
}

/// What to do with a data row that has no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyRows {
    #[default]
    Skip,
    Reject,
}

/// Exercise name → identifier, contiguous from 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAssignment {
    ids: HashMap<String, u32>,
    // names[i] has id i + 1
    names: Vec<String>,
}

impl IdAssignment {
    fn insert(&mut self, name: &str) -> Result<u32> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        let id = u32::try_from(self.names.len() + 1)
            .map_err(|_| anyhow::anyhow!("more than {} distinct exercises", u32::MAX))?;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in ascending id order.
    pub fn iter_by_id(&self) -> impl Iterator<Item = (u32, &str)> {
        (1u32..).zip(self.names.iter().map(String::as_str))
    }

    /// The first `n` pairs by id.
    pub fn sample(&self, n: usize) -> Vec<(u32, String)> {
        self.iter_by_id()
            .take(n)
            .map(|(id, name)| (id, name.to_string()))
            .collect()
    }
}

/// Number every distinct exercise name in `rows`. Rows without fields are ignored.
///
/// Fails only if there are more distinct names than `u32` ids.
pub fn build_assignment(rows: &[Row], order: OrderPolicy) -> Result<IdAssignment> {
    let mut assignment = IdAssignment::default();
    match order {
        OrderPolicy::FirstSeen => {
            for name in rows.iter().filter_map(Row::name) {
                assignment.insert(name)?;
            }
        }
        OrderPolicy::Sorted => {
            let unique: BTreeSet<&str> = rows.iter().filter_map(Row::name).collect();
            for name in unique {
                assignment.insert(name)?;
            }
        }
    }
    Ok(assignment)
}

/// Result of [`assign`].
#[derive(Debug, Clone)]
pub struct Assigned {
    pub table: Table,
    pub assignment: IdAssignment,
    /// Data rows dropped because they had no fields.
    pub skipped: usize,
}

/// Prepend an `id` column to `table`.
///
/// Output rows keep input order; empty rows are dropped or rejected
/// according to `empty_rows`.
pub fn assign(table: &Table, order: OrderPolicy, empty_rows: EmptyRows) -> Result<Assigned> {
    if table.header().is_empty() {
        return Err(MalformedInput::EmptyHeader.into());
    }
    if empty_rows == EmptyRows::Reject {
        if let Some(idx) = table.rows().iter().position(Row::is_empty) {
            return Err(MalformedInput::EmptyRow { row: idx + 1 }.into());
        }
    }

    let assignment = build_assignment(table.rows(), order)?;

    let mut rows = Vec::with_capacity(table.len());
    let mut skipped = 0;
    for row in table.rows() {
        let Some(name) = row.name() else {
            skipped += 1;
            continue;
        };
        // every non-empty row was numbered by build_assignment
        let id = assignment
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("no id assigned to {:?}", name))?;
        rows.push(row.prepend(id.to_string()));
    }
    if skipped > 0 {
        debug!(skipped, "skipped empty rows");
    }

    Ok(Assigned {
        table: Table::new(table.header().prepend(ID_COLUMN), rows),
        assignment,
        skipped,
    })
}
