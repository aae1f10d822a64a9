use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

use crate::{
    error::MalformedInput,
    table::types::{Row, Table},
};

/// Read a whole CSV file into memory. The first record becomes the header.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open input CSV: {:?}", path.as_ref()))?;
    read_table_from(file).with_context(|| format!("Failed to read {:?}", path.as_ref()))
}

/// Parse CSV from any reader.
///
/// Records may differ in length. Blank lines are dropped by the `csv`
/// parser and never reach the table.
pub fn read_table_from<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => {
            let record = record.context("CSV parse error in header")?;
            record.iter().collect::<Row>()
        }
        None => return Err(MalformedInput::MissingHeader.into()),
    };

    let mut rows = Vec::new();
    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at data row {}", idx + 1))?;
        rows.push(record.iter().collect::<Row>());
    }

    debug!(columns = header.len(), rows = rows.len(), "parsed table");
    Ok(Table::new(header, rows))
}
