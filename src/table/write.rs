use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{
    fs::{self, Permissions},
    io::Write,
    path::Path,
};
use tempfile::Builder;
use tracing::debug;

use crate::table::types::Table;

/// Write `table` to `path` atomically.
///
/// Rows go to a temp file beside the target which is renamed over it once
/// everything is flushed. On error the temp file is removed and the target
/// is left untouched. An existing target keeps its permissions; a new one
/// gets the same mode a plain `File::create` would.
#[tracing::instrument(level = "debug", skip(path, table), fields(path = %path.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let existing: Option<Permissions> = fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.permissions());

    let mut builder = Builder::new();
    if existing.is_none() {
        set_create_mode(&mut builder);
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .with_context(|| format!("creating temp file in {:?}", dir))?;
    if let Some(perms) = existing {
        tmp.as_file()
            .set_permissions(perms)
            .with_context(|| format!("copying permissions of {:?}", path))?;
    }
    write_table_to(tmp.as_file_mut(), table)
        .with_context(|| format!("writing CSV for {:?}", path))?;
    tmp.as_file().sync_all().context("syncing temp output")?;
    tmp.persist(path)
        .with_context(|| format!("moving output into place at {:?}", path))?;

    debug!(rows = table.len(), "wrote table");
    Ok(())
}

// 0o666 before umask, as `File::create` does; tempfile defaults to 0o600
#[cfg(unix)]
fn set_create_mode(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn set_create_mode(_builder: &mut Builder<'_, '_>) {}

/// Serialize `table` as CSV: header first, minimal quoting, CRLF endings.
pub fn write_table_to<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(table.header().fields())
        .context("writing header")?;
    for (idx, row) in table.rows().iter().enumerate() {
        wtr.write_record(row.fields())
            .with_context(|| format!("writing data row {}", idx + 1))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}
