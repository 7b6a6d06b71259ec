//! NSL-KDD Loader
//!
//! Reads comma-delimited NSL-KDD files into a `Table`. Headerless files get
//! the fixed 42-column schema; the KDDTrain+/KDDTest+ variants carry one extra
//! trailing field (difficulty score) which is kept as its own column.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::constants::{DIFFICULTY_COLUMN, NSL_KDD_COLUMNS, NSL_KDD_COLUMN_COUNT};
use crate::logic::error::{PrepError, PrepResult};
use super::{Cell, Row, Table};

/// Schema for a headerless NSL-KDD file with `width` fields per row
pub fn nsl_kdd_schema(width: usize) -> PrepResult<Vec<String>> {
    let mut schema: Vec<String> = NSL_KDD_COLUMNS.iter().map(|c| c.to_string()).collect();

    if width == NSL_KDD_COLUMN_COUNT {
        Ok(schema)
    } else if width == NSL_KDD_COLUMN_COUNT + 1 {
        schema.push(DIFFICULTY_COLUMN.to_string());
        Ok(schema)
    } else {
        Err(PrepError::schema(format!(
            "expected {} or {} NSL-KDD fields per row, got {}",
            NSL_KDD_COLUMN_COUNT,
            NSL_KDD_COLUMN_COUNT + 1,
            width
        )))
    }
}

/// Read a table from any reader
pub fn read_table<R: io::Read>(reader: R, has_headers: bool) -> PrepResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(reader);

    let header: Option<Vec<String>> = if has_headers {
        Some(rdr.headers()?.iter().map(|h| h.trim().to_string()).collect())
    } else {
        None
    };

    let mut rows = Vec::new();
    let mut width: Option<usize> = None;

    for (i, result) in rdr.records().enumerate() {
        let record = result?;

        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => {
                return Err(PrepError::schema(format!(
                    "record {} has {} fields, expected {}",
                    i + 1,
                    record.len(),
                    w
                )));
            }
            Some(_) => {}
        }

        rows.push(record.iter().map(Cell::parse).collect::<Row>());
    }

    let schema = match header {
        Some(h) => h,
        None => nsl_kdd_schema(width.unwrap_or(NSL_KDD_COLUMN_COUNT))?,
    };

    Table::new(schema, rows)
}

/// Read a table from disk
pub fn read_table_from_path(path: &Path, has_headers: bool) -> PrepResult<Table> {
    let file = File::open(path)?;
    let table = read_table(io::BufReader::new(file), has_headers)?;

    log::info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        table.len(),
        table.width()
    );

    Ok(table)
}
