//! Table Module - Immutable in-memory input tables
//!
//! A `Table` is an ordered sequence of `Row`s sharing one schema. Tables are
//! built once from input data and never mutated; derived artifacts (targets,
//! feature matrices) live in their own types.
//!
//! # Architecture
//! - `cell.rs`: `Cell` value type and canonical token rendering
//! - `loader.rs`: NSL-KDD delimited-text reader

pub mod cell;
pub mod loader;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use crate::logic::error::{PrepError, PrepResult};

pub use cell::Cell;
pub use loader::{read_table, read_table_from_path};

// ============================================================================
// ROW
// ============================================================================

/// One observation, cells ordered like the owning table's schema
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, rejecting duplicate column names and ragged rows
    pub fn new(schema: Vec<String>, rows: Vec<Row>) -> PrepResult<Self> {
        let mut seen = HashSet::new();
        for name in &schema {
            if !seen.insert(name.as_str()) {
                return Err(PrepError::schema(format!("duplicate column '{}'", name)));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(PrepError::schema(format!(
                    "row {} has {} fields, schema has {}",
                    i,
                    row.len(),
                    schema.len()
                )));
            }
        }

        Ok(Self { schema, rows })
    }

    /// Convenience constructor from column names and row iterators
    pub fn from_rows<R, C>(schema: &[&str], rows: R) -> PrepResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let schema = schema.iter().map(|s| s.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().collect::<Row>())
            .collect();
        Self::new(schema, rows)
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.schema.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.width())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|c| c == name)
    }

    /// Column index or SchemaMismatch naming the missing column
    pub fn require_column(&self, name: &str) -> PrepResult<usize> {
        self.column_index(name)
            .ok_or_else(|| PrepError::schema(format!("column '{}' not found", name)))
    }

    /// Cells of one column, in row order
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |r| r.get(index))
    }
}
