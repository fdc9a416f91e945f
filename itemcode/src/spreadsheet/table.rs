//! In-memory table with a header row.

use crate::{ItemcodeError, Result};

/// Rows of string cells under a header row. Every row has one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self { headers, rows };
        table.align_rows();
        table
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column named `name` (trimmed comparison).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Index of a column that must exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ItemcodeError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Every cell of a column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Replace the column `name`, or append it when absent.
    ///
    /// `values` shorter than the table leave the remaining cells empty.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        };

        let mut values = values.into_iter();
        for row in &mut self.rows {
            row[index] = values.next().unwrap_or_default();
        }
    }

    fn align_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}
