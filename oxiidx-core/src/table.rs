//! Column bitmaps from a table of rows.
//!
//! Fixture files store a bitmap index as a table: one row per record, one
//! character per attribute value. Column `i` of the table is the bitmap of
//! attribute value `i`, formed by reading character `i` of every row.

use crate::error::{OxiIdxError, Result};

/// Split a table into its column strings.
///
/// Rows are separated by `\n` or `\r\n`; leading and trailing whitespace of
/// the whole table is ignored. Every row must be as wide as the first.
///
/// # Example
///
/// ```
/// use oxiidx_core::table::columns;
///
/// let cols = columns("100\n010\n011\n").unwrap();
/// assert_eq!(cols, vec!["100", "011", "001"]);
/// ```
pub fn columns(table: &str) -> Result<Vec<String>> {
    let rows: Vec<&str> = table.trim().lines().collect();

    let width = match rows.first() {
        Some(first) if !first.is_empty() => first.chars().count(),
        _ => return Err(OxiIdxError::EmptyTable),
    };

    let mut cols = vec![String::with_capacity(rows.len()); width];
    for (row_index, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(OxiIdxError::RaggedTable {
                row: row_index,
                expected: width,
                found,
            });
        }
        for (col, c) in cols.iter_mut().zip(row.chars()) {
            col.push(c);
        }
    }
    Ok(cols)
}

/// Split expected-output text into lines, one per column.
///
/// Accepts `\n` and `\r\n` separators. A trailing newline does not produce
/// an extra empty line.
pub fn expected_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
