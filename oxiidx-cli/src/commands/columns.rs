//! Columns command implementation.

use oxiidx_core::table;
use std::fs;
use std::path::Path;

pub fn cmd_columns(table_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(table_path)?;
    for column in table::columns(&text)? {
        println!("{}", column);
    }
    Ok(())
}
