//! Check command implementation.
//!
//! Compresses every column of a table file and compares the results with
//! an expected-output file holding one encoded line per column. Every
//! column is also decoded again and compared with the original.

use crate::codec::Codec;
use crate::utils::create_progress_bar;
use oxiidx_core::diff::{first_mismatch, mismatch_report};
use oxiidx_core::{Bitmap, table};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Outcome for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnStatus {
    /// Encoding matched and decoded back to the column.
    Ok,
    /// Encoding differs from the expected line; holds the report.
    Mismatch(String),
    /// The expected file has no line for this column.
    MissingExpected,
    /// Decoding did not reproduce the column.
    RoundTrip(String),
}

/// Check one column.
pub fn check_column(
    codec: &Codec,
    column: &str,
    expected: Option<&str>,
    require_expected: bool,
) -> oxiidx_core::Result<ColumnStatus> {
    let bitmap = Bitmap::from_bit_str(column)?;
    let encoded = codec.compress(&bitmap)?;

    match expected {
        Some(expected) => {
            let actual = encoded.to_bit_string();
            if let Some(mismatch) = first_mismatch(expected, &actual) {
                return Ok(ColumnStatus::Mismatch(mismatch_report(
                    expected, &actual, &mismatch,
                )));
            }
        }
        None if require_expected => return Ok(ColumnStatus::MissingExpected),
        None => {}
    }

    let decoded = match codec.decompress(&encoded, bitmap.len()) {
        Ok(decoded) => decoded.to_bit_string(),
        Err(e) => return Ok(ColumnStatus::RoundTrip(e.to_string())),
    };
    if let Some(mismatch) = first_mismatch(column, &decoded) {
        return Ok(ColumnStatus::RoundTrip(mismatch_report(
            column, &decoded, &mismatch,
        )));
    }
    Ok(ColumnStatus::Ok)
}

pub fn cmd_check(
    codec: Codec,
    table_path: &Path,
    expected_path: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let columns = table::columns(&fs::read_to_string(table_path)?)?;
    let expected_text = match expected_path {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let expected: Vec<&str> = expected_text
        .as_deref()
        .map(table::expected_lines)
        .unwrap_or_default();

    println!("Checking {} with {}", table_path.display(), codec);

    let pb = create_progress_bar(columns.len() as u64, !verbose);
    let mut failures = Vec::new();
    for (index, column) in columns.iter().enumerate() {
        pb.set_message(format!("column {}", index));
        let status = check_column(
            &codec,
            column,
            expected.get(index).copied(),
            expected_text.is_some(),
        )?;
        debug!(index, ?status, "column checked");
        if verbose {
            match &status {
                ColumnStatus::Ok => println!("  OK: column {}", index),
                _ => println!("  FAILED: column {}", index),
            }
        }
        if status != ColumnStatus::Ok {
            failures.push((index, status));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!();
    println!("Check results:");
    println!("  Columns: {}", columns.len());
    println!("  OK: {}", columns.len() - failures.len());
    println!("  Failed: {}", failures.len());

    if let Some((index, status)) = failures.first() {
        println!();
        match status {
            ColumnStatus::Mismatch(report) => {
                println!("Column {} does not match the expected encoding:", index);
                println!("{}", report);
            }
            ColumnStatus::MissingExpected => {
                println!("Column {} has no expected line", index);
            }
            ColumnStatus::RoundTrip(report) => {
                println!("Column {} did not decode back to its input:", index);
                println!("{}", report);
            }
            ColumnStatus::Ok => {}
        }
        std::process::exit(2);
    }

    println!();
    println!("All columns OK");
    Ok(())
}
