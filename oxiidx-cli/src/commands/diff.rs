//! Diff command implementation.

use crate::utils::strip_whitespace;
use oxiidx_core::diff::{chunk_diff, first_mismatch, mismatch_report};
use std::fs;
use std::path::Path;

pub fn cmd_diff(
    expected_path: &Path,
    actual_path: &Path,
    chunk: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected = strip_whitespace(&fs::read_to_string(expected_path)?);
    let actual = strip_whitespace(&fs::read_to_string(actual_path)?);

    let lines = chunk_diff(&expected, &actual, chunk);
    let differing: Vec<_> = lines.iter().filter(|line| line.differs()).collect();

    if differing.is_empty() {
        println!("No differences ({} words of {} bits)", lines.len(), chunk);
        return Ok(());
    }

    for line in &differing {
        println!("Word {}:", line.index);
        println!("  expected: {}", line.expected);
        println!("  actual:   {}", line.actual);
        println!("            {}", line.markers());
    }

    println!();
    println!("{} of {} words differ", differing.len(), lines.len());
    if let Some(mismatch) = first_mismatch(&expected, &actual) {
        println!();
        println!("{}", mismatch_report(&expected, &actual, &mismatch));
    }

    std::process::exit(2);
}
