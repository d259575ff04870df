//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxiidx_core::EncodedBitmap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Read a bit string from the argument, a file, or stdin, in that order of
/// preference. All whitespace is removed.
pub fn read_bits(bits: Option<String>, input: Option<&Path>) -> io::Result<String> {
    let raw = match (bits, input) {
        (Some(bits), _) => bits,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(strip_whitespace(&raw))
}

/// Remove every whitespace character.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Print size statistics to stderr so stdout stays machine-readable.
pub fn print_stats(codec: &str, original_bits: usize, encoded: &EncodedBitmap) {
    eprintln!("Codec:      {}", codec);
    eprintln!("Input:      {} bits", original_bits);
    eprintln!(
        "Output:     {} bits ({} units of {} bits)",
        encoded.bit_len(),
        encoded.len(),
        encoded.unit_bits()
    );
    if original_bits > 0 {
        eprintln!("Ratio:      {:.3}", encoded.ratio(original_bits));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_argument_wins() {
        let bits = read_bits(Some("01 10\n".to_string()), None).unwrap();
        assert_eq!(bits, "0110");
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1010001").unwrap();
        writeln!(file, "111").unwrap();
        let bits = read_bits(None, Some(file.path())).unwrap();
        assert_eq!(bits, "1010001111");
    }

    #[test]
    fn test_missing_file() {
        assert!(read_bits(None, Some(Path::new("/nonexistent/bits.txt"))).is_err());
    }
}
