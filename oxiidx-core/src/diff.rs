//! Comparing encoded bit strings.
//!
//! Two views are offered: [`first_mismatch`] pins down the first differing
//! character with a context window (used by fixture checks), and
//! [`chunk_diff`] lines both strings up word by word and lists the words
//! that differ (used when hand-checking an encoding).

use std::fmt;

/// Characters of context shown on each side of a mismatch.
pub const CONTEXT: usize = 20;

/// Where two strings first disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Both strings have a character at `index`, and they differ.
    Char {
        /// Character index of the first difference.
        index: usize,
        /// Expected character.
        expected: char,
        /// Actual character.
        actual: char,
    },
    /// One string is a strict prefix of the other.
    Length {
        /// Length of the expected string.
        expected: usize,
        /// Length of the actual string.
        actual: usize,
    },
}

impl Mismatch {
    /// Index where the strings stop agreeing.
    pub fn index(&self) -> usize {
        match *self {
            Self::Char { index, .. } => index,
            Self::Length { expected, actual } => expected.min(actual),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Char {
                index,
                expected,
                actual,
            } => write!(
                f,
                "strings differ at {index}: expected[{index}] = {expected}, actual[{index}] = {actual}"
            ),
            Self::Length { expected, actual } if actual > expected => write!(
                f,
                "actual string longer than expected ({actual} > {expected}), but agrees up to that point"
            ),
            Self::Length { expected, actual } => write!(
                f,
                "actual string shorter than expected ({actual} < {expected}), but agrees up to that point"
            ),
        }
    }
}

/// Find the first position where `actual` departs from `expected`.
pub fn first_mismatch(expected: &str, actual: &str) -> Option<Mismatch> {
    let mut exp = expected.chars();
    let mut act = actual.chars();
    let mut index = 0;
    loop {
        match (exp.next(), act.next()) {
            (Some(e), Some(a)) if e == a => index += 1,
            (Some(expected), Some(actual)) => {
                return Some(Mismatch::Char {
                    index,
                    expected,
                    actual,
                });
            }
            (None, None) => return None,
            _ => {
                return Some(Mismatch::Length {
                    expected: expected.chars().count(),
                    actual: actual.chars().count(),
                });
            }
        }
    }
}

/// Render `s` around `index`: up to [`CONTEXT`] characters before, padded
/// so that `index` always lands in the same column, and up to [`CONTEXT`]
/// after.
pub fn context_window(s: &str, index: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let start = index.saturating_sub(CONTEXT);
    let mut before: String = chars[start.min(chars.len())..index.min(chars.len())]
        .iter()
        .collect();
    if start > 0 {
        before.insert_str(0, "...");
    }
    let end = (index + CONTEXT).min(chars.len());
    let mut after: String = chars[index.min(chars.len())..end].iter().collect();
    if chars.len() > end {
        after.push_str("...");
    }
    format!("{before:>width$}{after}", width = CONTEXT + 3)
}

/// Multi-line report of a mismatch: the message, both context windows and a
/// caret under the first differing column.
pub fn mismatch_report(expected: &str, actual: &str, mismatch: &Mismatch) -> String {
    let index = match mismatch {
        Mismatch::Char { index, .. } => *index,
        Mismatch::Length { .. } => mismatch.index().saturating_sub(1),
    };
    format!(
        "{mismatch}\nexpected: {}\nactual:   {}\n          {}^",
        context_window(expected, index),
        context_window(actual, index),
        " ".repeat(CONTEXT + 3),
    )
}

/// One aligned pair of words from [`chunk_diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLine {
    /// Word index.
    pub index: usize,
    /// Word from the expected string; empty past its end.
    pub expected: String,
    /// Word from the actual string; empty past its end.
    pub actual: String,
}

impl ChunkLine {
    /// Whether the two words differ.
    pub fn differs(&self) -> bool {
        self.expected != self.actual
    }

    /// A marker line with `^` under every differing character.
    pub fn markers(&self) -> String {
        let mut exp = self.expected.chars();
        let mut act = self.actual.chars();
        let mut out = String::new();
        loop {
            match (exp.next(), act.next()) {
                (None, None) => break,
                (e, a) => out.push(if e == a { ' ' } else { '^' }),
            }
        }
        out.trim_end().to_string()
    }
}

/// Whitespace-insensitive, word-aligned comparison.
///
/// Strips all whitespace from both strings, splits them into words of
/// `chunk` characters and pairs them up. Returns every pair, so callers can
/// print the full alignment or filter with [`ChunkLine::differs`].
pub fn chunk_diff(expected: &str, actual: &str, chunk: usize) -> Vec<ChunkLine> {
    let chunk = chunk.max(1);
    let exp = split_words(expected, chunk);
    let act = split_words(actual, chunk);
    let count = exp.len().max(act.len());
    (0..count)
        .map(|index| ChunkLine {
            index,
            expected: exp.get(index).cloned().unwrap_or_default(),
            actual: act.get(index).cloned().unwrap_or_default(),
        })
        .collect()
}

fn split_words(s: &str, chunk: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    chars.chunks(chunk).map(|w| w.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(first_mismatch("0101", "0101"), None);
    }

    #[test]
    fn test_char_mismatch() {
        let m = first_mismatch("010101", "010001").unwrap();
        assert_eq!(
            m,
            Mismatch::Char {
                index: 3,
                expected: '1',
                actual: '0'
            }
        );
        assert!(m.to_string().contains("differ at 3"));
    }

    #[test]
    fn test_length_mismatch() {
        let m = first_mismatch("0101", "010").unwrap();
        assert_eq!(
            m,
            Mismatch::Length {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(m.index(), 3);
        assert!(m.to_string().contains("shorter"));
    }

    #[test]
    fn test_context_window_alignment() {
        let s = "1".repeat(50);
        let near = context_window(&s, 5);
        let far = context_window(&s, 25);
        // The mismatch column is the same regardless of position.
        assert_eq!(near.find('1').unwrap() + 5, CONTEXT + 3);
        assert!(far.starts_with("..."));
        assert!(far.ends_with("..."));
    }

    #[test]
    fn test_report_has_caret() {
        let m = first_mismatch("0000", "0010").unwrap();
        let report = mismatch_report("0000", "0010", &m);
        assert_eq!(report.lines().count(), 4);
        assert!(report.ends_with('^'));
    }

    #[test]
    fn test_chunk_diff() {
        let lines = chunk_diff("0101 0000\n1111", "010100011111 10", 4);
        assert_eq!(lines.len(), 4);
        assert!(!lines[0].differs());
        assert!(lines[1].differs());
        assert_eq!(lines[1].markers(), "   ^");
        assert_eq!(lines[3].expected, "");
        assert_eq!(lines[3].actual, "10");
    }
}
