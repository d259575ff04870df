//! BBC encoder (compression).

use crate::header::{MAX_LITERALS, MAX_RUNS, encode_normal_chunk, encode_special_chunk, is_dirty};
use oxiidx_core::{Result, StepRecorder, word_to_string};
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

/// One flushed chunk, for step-by-step replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BbcStep {
    /// Zero bytes counted by the chunk header.
    pub runs: usize,
    /// Whether the chunk tail is a single dirty byte.
    pub special: bool,
    /// First input byte covered by this chunk.
    pub start_byte: usize,
    /// One past the last input byte covered by this chunk.
    pub end_byte: usize,
    /// The covered input bytes.
    #[serde(serialize_with = "byte_bits")]
    pub source: Vec<u8>,
    /// The emitted bytes.
    #[serde(serialize_with = "byte_bits")]
    pub encoded: Vec<u8>,
}

impl BbcStep {
    /// The emitted bytes as a bit string.
    pub fn encoded_bits(&self) -> String {
        render_bytes(&self.encoded, "")
    }
}

fn render_bytes(bytes: &[u8], separator: &str) -> String {
    bytes
        .iter()
        .map(|&b| word_to_string(u64::from(b), 8))
        .collect::<Vec<_>>()
        .join(separator)
}

fn byte_bits<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&render_bytes(bytes, " "))
}

/// Which kind of bytes the encoder is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Counting zero bytes, possibly holding one dirty byte.
    InRuns,
    /// Collecting literal bytes after the runs were broken.
    InLiterals,
}

/// BBC encoder state machine.
///
/// Consumes the padded input bytes one at a time; see the crate docs for
/// the transition rules.
#[derive(Debug)]
pub struct BbcEncoder<'a, R> {
    input: &'a [u8],
    recorder: &'a mut R,
    out: Vec<u8>,
    mode: Mode,
    runs: usize,
    dirty: Option<u8>,
    literals: Vec<u8>,
    /// First input byte not yet covered by a flushed chunk.
    group_start: usize,
}

impl<'a, R: StepRecorder<BbcStep>> BbcEncoder<'a, R> {
    /// Create an encoder over `input`, reporting flushes to `recorder`.
    pub fn new(input: &'a [u8], recorder: &'a mut R) -> Self {
        // Worst case: a one-byte header for every 15 literals.
        let capacity = input.len() + input.len().div_ceil(MAX_LITERALS) + 3;
        Self {
            input,
            recorder,
            out: Vec::with_capacity(capacity),
            mode: Mode::InRuns,
            runs: 0,
            dirty: None,
            literals: Vec::with_capacity(MAX_LITERALS),
            group_start: 0,
        }
    }

    /// Run the state machine over the whole input and return the encoding.
    pub fn encode(mut self) -> Result<Vec<u8>> {
        let input = self.input;
        for (index, &byte) in input.iter().enumerate() {
            match self.mode {
                Mode::InRuns => self.in_runs(index, byte)?,
                Mode::InLiterals => self.in_literals(index, byte)?,
            }
        }
        self.finish()?;

        debug!(
            input_bytes = input.len(),
            output_bytes = self.out.len(),
            "bbc encode complete"
        );
        Ok(self.out)
    }

    fn in_runs(&mut self, index: usize, byte: u8) -> Result<()> {
        if byte == 0 {
            if let Some(dirty) = self.dirty.take() {
                self.flush_special(dirty, index)?;
                self.runs = 0;
            }
            self.runs += 1;
            if self.runs >= MAX_RUNS {
                self.flush_normal(index + 1)?;
                self.runs = 0;
            }
        } else if is_dirty(byte) {
            match self.dirty.take() {
                // Only one dirty byte fits the special slot.
                Some(previous) => {
                    self.literals.push(previous);
                    self.literals.push(byte);
                    self.mode = Mode::InLiterals;
                }
                None => self.dirty = Some(byte),
            }
        } else {
            if let Some(previous) = self.dirty.take() {
                self.literals.push(previous);
            }
            self.literals.push(byte);
            self.mode = Mode::InLiterals;
        }
        Ok(())
    }

    fn in_literals(&mut self, index: usize, byte: u8) -> Result<()> {
        if byte == 0 {
            self.flush_normal(index)?;
            self.runs = 1;
            self.mode = Mode::InRuns;
        } else {
            self.literals.push(byte);
            if self.literals.len() >= MAX_LITERALS {
                self.flush_normal(index + 1)?;
                self.runs = 0;
                self.mode = Mode::InRuns;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let end = self.input.len();
        match self.dirty.take() {
            Some(dirty) if self.mode == Mode::InRuns => self.flush_special(dirty, end),
            _ if !self.literals.is_empty() || self.runs > 0 => self.flush_normal(end),
            _ => Ok(()),
        }
    }

    fn flush_special(&mut self, dirty: u8, end: usize) -> Result<()> {
        let mark = self.out.len();
        encode_special_chunk(self.runs, dirty, &mut self.out)?;
        self.record(true, mark, end);
        Ok(())
    }

    fn flush_normal(&mut self, end: usize) -> Result<()> {
        let mark = self.out.len();
        encode_normal_chunk(self.runs, &self.literals, &mut self.out)?;
        self.literals.clear();
        self.record(false, mark, end);
        Ok(())
    }

    fn record(&mut self, special: bool, mark: usize, end: usize) {
        trace!(
            runs = self.runs,
            special,
            bytes = self.out.len() - mark,
            "bbc chunk"
        );
        if self.recorder.is_enabled() {
            self.recorder.record(BbcStep {
                runs: self.runs,
                special,
                start_byte: self.group_start,
                end_byte: end,
                source: self.input[self.group_start..end].to_vec(),
                encoded: self.out[mark..].to_vec(),
            });
        }
        self.group_start = end;
    }
}
