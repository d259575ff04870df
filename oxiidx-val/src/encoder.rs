//! VAL encoder (compression).
//!
//! Chunks are classified exactly as in WAH. Runs are flushed lazily: a run
//! that reached the maximum segment count is only written out when the next
//! chunk arrives. Each flushed run or literal fills the next free segment of
//! the pending word, which is emitted once every segment is filled.

use crate::config::ValConfig;
use oxiidx_core::{Bitmap, Chunk, EncodedBitmap, RunType, StepRecorder, word_to_string};
use serde::Serialize;
use tracing::{debug, trace};

/// One placed segment, for step-by-step replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValStep {
    /// Chunks covered by a run segment; 0 for a literal.
    pub runs: u64,
    /// Run type, or `None` for a literal.
    pub run_type: Option<RunType>,
    /// Bit offset of the first input bit covered by the segment.
    pub start_index: usize,
    /// Slot the segment was placed in.
    pub segment: u32,
    /// Pending word after the segment was placed.
    pub compressed: String,
}

#[derive(Debug, Clone, Copy)]
struct PendingRun {
    run_type: RunType,
    count: u64,
    start: usize,
}

/// Word being filled segment by segment.
#[derive(Debug, Clone, Copy)]
struct PendingWord {
    word: u64,
    filled: u32,
}

/// VAL encoder.
#[derive(Debug)]
pub struct ValEncoder<'a, R> {
    config: ValConfig,
    recorder: &'a mut R,
    out: EncodedBitmap,
    run: Option<PendingRun>,
    pending: PendingWord,
}

impl<'a, R: StepRecorder<ValStep>> ValEncoder<'a, R> {
    /// Create an encoder for `config`, reporting segments to `recorder`.
    pub fn new(config: ValConfig, recorder: &'a mut R) -> Self {
        Self {
            config,
            recorder,
            out: EncodedBitmap::with_capacity(config.word_bits(), 0),
            run: None,
            pending: PendingWord {
                word: config.default_word(),
                filled: 0,
            },
        }
    }

    /// Encode the whole bitmap.
    pub fn encode(mut self, bitmap: &Bitmap) -> EncodedBitmap {
        let words = bitmap.len().div_ceil(self.config.bits_per_word());
        self.out = EncodedBitmap::with_capacity(self.config.word_bits(), words);

        for chunk in bitmap.chunks(self.config.scan_length()) {
            self.push_chunk(chunk);
        }
        self.flush_run();
        if self.pending.filled > 0 {
            self.emit_word();
        }

        debug!(
            word_size = self.config.word_bits(),
            segment_count = self.config.segment_count(),
            input_bits = bitmap.len(),
            words = self.out.len(),
            "val encode complete"
        );
        self.out
    }

    fn push_chunk(&mut self, chunk: Chunk) {
        let Some(bit) = chunk.run_bit() else {
            self.flush_run();
            self.place_literal(chunk);
            return;
        };

        let run_type = RunType::from_bit(bit);
        let max = self.config.max_run_length();
        match &mut self.run {
            Some(run) if run.run_type == run_type && run.count < max => run.count += 1,
            _ => {
                self.flush_run();
                self.run = Some(PendingRun {
                    run_type,
                    count: 1,
                    start: chunk.start(),
                });
            }
        }
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.run.take() {
            let slot = self.pending.filled;
            let payload = self.config.run_segment(run.run_type, run.count);
            self.pending.word |= payload << self.config.segment_shift(slot);
            self.placed(run.count, Some(run.run_type), run.start);
        }
    }

    fn place_literal(&mut self, chunk: Chunk) {
        let slot = self.pending.filled;
        self.pending.word &= !self.config.header_bit(slot);
        self.pending.word |= chunk.value() << self.config.segment_shift(slot);
        self.placed(0, None, chunk.start());
    }

    fn placed(&mut self, runs: u64, run_type: Option<RunType>, start_index: usize) {
        let segment = self.pending.filled;
        self.pending.filled += 1;
        trace!(segment, runs, start_index, "val segment");
        if self.recorder.is_enabled() {
            self.recorder.record(ValStep {
                runs,
                run_type,
                start_index,
                segment,
                compressed: word_to_string(self.pending.word, self.config.word_bits()),
            });
        }
        if self.pending.filled == self.config.segment_count() {
            self.emit_word();
        }
    }

    fn emit_word(&mut self) {
        self.out.push(self.pending.word);
        self.pending = PendingWord {
            word: self.config.default_word(),
            filled: 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxiidx_core::NoTrace;

    fn config() -> ValConfig {
        ValConfig::from_bits(16, 2).unwrap()
    }

    fn encode(bits: &str) -> String {
        let bitmap: Bitmap = bits.parse().unwrap();
        ValEncoder::new(config(), &mut NoTrace)
            .encode(&bitmap)
            .to_bit_string()
    }

    #[test]
    fn test_literal_then_run() {
        let bits = "1010001".to_string() + &"1".repeat(14);
        assert_eq!(encode(&bits), "0110100011000010");
    }

    #[test]
    fn test_partial_word_keeps_default_header() {
        assert_eq!(encode(&"1".repeat(21)), "1110000110000000");
    }

    #[test]
    fn test_run_at_max_flushes_lazily() {
        // 63 chunks fill one segment; the 64th starts the next.
        let bits = "0".repeat(7 * 64);
        assert_eq!(encode(&bits), "1101111110000001");
    }

    #[test]
    fn test_ending_chunk_is_literal() {
        // Three ones padded to seven bits.
        assert_eq!(encode("111"), "0111100000000000");
    }

    #[test]
    fn test_trace_steps() {
        let bitmap: Bitmap = ("0".repeat(14) + "1010001" + &"1".repeat(7)).parse().unwrap();
        let mut steps = Vec::new();
        let encoded = ValEncoder::new(config(), &mut steps).encode(&bitmap);

        let slots: Vec<_> = steps.iter().map(|s| s.segment).collect();
        assert_eq!(slots, vec![0, 1, 0]);
        let starts: Vec<_> = steps.iter().map(|s| s.start_index).collect();
        assert_eq!(starts, vec![0, 14, 21]);
        assert_eq!(steps[0].runs, 2);
        assert_eq!(steps[0].compressed, "1100000100000000");

        // The last step of each word group is the emitted word.
        let wire = encoded.to_bit_string();
        assert_eq!(steps[1].compressed, &wire[..16]);
        assert_eq!(steps[2].compressed, &wire[16..]);
    }
}
