//! WAH encoder (compression).

use crate::config::WahConfig;
use oxiidx_core::{Bitmap, Chunk, EncodedBitmap, RunType, StepRecorder, word_to_string};
use serde::Serialize;
use tracing::{debug, trace};

/// One emitted word, for step-by-step replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WahStep {
    /// Chunks covered by a run word; 0 for a literal.
    pub runs: u64,
    /// Run type, or `None` for a literal.
    pub run_type: Option<RunType>,
    /// Bit offset of the first input bit covered by the word.
    pub start_index: usize,
    /// The emitted word as a bit string.
    pub compressed: String,
}

/// Run being accumulated.
#[derive(Debug, Clone, Copy)]
struct PendingRun {
    run_type: RunType,
    count: u64,
    start: usize,
}

/// WAH encoder.
#[derive(Debug)]
pub struct WahEncoder<'a, R> {
    config: WahConfig,
    recorder: &'a mut R,
    out: EncodedBitmap,
    pending: Option<PendingRun>,
}

impl<'a, R: StepRecorder<WahStep>> WahEncoder<'a, R> {
    /// Create an encoder for `config`, reporting words to `recorder`.
    pub fn new(config: WahConfig, recorder: &'a mut R) -> Self {
        Self {
            config,
            recorder,
            out: EncodedBitmap::with_capacity(config.word_bits(), 0),
            pending: None,
        }
    }

    /// Encode the whole bitmap.
    pub fn encode(mut self, bitmap: &Bitmap) -> EncodedBitmap {
        let chunks = bitmap.chunks(self.config.chunk_bits());
        self.out = EncodedBitmap::with_capacity(self.config.word_bits(), chunks.len());

        for chunk in chunks {
            self.push_chunk(chunk);
        }
        self.flush_run();

        debug!(
            word_size = self.config.word_bits(),
            input_bits = bitmap.len(),
            words = self.out.len(),
            "wah encode complete"
        );
        self.out
    }

    fn push_chunk(&mut self, chunk: Chunk) {
        let Some(bit) = chunk.run_bit() else {
            self.flush_run();
            self.emit(self.config.literal_word(chunk.value()), 0, None, chunk.start());
            return;
        };

        let run_type = RunType::from_bit(bit);
        match &mut self.pending {
            Some(run) if run.run_type == run_type => run.count += 1,
            _ => {
                self.flush_run();
                self.pending = Some(PendingRun {
                    run_type,
                    count: 1,
                    start: chunk.start(),
                });
            }
        }

        if self
            .pending
            .is_some_and(|run| run.count >= self.config.max_run())
        {
            self.flush_run();
        }
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.pending.take() {
            let word = self.config.run_word(run.run_type, run.count);
            self.emit(word, run.count, Some(run.run_type), run.start);
        }
    }

    fn emit(&mut self, word: u64, runs: u64, run_type: Option<RunType>, start_index: usize) {
        trace!(word, runs, start_index, "wah word");
        self.out.push(word);
        if self.recorder.is_enabled() {
            self.recorder.record(WahStep {
                runs,
                run_type,
                start_index,
                compressed: word_to_string(word, self.config.word_bits()),
            });
        }
    }
}
