use std::sync::Arc;

use crate::audio::domain::audio_source::AudioSource;
use crate::recognition::domain::recognizer_pool::RecognizerPool;
use crate::recognition::domain::word_alignment::WordAlignment;
use crate::shared::constants::{DEFAULT_CHUNK_LEN, DEFAULT_OVERLAP, DEFAULT_WORKERS};

use super::chunk_executor::{ChunkExecutor, ExecutionConfig, ProgressFn};
use super::chunk_merger::merge_chunks;
use super::chunk_planner::plan_windows;
use super::error::TranscribeError;

/// Orchestrates chunked transcription end-to-end.
///
/// Plans overlapping windows over the source duration, fans them out to
/// the executor against a shared recognizer pool, and merges completed
/// chunks into one time-ordered transcript. Either the whole transcript
/// comes back or the first failure does; there is no partial output.
pub struct Transcriber {
    chunk_len: f64,
    overlap: f64,
    workers: usize,
    executor: Box<dyn ChunkExecutor>,
}

impl Transcriber {
    pub fn new(executor: Box<dyn ChunkExecutor>) -> Self {
        Self {
            chunk_len: DEFAULT_CHUNK_LEN,
            overlap: DEFAULT_OVERLAP,
            workers: DEFAULT_WORKERS,
            executor,
        }
    }

    pub fn with_chunking(mut self, chunk_len: f64, overlap: f64) -> Self {
        self.chunk_len = chunk_len;
        self.overlap = overlap;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn transcribe(
        &self,
        source: &dyn AudioSource,
        pool: &Arc<RecognizerPool>,
        on_progress: Option<ProgressFn>,
    ) -> Result<Vec<WordAlignment>, TranscribeError> {
        if pool.capacity() == 0 {
            return Err(TranscribeError::EmptyPool);
        }

        let windows = plan_windows(source.duration(), self.chunk_len, self.overlap)?;
        log::debug!(
            "planned {} windows of {:.1}s with {:.1}s overlap",
            windows.len(),
            self.chunk_len,
            self.overlap
        );
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.executor.execute(
            source,
            &windows,
            pool,
            ExecutionConfig {
                workers: self.workers,
                on_progress,
            },
        )?;

        let transcript = merge_chunks(results);
        log::info!(
            "transcribed {} words across {} windows",
            transcript.len(),
            windows.len()
        );
        Ok(transcript)
    }
}
