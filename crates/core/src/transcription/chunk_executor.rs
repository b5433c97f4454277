use std::sync::Arc;

use crate::audio::domain::audio_source::AudioSource;
use crate::audio::domain::audio_window::AudioWindow;
use crate::recognition::domain::recognizer_pool::RecognizerPool;

use super::chunk_result::ChunkResult;
use super::error::TranscribeError;

/// Progress event delivered once per completed window.
///
/// `message` carries the words of that window only, not the cumulative
/// transcript. `percent` is the fraction of windows completed so far,
/// counted in completion order, so events from concurrent workers do not
/// arrive in window order.
#[derive(Clone, Debug)]
pub struct ProgressEvent {
    pub message: String,
    pub percent: f64,
}

pub type ProgressFn = Box<dyn Fn(ProgressEvent) + Send>;

/// Configuration for one execution run.
pub struct ExecutionConfig {
    pub workers: usize,
    pub on_progress: Option<ProgressFn>,
}

/// Abstracts how windows are fanned out to recognizers.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (e.g. threaded). Implementations return the
/// full set of chunk results in no particular order, or the first error:
/// never a partial result set.
pub trait ChunkExecutor: Send {
    fn execute(
        &self,
        source: &dyn AudioSource,
        windows: &[AudioWindow],
        pool: &Arc<RecognizerPool>,
        config: ExecutionConfig,
    ) -> Result<Vec<ChunkResult>, TranscribeError>;
}
