use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::audio::domain::audio_source::{AudioSliceReader, AudioSource};
use crate::audio::domain::audio_window::AudioWindow;
use crate::recognition::domain::recognizer_pool::RecognizerPool;
use crate::transcription::chunk_executor::{
    ChunkExecutor, ExecutionConfig, ProgressEvent, ProgressFn,
};
use crate::transcription::chunk_result::ChunkResult;
use crate::transcription::error::TranscribeError;

/// Executes chunk transcription on a bounded set of worker threads.
///
/// Windows are fed over a channel and claimed by `min(windows, workers)`
/// threads. Each worker owns a private audio reader and borrows a
/// recognizer from the shared pool per window, so parallelism is bounded
/// by the pool as well as the worker count. The first failure stops
/// further windows from being claimed and becomes the single error for
/// the run; results from windows already in flight are discarded.
pub struct ThreadedChunkExecutor;

impl ThreadedChunkExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadedChunkExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkExecutor for ThreadedChunkExecutor {
    fn execute(
        &self,
        source: &dyn AudioSource,
        windows: &[AudioWindow],
        pool: &Arc<RecognizerPool>,
        config: ExecutionConfig,
    ) -> Result<Vec<ChunkResult>, TranscribeError> {
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let total = windows.len();
        let worker_count = config.workers.max(1).min(total);

        // Both channels are sized to hold everything, so workers never
        // block on send and the feed can be filled up front
        let (window_tx, window_rx) = crossbeam_channel::bounded::<AudioWindow>(total);
        let (result_tx, result_rx) =
            crossbeam_channel::bounded::<Result<ChunkResult, TranscribeError>>(total);
        for window in windows {
            let _ = window_tx.send(window.clone());
        }
        drop(window_tx);

        let aborted = Arc::new(AtomicBool::new(false));
        let completed = Arc::new(AtomicUsize::new(0));
        let progress = Arc::new(config.on_progress.map(Mutex::new));

        // Open every private reader before spawning anything, so an open
        // failure cannot leave half a fleet running detached
        let mut readers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            readers.push(
                source
                    .open_reader()
                    .map_err(|e| TranscribeError::AudioInput(e.to_string()))?,
            );
        }

        let handles: Vec<_> = readers
            .into_iter()
            .map(|reader| {
                spawn_worker(ChunkWorker {
                    reader,
                    pool: pool.clone(),
                    windows: window_rx.clone(),
                    results: result_tx.clone(),
                    aborted: aborted.clone(),
                    completed: completed.clone(),
                    progress: progress.clone(),
                    total,
                })
            })
            .collect();

        // Only workers may hold senders now, or the drain below never
        // sees the channel close
        drop(result_tx);

        let mut results = Vec::with_capacity(total);
        let mut first_error: Option<TranscribeError> = None;
        for outcome in result_rx {
            match outcome {
                Ok(chunk) => results.push(chunk),
                Err(e) => {
                    aborted.store(true, Ordering::Relaxed);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        for handle in handles {
            if handle.join().is_err() && first_error.is_none() {
                first_error = Some(TranscribeError::WorkerPanic);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }
}

struct ChunkWorker {
    reader: Box<dyn AudioSliceReader>,
    pool: Arc<RecognizerPool>,
    windows: crossbeam_channel::Receiver<AudioWindow>,
    results: crossbeam_channel::Sender<Result<ChunkResult, TranscribeError>>,
    aborted: Arc<AtomicBool>,
    completed: Arc<AtomicUsize>,
    progress: Arc<Option<Mutex<ProgressFn>>>,
    total: usize,
}

fn spawn_worker(mut worker: ChunkWorker) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(window) = worker.windows.recv() {
            if worker.aborted.load(Ordering::Relaxed) {
                break;
            }

            match transcribe_window(&mut *worker.reader, &worker.pool, &window) {
                Ok(chunk) => {
                    let done = worker.completed.fetch_add(1, Ordering::SeqCst) + 1;
                    notify_progress(&worker.progress, &chunk, done, worker.total);
                    log::debug!("window {} done ({done}/{})", window.index, worker.total);
                    if worker.results.send(Ok(chunk)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    worker.aborted.store(true, Ordering::Relaxed);
                    let _ = worker.results.send(Err(e));
                    break;
                }
            }
        }
    })
}

/// Run one window end-to-end: read the clipped slice, borrow a
/// recognizer, feed and finalize it, and stamp the result with the
/// window's start time. The pool guard returns the handle on every exit
/// path.
fn transcribe_window(
    reader: &mut dyn AudioSliceReader,
    pool: &RecognizerPool,
    window: &AudioWindow,
) -> Result<ChunkResult, TranscribeError> {
    let samples = reader
        .read_window(window.start_time, window.length)
        .map_err(|e| TranscribeError::AudioInput(e.to_string()))?;

    let mut recognizer = pool.acquire();
    recognizer
        .push_audio(&samples)
        .map_err(|e| recognition_error(window, e))?;
    let words = recognizer
        .final_alignments()
        .map_err(|e| recognition_error(window, e))?;
    recognizer.reset().map_err(|e| recognition_error(window, e))?;

    Ok(ChunkResult {
        start_time: window.start_time,
        words,
    })
}

fn recognition_error(window: &AudioWindow, e: Box<dyn std::error::Error>) -> TranscribeError {
    TranscribeError::Recognition {
        window: window.index,
        message: e.to_string(),
    }
}

/// Deliver one progress event, serialized across workers by the mutex.
fn notify_progress(
    progress: &Option<Mutex<ProgressFn>>,
    chunk: &ChunkResult,
    done: usize,
    total: usize,
) {
    if let Some(slot) = progress.as_ref() {
        if let Ok(callback) = slot.lock() {
            (*callback)(ProgressEvent {
                message: chunk.words_text(),
                percent: done as f64 / total as f64,
            });
        }
    }
}
