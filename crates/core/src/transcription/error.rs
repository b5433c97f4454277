use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("chunk length must be positive and exceed overlap (chunk_len={chunk_len}, overlap={overlap})")]
    InvalidChunking { chunk_len: f64, overlap: f64 },
    #[error("recognizer pool has no handles")]
    EmptyPool,
    #[error("failed to read audio: {0}")]
    AudioInput(String),
    #[error("recognition failed on window {window}: {message}")]
    Recognition { window: usize, message: String },
    #[error("transcription worker panicked")]
    WorkerPanic,
}
