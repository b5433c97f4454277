/// Seconds of audio per window.
pub const DEFAULT_CHUNK_LEN: f64 = 20.0;

/// Seconds of audio shared between consecutive windows.
pub const DEFAULT_OVERLAP: f64 = 2.0;

/// Concurrent transcription workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Recognizer handles created for the pool.
pub const DEFAULT_POOL_SIZE: usize = 2;

pub const WHISPER_MODEL_NAME: &str = "ggml-tiny.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin";

/// Sample rate whisper models expect.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;
