use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use parascribe_core::audio::infrastructure::wav_audio_source::WavAudioSource;
use parascribe_core::output::{transcript_csv, transcript_json};
use parascribe_core::recognition::domain::recognizer_pool::RecognizerPool;
use parascribe_core::recognition::domain::speech_recognizer::SpeechRecognizer;
use parascribe_core::recognition::infrastructure::whisper_recognizer::WhisperRecognizer;
use parascribe_core::shared::constants::{
    DEFAULT_CHUNK_LEN, DEFAULT_OVERLAP, DEFAULT_POOL_SIZE, DEFAULT_WORKERS, WHISPER_MODEL_NAME,
    WHISPER_MODEL_URL,
};
use parascribe_core::shared::model_resolver;
use parascribe_core::transcription::chunk_executor::ProgressFn;
use parascribe_core::transcription::infrastructure::threaded_chunk_executor::ThreadedChunkExecutor;
use parascribe_core::transcription::transcribe_use_case::Transcriber;

/// Parallel chunked speech transcription for long audio files.
#[derive(Parser)]
#[command(name = "parascribe")]
struct Cli {
    /// Input WAV file (16 kHz mono recommended).
    input: PathBuf,

    /// Output transcript file.
    output: PathBuf,

    /// Window length in seconds.
    #[arg(long, default_value_t = DEFAULT_CHUNK_LEN)]
    chunk_len: f64,

    /// Seconds of overlap between consecutive windows.
    #[arg(long, default_value_t = DEFAULT_OVERLAP)]
    overlap: f64,

    /// Concurrent transcription workers.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Recognizer handles to create (bounds engine parallelism).
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Output format: json or csv.
    #[arg(long, default_value = "json")]
    format: String,

    /// Path to a whisper ggml model (downloaded to the cache if omitted).
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model_path = resolve_model(&cli)?;

    log::info!("Loading {} recognizer(s)", cli.pool_size);
    let mut recognizers: Vec<Box<dyn SpeechRecognizer>> = Vec::with_capacity(cli.pool_size);
    for _ in 0..cli.pool_size {
        recognizers.push(Box::new(WhisperRecognizer::new(&model_path)?));
    }
    let pool = Arc::new(RecognizerPool::new(recognizers));

    let source = WavAudioSource::open(&cli.input)?;

    let transcriber = Transcriber::new(Box::new(ThreadedChunkExecutor::new()))
        .with_chunking(cli.chunk_len, cli.overlap)
        .with_workers(cli.workers);

    let progress: ProgressFn = Box::new(|event| {
        eprint!("\rTranscribing... {:3.0}%", event.percent * 100.0);
        log::debug!("window text: {}", event.message);
    });

    let transcript = transcriber.transcribe(&source, &pool, Some(progress))?;
    eprintln!();

    let file = std::fs::File::create(&cli.output)?;
    match cli.format.as_str() {
        "csv" => transcript_csv::write_csv(file, &transcript)?,
        _ => transcript_json::write_json(file, &transcript)?,
    }
    log::info!(
        "Wrote {} words to {}",
        transcript.len(),
        cli.output.display()
    );

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.chunk_len <= 0.0 || cli.overlap <= 0.0 || cli.chunk_len <= cli.overlap {
        return Err(format!(
            "Chunk length must be positive and exceed overlap, got chunk_len={} overlap={}",
            cli.chunk_len, cli.overlap
        )
        .into());
    }
    if cli.workers == 0 {
        return Err("At least one worker is required".into());
    }
    if cli.pool_size == 0 {
        return Err("At least one recognizer is required".into());
    }
    if cli.format != "json" && cli.format != "csv" {
        return Err(format!("Format must be 'json' or 'csv', got '{}'", cli.format).into());
    }
    Ok(())
}

fn resolve_model(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.model {
        if !path.exists() {
            return Err(format!("Model file not found: {}", path.display()).into());
        }
        return Ok(path.clone());
    }

    log::info!("Resolving model: {WHISPER_MODEL_NAME}");
    let path = model_resolver::resolve(
        WHISPER_MODEL_NAME,
        WHISPER_MODEL_URL,
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();
    Ok(path)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading whisper model... {pct}%");
    } else {
        eprint!("\rDownloading whisper model... {downloaded} bytes");
    }
}
