use std::error::Error;
use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::recognition::domain::speech_recognizer::SpeechRecognizer;
use crate::recognition::domain::word_alignment::{AlignmentCase, WordAlignment};

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model context is loaded once and lives as long as the handle;
/// each finalize runs a fresh inference state over the audio buffered
/// since the last reset, so a reset handle is immediately reusable.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
    pending: Vec<f32>,
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn Error>> {
        if !model_path.exists() {
            return Err(format!("whisper model not found at: {}", model_path.display()).into());
        }

        let ctx = WhisperContext::new_with_params(
            model_path.to_str().ok_or("invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("failed to load whisper model: {e}"))?;

        Ok(Self {
            ctx,
            pending: Vec::new(),
        })
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn push_audio(&mut self, samples: &[f32]) -> Result<(), Box<dyn Error>> {
        self.pending.extend_from_slice(samples);
        Ok(())
    }

    fn final_alignments(&mut self) -> Result<Vec<WordAlignment>, Box<dyn Error>> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("failed to create whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("en"));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, &self.pending)
            .map_err(|e| format!("whisper inference failed: {e}"))?;

        let mut words = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            for tok_idx in 0..segment.n_tokens() {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens like [_BEG_] and <|endoftext|>
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                // Token timestamps are in centiseconds (10ms units)
                let token_data = token.token_data();
                let start = token_data.t0 as f64 / 100.0;
                let end = token_data.t1 as f64 / 100.0;
                if end <= start {
                    continue;
                }

                words.push(WordAlignment {
                    word: trimmed.to_string(),
                    aligned_word: Some(trimmed.to_lowercase()),
                    case: AlignmentCase::Success,
                    start: Some(start),
                    end: Some(end),
                });
            }
        }

        Ok(words)
    }

    fn reset(&mut self) -> Result<(), Box<dyn Error>> {
        self.pending.clear();
        Ok(())
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
