use std::error::Error;

use super::word_alignment::WordAlignment;

/// Domain interface for a stateful speech recognition engine.
///
/// A handle accumulates audio via `push_audio`, produces word-level
/// alignments for everything pushed since the last reset via
/// `final_alignments`, and must be `reset` back to its initial state
/// before serving another caller. Alignment times are local to the audio
/// pushed since the last reset. Resetting an already fresh handle must
/// be a no-op.
pub trait SpeechRecognizer: Send {
    fn push_audio(&mut self, samples: &[f32]) -> Result<(), Box<dyn Error>>;

    fn final_alignments(&mut self) -> Result<Vec<WordAlignment>, Box<dyn Error>>;

    fn reset(&mut self) -> Result<(), Box<dyn Error>>;
}
