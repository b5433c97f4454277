use crate::recognition::domain::word_alignment::WordAlignment;

/// Alignments recognized for one window, still in the engine-local time
/// base. `start_time` is the owning window's offset into the audio.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkResult {
    pub start_time: f64,
    pub words: Vec<WordAlignment>,
}

impl ChunkResult {
    /// Space-joined words of this chunk, used for progress messages.
    pub fn words_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::domain::word_alignment::AlignmentCase;

    fn word(text: &str) -> WordAlignment {
        WordAlignment {
            word: text.to_string(),
            aligned_word: None,
            case: AlignmentCase::Success,
            start: None,
            end: None,
        }
    }

    #[test]
    fn test_words_text_joins_with_spaces() {
        let chunk = ChunkResult {
            start_time: 18.0,
            words: vec![word("the"), word("quick"), word("fox")],
        };
        assert_eq!(chunk.words_text(), "the quick fox");
    }

    #[test]
    fn test_words_text_empty_chunk() {
        let chunk = ChunkResult {
            start_time: 0.0,
            words: vec![],
        };
        assert_eq!(chunk.words_text(), "");
    }
}
