use serde::Serialize;

/// Match-quality classification for a recognized word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AlignmentCase {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "not-found-in-audio")]
    NotFoundInAudio,
    #[serde(rename = "other")]
    Other,
}

/// A single recognized word with timing and match classification.
///
/// Times are seconds; whether they are engine-local or global depends on
/// where the value sits in the pipeline — the merger shifts them into
/// the global time base.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordAlignment {
    pub word: String,
    #[serde(rename = "alignedWord", skip_serializing_if = "Option::is_none")]
    pub aligned_word: Option<String>,
    pub case: AlignmentCase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}
