use std::error::Error;
use std::io::Write;

use crate::recognition::domain::word_alignment::{AlignmentCase, WordAlignment};

/// Write the transcript as CSV: one row per word whose case is
/// `success` or `not-found-in-audio`, columns `word, alignedWord,
/// start, end`, in exact transcript order. Other cases are skipped
/// silently; missing fields become empty cells.
pub fn write_csv<W: Write>(mut out: W, transcript: &[WordAlignment]) -> Result<(), Box<dyn Error>> {
    for word in transcript {
        match word.case {
            AlignmentCase::Success | AlignmentCase::NotFoundInAudio => {}
            AlignmentCase::Other => continue,
        }

        let row = [
            quote_field(&word.word),
            word.aligned_word.as_deref().map(quote_field).unwrap_or_default(),
            word.start.map(|v| v.to_string()).unwrap_or_default(),
            word.end.map(|v| v.to_string()).unwrap_or_default(),
        ];
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

/// Quote a field if it holds a comma, quote, or newline.
fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
