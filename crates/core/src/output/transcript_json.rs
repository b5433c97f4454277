use std::error::Error;
use std::io::Write;

use crate::recognition::domain::word_alignment::WordAlignment;

/// Write the transcript as JSON, a direct structural mirror of the
/// in-memory word sequence.
pub fn write_json<W: Write>(out: W, transcript: &[WordAlignment]) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(out, transcript)?;
    Ok(())
}
