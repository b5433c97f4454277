use crate::recognition::domain::word_alignment::WordAlignment;

use super::chunk_result::ChunkResult;

/// Flatten per-window results into one transcript in the global time base.
///
/// Results are ordered by window start time, never by completion order;
/// the sort is stable, though distinct windows cannot tie. Word `start`
/// and `end` are both shifted by the owning window's offset. Words
/// duplicated by window overlap are kept for downstream consumers to
/// resolve.
pub fn merge_chunks(mut results: Vec<ChunkResult>) -> Vec<WordAlignment> {
    results.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut transcript = Vec::new();
    for chunk in results {
        let offset = chunk.start_time;
        for mut word in chunk.words {
            word.start = word.start.map(|s| s + offset);
            word.end = word.end.map(|e| e + offset);
            transcript.push(word);
        }
    }
    transcript
}
