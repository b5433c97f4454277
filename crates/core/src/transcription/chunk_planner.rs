use crate::audio::domain::audio_window::AudioWindow;

use super::error::TranscribeError;

/// Split a total duration into overlapping windows.
///
/// Consecutive windows advance by `chunk_len - overlap` seconds, so each
/// shares `overlap` seconds with its predecessor. A zero duration yields
/// no windows at all.
pub fn plan_windows(
    duration: f64,
    chunk_len: f64,
    overlap: f64,
) -> Result<Vec<AudioWindow>, TranscribeError> {
    // NaN fails every comparison and lands in the error arm
    if !(chunk_len > 0.0 && overlap > 0.0 && chunk_len > overlap) {
        return Err(TranscribeError::InvalidChunking { chunk_len, overlap });
    }
    if duration <= 0.0 {
        return Ok(Vec::new());
    }

    let stride = chunk_len - overlap;
    let count = (duration / stride).ceil() as usize;

    Ok((0..count)
        .map(|index| AudioWindow {
            index,
            start_time: index as f64 * stride,
            length: chunk_len,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(50.0, 20.0, 2.0, 3)]
    #[case(36.0, 20.0, 2.0, 2)]
    #[case(5.0, 20.0, 2.0, 1)]
    #[case(18.0, 20.0, 2.0, 1)]
    #[case(18.1, 20.0, 2.0, 2)]
    #[case(180.0, 20.0, 2.0, 10)]
    fn test_window_count_is_ceil_of_duration_over_stride(
        #[case] duration: f64,
        #[case] chunk_len: f64,
        #[case] overlap: f64,
        #[case] expected: usize,
    ) {
        let windows = plan_windows(duration, chunk_len, overlap).unwrap();
        assert_eq!(windows.len(), expected);
    }

    #[test]
    fn test_starts_advance_by_stride() {
        let windows = plan_windows(50.0, 20.0, 2.0).unwrap();
        let starts: Vec<f64> = windows.iter().map(|w| w.start_time).collect();
        assert_eq!(starts, vec![0.0, 18.0, 36.0]);
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.index, i);
            assert_relative_eq!(w.length, 20.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_consecutive_windows_share_overlap_seconds() {
        let windows = plan_windows(50.0, 20.0, 2.0).unwrap();
        for pair in windows.windows(2) {
            assert_relative_eq!(pair[0].end_time() - pair[1].start_time, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_yields_no_windows() {
        assert!(plan_windows(0.0, 20.0, 2.0).unwrap().is_empty());
    }

    #[rstest]
    #[case(20.0, 20.0)] // equal
    #[case(2.0, 20.0)] // overlap exceeds chunk
    #[case(0.0, 2.0)] // zero chunk
    #[case(20.0, 0.0)] // zero overlap
    #[case(-20.0, 2.0)] // negative chunk
    #[case(20.0, -2.0)] // negative overlap
    #[case(f64::NAN, 2.0)]
    fn test_invalid_chunking_is_rejected(#[case] chunk_len: f64, #[case] overlap: f64) {
        let result = plan_windows(50.0, chunk_len, overlap);
        assert!(matches!(
            result,
            Err(TranscribeError::InvalidChunking { .. })
        ));
    }
}
