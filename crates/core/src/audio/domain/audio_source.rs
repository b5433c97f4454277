use std::error::Error;

/// Domain interface for a decoded audio input.
///
/// A source hands out independent readers so concurrent workers never
/// share a file cursor.
pub trait AudioSource: Send + Sync {
    /// Total duration of the audio in seconds.
    fn duration(&self) -> f64;

    /// Sample rate of the decoded mono stream.
    fn sample_rate(&self) -> u32;

    /// Open a new reader with its own position onto the same audio.
    fn open_reader(&self) -> Result<Box<dyn AudioSliceReader>, Box<dyn Error>>;
}

/// A positioned reader over mono f32 samples normalized to [-1.0, 1.0].
pub trait AudioSliceReader: Send {
    /// Read up to `length` seconds starting at `start` seconds.
    ///
    /// The slice is clipped to the end of the stream; a start at or past
    /// the end yields an empty slice.
    fn read_window(&mut self, start: f64, length: f64) -> Result<Vec<f32>, Box<dyn Error>>;
}
