use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::audio::domain::audio_source::{AudioSliceReader, AudioSource};

/// WAV-backed audio source using hound.
///
/// Supports 8/16/24/32-bit integer and 32-bit float PCM. Multi-channel
/// audio is downmixed to mono by averaging each frame. `open_reader`
/// opens a fresh file handle per call, so concurrent readers never race
/// on a shared cursor.
pub struct WavAudioSource {
    path: PathBuf,
    sample_rate: u32,
    total_frames: u32,
}

impl WavAudioSource {
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let reader = hound::WavReader::open(path)
            .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
        let spec = reader.spec();
        Ok(Self {
            path: path.to_path_buf(),
            sample_rate: spec.sample_rate,
            total_frames: reader.duration(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSource for WavAudioSource {
    fn duration(&self) -> f64 {
        self.total_frames as f64 / self.sample_rate as f64
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open_reader(&self) -> Result<Box<dyn AudioSliceReader>, Box<dyn Error>> {
        let reader = hound::WavReader::open(&self.path)
            .map_err(|e| format!("failed to open {}: {e}", self.path.display()))?;
        Ok(Box::new(WavSliceReader {
            spec: reader.spec(),
            total_frames: reader.duration(),
            reader,
        }))
    }
}

struct WavSliceReader {
    reader: hound::WavReader<BufReader<File>>,
    spec: hound::WavSpec,
    total_frames: u32,
}

impl AudioSliceReader for WavSliceReader {
    fn read_window(&mut self, start: f64, length: f64) -> Result<Vec<f32>, Box<dyn Error>> {
        let rate = self.spec.sample_rate as f64;
        let start_frame = (start * rate) as u32;
        if start_frame >= self.total_frames {
            return Ok(Vec::new());
        }

        let wanted = (length * rate) as u32;
        let frames = wanted.min(self.total_frames - start_frame) as usize;
        let channels = self.spec.channels as usize;

        self.reader
            .seek(start_frame)
            .map_err(|e| format!("failed to seek to {start:.3}s: {e}"))?;

        let interleaved = match self.spec.sample_format {
            hound::SampleFormat::Float => self
                .reader
                .samples::<f32>()
                .take(frames * channels)
                .collect::<Result<Vec<f32>, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (self.spec.bits_per_sample - 1)) as f32;
                self.reader
                    .samples::<i32>()
                    .take(frames * channels)
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()?
            }
        };

        Ok(downmix(&interleaved, channels))
    }
}

/// Average interleaved channels into mono frames.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
