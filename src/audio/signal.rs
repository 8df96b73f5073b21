use std::{ops::Range, time::Duration};

use crate::foundation::error::{Wav2PngError, Wav2PngResult};

/// Decoded, de-interleaved audio. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSignal {
    sample_rate: f64,
    channels: Vec<Vec<f32>>,
}

impl AudioSignal {
    /// Build a signal from per-channel samples in `[-1, 1]`.
    ///
    /// Every channel must hold the same number of frames.
    pub fn new(sample_rate: f64, channels: Vec<Vec<f32>>) -> Wav2PngResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Wav2PngError::validation(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        let Some(first) = channels.first() else {
            return Err(Wav2PngError::validation("audio signal needs at least one channel"));
        };
        if channels.iter().any(|c| c.len() != first.len()) {
            return Err(Wav2PngError::validation("audio channels differ in length"));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// `frame_count / sample_rate`.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate)
    }

    /// Channel samples, 0-based.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Frame index of time `t`: `floor(t * sample_rate)`, clamped to the signal length.
    pub fn index_at(&self, t: Duration) -> usize {
        let i = (t.as_secs_f64() * self.sample_rate).floor();
        (i as usize).min(self.frame_count())
    }
}

/// A time range into an audio signal.
///
/// `end == None` means "to the end of the signal".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Duration,
    pub end: Option<Duration>,
}

impl Selection {
    pub fn new(start: Duration, end: Option<Duration>) -> Self {
        Self { start, end }
    }

    /// Resolve against a signal duration.
    ///
    /// A start past the end of the audio, or an end not after the start, is a range error. An
    /// end past the audio is clamped.
    pub fn resolve(&self, duration: Duration) -> Wav2PngResult<(Duration, Duration)> {
        if self.start > duration {
            return Err(Wav2PngError::range(format!(
                "start {:?} is beyond the audio duration {:?}",
                self.start, duration
            )));
        }
        let end = self.end.unwrap_or(duration);
        if end <= self.start {
            return Err(Wav2PngError::range(format!(
                "end {:?} must be after start {:?}",
                end, self.start
            )));
        }
        Ok((self.start, end.min(duration)))
    }

    /// Resolve to a frame index range of `signal`.
    pub fn frames(&self, signal: &AudioSignal) -> Wav2PngResult<Range<usize>> {
        let (start, end) = self.resolve(signal.duration())?;
        Ok(signal.index_at(start)..signal.index_at(end))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/signal.rs"]
mod tests;
