use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    audio::signal::AudioSignal,
    foundation::error::{Wav2PngError, Wav2PngResult},
};

/// Channel selection used to fold a signal down to mono.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mix {
    /// Channel 1.
    Left,
    /// Channel 2.
    Right,
    /// Mean of channels 1 and 2.
    #[default]
    LeftRight,
}

impl Mix {
    /// Selected channels, 1-based.
    pub fn channels(self) -> &'static [usize] {
        match self {
            Self::Left => &[1],
            Self::Right => &[2],
            Self::LeftRight => &[1, 2],
        }
    }
}

impl FromStr for Mix {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::Left),
            "R" => Ok(Self::Right),
            "L+R" => Ok(Self::LeftRight),
            _ => Err(Wav2PngError::validation(format!(
                "invalid channel mix '{s}' (expected L, R or L+R)"
            ))),
        }
    }
}

impl fmt::Display for Mix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::LeftRight => "L+R",
        })
    }
}

impl TryFrom<String> for Mix {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mix> for String {
    fn from(m: Mix) -> Self {
        m.to_string()
    }
}

/// Fold `signal` to one channel: `out[i] = mean(selected channels at i)`.
///
/// A mono signal is returned unchanged whatever the selection.
pub fn mix(signal: &AudioSignal, mix: Mix) -> Wav2PngResult<Vec<f32>> {
    if signal.channel_count() == 1 {
        return Ok(signal.channels()[0].clone());
    }

    let selected = mix
        .channels()
        .iter()
        .map(|&ch| {
            signal.channel(ch - 1).ok_or_else(|| {
                Wav2PngError::range(format!(
                    "channel {ch} requested but the audio has {} channels",
                    signal.channel_count()
                ))
            })
        })
        .collect::<Wav2PngResult<Vec<_>>>()?;

    if let [only] = selected.as_slice() {
        return Ok(only.to_vec());
    }

    let n = selected.len() as f32;
    Ok((0..signal.frame_count())
        .map(|i| selected.iter().map(|c| c[i]).sum::<f32>() / n)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
