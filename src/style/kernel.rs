use std::{fmt, str::FromStr};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::error::Wav2PngError;

/// 3x3 antialiasing kernel applied to the waveform layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Kernel {
    /// Identity.
    None,
    /// Blur along the vertical axis.
    #[default]
    Vertical,
    /// Blur along the horizontal axis.
    Horizontal,
    /// Isotropic blur.
    Soft,
}

impl Kernel {
    /// Weight matrix, row-major (`weights()[row][col]`).
    pub const fn weights(self) -> [[u32; 3]; 3] {
        match self {
            Self::None => [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
            Self::Vertical => [[0, 1, 0], [0, 2, 0], [0, 1, 0]],
            Self::Horizontal => [[0, 0, 0], [1, 2, 1], [0, 0, 0]],
            Self::Soft => [[1, 2, 1], [2, 12, 2], [1, 2, 1]],
        }
    }

    /// Normalisation divisor.
    pub fn divisor(self) -> u32 {
        self.weights().iter().flatten().sum()
    }

    /// Convolve every RGBA channel independently. Pixels outside the image read as transparent
    /// black; results are truncated to 8 bits.
    pub fn apply(self, src: &RgbaImage) -> RgbaImage {
        if self == Self::None {
            return src.clone();
        }

        let weights = self.weights();
        let divisor = self.divisor();
        let (w, h) = src.dimensions();
        let (wi, hi) = (w as i64, h as i64);
        let raw = src.as_raw();

        let mut out = RgbaImage::new(w, h);
        for (x, y, px) in out.enumerate_pixels_mut() {
            let mut acc = [0u32; 4];
            for (row, ky) in weights.iter().zip(-1i64..=1) {
                let sy = i64::from(y) + ky;
                if sy < 0 || sy >= hi {
                    continue;
                }
                for (&k, kx) in row.iter().zip(-1i64..=1) {
                    let sx = i64::from(x) + kx;
                    if k == 0 || sx < 0 || sx >= wi {
                        continue;
                    }
                    let idx = ((sy * wi + sx) as usize) * 4;
                    for c in 0..4 {
                        acc[c] += k * u32::from(raw[idx + c]);
                    }
                }
            }
            for c in 0..4 {
                px.0[c] = (acc[c] / divisor) as u8;
            }
        }
        out
    }
}

impl FromStr for Kernel {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "soft" => Ok(Self::Soft),
            _ => Err(Wav2PngError::validation(format!(
                "invalid antialias kernel '{s}' (expected none, vertical, horizontal or soft)"
            ))),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Soft => "soft",
        })
    }
}

impl TryFrom<String> for Kernel {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Kernel> for String {
    fn from(k: Kernel) -> Self {
        k.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/kernel.rs"]
mod tests;
