use std::{fmt, str::FromStr};

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{Wav2PngError, Wav2PngResult},
    render::{columns::render_columns, lines::render_lines},
    style::{kernel::Kernel, palette::Palette},
};

/// Waveform drawing strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Continuous line, one pixel column per span of samples.
    #[default]
    Lines,
    /// Discrete bars.
    Columns { bar_width: u32, bar_gap: u32 },
}

impl FromStr for Strategy {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || {
            Wav2PngError::validation(format!(
                "invalid renderer '{s}' (expected lines or columns:<bar width>:<bar gap>)"
            ))
        };

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [kind] if kind.eq_ignore_ascii_case("lines") => Ok(Self::Lines),
            [kind, w, gap] if kind.eq_ignore_ascii_case("columns") => {
                let bar_width: u32 = w.trim().parse().map_err(|_| invalid())?;
                let bar_gap: u32 = gap.trim().parse().map_err(|_| invalid())?;
                if bar_width == 0 {
                    return Err(Wav2PngError::validation("column bar width must be > 0"));
                }
                Ok(Self::Columns { bar_width, bar_gap })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines => f.write_str("lines"),
            Self::Columns { bar_width, bar_gap } => write!(f, "columns:{bar_width}:{bar_gap}"),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Strategy> for String {
    fn from(s: Strategy) -> Self {
        s.to_string()
    }
}

/// Waveform area of a `width x height` canvas inset by `padding` on every side.
///
/// Non-positive padding leaves the full canvas size.
pub fn inner_size(width: u32, height: u32, padding: i32) -> Wav2PngResult<(u32, u32)> {
    if padding <= 0 {
        return Ok((width, height));
    }
    let inset = 2 * padding.unsigned_abs();
    match (width.checked_sub(inset), height.checked_sub(inset)) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(Wav2PngError::range(format!(
            "padding {padding} leaves no room on a {width}x{height} canvas"
        ))),
    }
}

/// Everything needed to turn samples into a waveform layer.
#[derive(Clone, Debug)]
pub struct Renderer {
    pub strategy: Strategy,
    pub palette: Palette,
    pub kernel: Kernel,
    /// Vertical gain applied before fixed-point quantisation.
    pub gain: f64,
}

impl Renderer {
    /// Draw `samples` into a `width x height` image and antialias it.
    pub fn render_waveform(&self, samples: &[f32], width: u32, height: u32) -> RgbaImage {
        let raw = match self.strategy {
            Strategy::Lines => render_lines(samples, width, height, &self.palette, self.gain),
            Strategy::Columns { bar_width, bar_gap } => render_columns(
                samples,
                width,
                height,
                bar_width,
                bar_gap,
                &self.palette,
                self.gain,
            ),
        };
        self.kernel.apply(&raw)
    }

    /// Full-canvas waveform layer: the waveform is drawn into the padded rectangle and
    /// everything outside it is transparent. Negative padding shifts the waveform up and left,
    /// clipping it at the canvas edge.
    pub fn render(
        &self,
        samples: &[f32],
        width: u32,
        height: u32,
        padding: i32,
    ) -> Wav2PngResult<RgbaImage> {
        let (w, h) = inner_size(width, height, padding)?;
        let waveform = self.render_waveform(samples, w, h);

        let mut layer = RgbaImage::new(width, height);
        imageops::replace(&mut layer, &waveform, i64::from(padding), i64::from(padding));
        Ok(layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
