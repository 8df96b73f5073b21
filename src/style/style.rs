use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{Wav2PngError, Wav2PngResult},
    render::renderer::{Renderer, Strategy, inner_size},
    style::{fill::Fill, grid::GridSpec, kernel::Kernel, palette::PaletteSource},
};

/// Canvas width bounds, in pixels.
pub const WIDTH_RANGE: (u32, u32) = (32, 8192);
/// Canvas height bounds, in pixels.
pub const HEIGHT_RANGE: (u32, u32) = (32, 8192);
/// Padding bounds, in pixels.
pub const PADDING_RANGE: (i32, i32) = (-16, 32);
/// Vertical gain bounds.
pub const SCALE_RANGE: (f64, f64) = (0.2, 5.0);

/// Rendering style: canvas geometry plus every visual choice.
///
/// Deserialises from JSON with every field optional; missing fields take the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub width: u32,
    pub height: u32,
    pub padding: i32,
    /// Vertical gain.
    pub scale: f64,
    pub palette: PaletteSource,
    pub antialias: Kernel,
    pub fill: Fill,
    pub grid: GridSpec,
    pub renderer: Strategy,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 645,
            height: 395,
            padding: 2,
            scale: 1.0,
            palette: PaletteSource::default(),
            antialias: Kernel::Vertical,
            fill: Fill::default(),
            grid: GridSpec::default(),
            renderer: Strategy::Lines,
        }
    }
}

impl Style {
    pub fn from_json_str(s: &str) -> Wav2PngResult<Self> {
        serde_json::from_str(s).map_err(|e| Wav2PngError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Wav2PngResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| Wav2PngError::serde(format!("{}: {e}", path.display())))
    }

    pub fn to_json_pretty(&self) -> Wav2PngResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| Wav2PngError::serde(e.to_string()))
    }

    pub fn validate(&self) -> Wav2PngResult<()> {
        let in_range = |name: &str, v: f64, lo: f64, hi: f64| {
            if v.is_finite() && (lo..=hi).contains(&v) {
                Ok(())
            } else {
                Err(Wav2PngError::range(format!(
                    "{name} {v} out of range [{lo}, {hi}]"
                )))
            }
        };

        in_range(
            "width",
            f64::from(self.width),
            f64::from(WIDTH_RANGE.0),
            f64::from(WIDTH_RANGE.1),
        )?;
        in_range(
            "height",
            f64::from(self.height),
            f64::from(HEIGHT_RANGE.0),
            f64::from(HEIGHT_RANGE.1),
        )?;
        in_range(
            "padding",
            f64::from(self.padding),
            f64::from(PADDING_RANGE.0),
            f64::from(PADDING_RANGE.1),
        )?;
        in_range("scale", self.scale, SCALE_RANGE.0, SCALE_RANGE.1)?;

        inner_size(self.width, self.height, self.padding).map(|_| ())
    }

    /// Waveform renderer for this style. Loads the palette (falling back to the default).
    pub fn renderer(&self) -> Renderer {
        Renderer {
            strategy: self.renderer,
            palette: self.palette.load(),
            kernel: self.antialias,
            gain: self.scale,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/style.rs"]
mod tests;
