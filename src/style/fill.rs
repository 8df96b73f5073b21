use std::{fmt, str::FromStr};

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Colour, format_colour, parse_colour},
    error::Wav2PngError,
};

/// Background fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Fill {
    Solid(Colour),
}

impl Default for Fill {
    fn default() -> Self {
        Self::Solid(Rgba([0x00, 0x00, 0x00, 0xff]))
    }
}

impl Fill {
    /// A `width x height` canvas filled with this background.
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        match self {
            Self::Solid(c) => RgbaImage::from_pixel(width, height, *c),
        }
    }
}

impl FromStr for Fill {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some((kind, colour)) if kind.eq_ignore_ascii_case("solid") => {
                Ok(Self::Solid(parse_colour(colour)?))
            }
            _ => Err(Wav2PngError::validation(format!(
                "invalid fill '{s}' (expected solid:#RRGGBBAA)"
            ))),
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(c) => write!(f, "solid:{}", format_colour(*c)),
        }
    }
}

impl TryFrom<String> for Fill {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Fill> for String {
    fn from(f: Fill) -> Self {
        f.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/fill.rs"]
mod tests;
