use std::{fmt, str::FromStr};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Colour, format_colour, parse_colour},
    error::{Wav2PngError, Wav2PngResult},
};

/// Smallest accepted grid cell size, in pixels.
pub const MIN_CELL: u32 = 16;
/// Largest accepted grid cell size, in pixels.
pub const MAX_CELL: u32 = 1024;

/// How a requested cell size is reconciled with the canvas span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fit {
    /// Whole number of cells closest to the requested size.
    #[default]
    Approximate,
    /// Exactly the requested size; the last cell may be partial.
    Exact,
    /// At least the requested size.
    AtLeast,
    /// At most the requested size.
    AtMost,
    /// Strictly larger than the requested size.
    LargerThan,
    /// Strictly smaller than the requested size.
    SmallerThan,
}

impl Fit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Approximate => "~",
            Self::Exact => "=",
            Self::AtLeast => "≥",
            Self::AtMost => "≤",
            Self::LargerThan => ">",
            Self::SmallerThan => "<",
        }
    }

    /// Reconcile an evenly dividing `step` with the requested `size`.
    pub fn apply(self, step: f64, size: u32) -> f64 {
        let size = f64::from(size);
        match self {
            Self::Approximate => step,
            Self::Exact => size,
            Self::AtLeast => step.max(size),
            Self::AtMost => step.min(size),
            Self::LargerThan => step.max(size + 1.0),
            Self::SmallerThan => step.min(size - 1.0),
        }
    }

    // Split a leading fit symbol off `s`. No symbol means approximate.
    fn split(s: &str) -> (Self, &str) {
        const PREFIXES: [(&str, Fit); 8] = [
            (">=", Fit::AtLeast),
            ("<=", Fit::AtMost),
            ("~", Fit::Approximate),
            ("=", Fit::Exact),
            ("≥", Fit::AtLeast),
            ("≤", Fit::AtMost),
            (">", Fit::LargerThan),
            ("<", Fit::SmallerThan),
        ];
        PREFIXES
            .iter()
            .find_map(|(p, fit)| s.strip_prefix(p).map(|rest| (*fit, rest)))
            .unwrap_or((Self::Approximate, s))
    }
}

/// Grid drawn behind (or over) the waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GridSpec {
    None,
    Square {
        colour: Colour,
        size: u32,
        fit: Fit,
        overlay: bool,
    },
    Rectangular {
        colour: Colour,
        width: u32,
        height: u32,
        fit: Fit,
        overlay: bool,
    },
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::Square {
            colour: Rgba([0x00, 0x80, 0x00, 0xff]),
            size: 64,
            fit: Fit::Approximate,
            overlay: false,
        }
    }
}

impl GridSpec {
    /// Whether the grid is drawn over the waveform rather than behind it.
    pub fn overlay(&self) -> bool {
        match self {
            Self::None => false,
            Self::Square { overlay, .. } | Self::Rectangular { overlay, .. } => *overlay,
        }
    }

    /// Requested `(cell width, cell height)` and fit, if any.
    pub fn cell(&self) -> Option<(u32, u32, Fit)> {
        match *self {
            Self::None => None,
            Self::Square { size, fit, .. } => Some((size, size, fit)),
            Self::Rectangular {
                width, height, fit, ..
            } => Some((width, height, fit)),
        }
    }

    pub fn colour(&self) -> Option<Colour> {
        match self {
            Self::None => None,
            Self::Square { colour, .. } | Self::Rectangular { colour, .. } => Some(*colour),
        }
    }
}

fn parse_cell(s: &str, grid: &str) -> Wav2PngResult<u32> {
    let v: u32 = s.trim().parse().map_err(|_| {
        Wav2PngError::validation(format!("invalid grid cell size '{s}' in '{grid}'"))
    })?;
    if !(MIN_CELL..=MAX_CELL).contains(&v) {
        return Err(Wav2PngError::validation(format!(
            "grid cell size {v} out of range [{MIN_CELL}, {MAX_CELL}]"
        )));
    }
    Ok(v)
}

impl FromStr for GridSpec {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        let invalid = || {
            Wav2PngError::validation(format!(
                "invalid grid '{s}' (expected none, square:#RRGGBBAA:~64[:overlay] or rectangular:#RRGGBBAA:~64x48[:overlay])"
            ))
        };

        let kind = parts[0].to_ascii_lowercase();
        if kind == "none" && parts.len() == 1 {
            return Ok(Self::None);
        }
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }

        let colour = parse_colour(parts[1])?;
        let overlay = match parts.get(3) {
            None => false,
            Some(p) if p.eq_ignore_ascii_case("overlay") => true,
            Some(_) => return Err(invalid()),
        };
        let (fit, size) = Fit::split(parts[2].trim());

        match kind.as_str() {
            "square" => Ok(Self::Square {
                colour,
                size: parse_cell(size, s)?,
                fit,
                overlay,
            }),
            "rectangular" => {
                let (w, h) = size
                    .split_once(['x', 'X'])
                    .ok_or_else(invalid)?;
                Ok(Self::Rectangular {
                    colour,
                    width: parse_cell(w, s)?,
                    height: parse_cell(h, s)?,
                    fit,
                    overlay,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::None => return f.write_str("none"),
            Self::Square {
                colour, size, fit, ..
            } => write!(f, "square:{}:{}{size}", format_colour(colour), fit.symbol())?,
            Self::Rectangular {
                colour,
                width,
                height,
                fit,
                ..
            } => write!(
                f,
                "rectangular:{}:{}{width}x{height}",
                format_colour(colour),
                fit.symbol()
            )?,
        }
        if self.overlay() {
            f.write_str(":overlay")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for GridSpec {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GridSpec> for String {
    fn from(g: GridSpec) -> Self {
        g.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/grid.rs"]
mod tests;
