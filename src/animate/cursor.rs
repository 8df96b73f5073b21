use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::OnceLock,
    time::Duration,
};

use image::{Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Colour,
    error::{Wav2PngError, Wav2PngResult},
    math::erfinv,
};

const ERF_A: f64 = 0.9999;

/// How the cursor moves across the frame over the course of the audio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Motion {
    /// `x = t / duration`.
    #[default]
    Linear,
    /// Fixed at the centre.
    Centre,
    /// Fixed at the left edge.
    Left,
    /// Fixed at the right edge.
    Right,
    /// Steep ramps over the first and last fifth with a plateau at the centre.
    Ease,
    /// Sigmoid built from the inverse error function.
    Erf,
}

impl Motion {
    /// Cursor fraction in `[0, 1]` at time `t` of `total`.
    pub fn position(self, t: Duration, total: Duration) -> f64 {
        let s = if total.is_zero() {
            0.0
        } else {
            t.as_secs_f64() / total.as_secs_f64()
        };
        self.at(s)
    }

    /// Cursor fraction for normalised time `s`.
    pub fn at(self, s: f64) -> f64 {
        match self {
            Self::Linear => s,
            Self::Centre => 0.5,
            Self::Left => 0.0,
            Self::Right => 1.0,
            Self::Ease if s <= 0.2 => 2.5 * s,
            Self::Ease if s >= 0.8 => 2.5 * s - 1.5,
            Self::Ease => 0.5,
            Self::Erf => 0.5 * (erfinv(ERF_A * (2.0 * s - 1.0)) / erfinv(ERF_A) + 1.0),
        }
    }
}

impl FromStr for Motion {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "sweep" => Ok(Self::Linear),
            "centre" | "center" => Ok(Self::Centre),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "ease" => Ok(Self::Ease),
            "erf" => Ok(Self::Erf),
            _ => Err(Wav2PngError::validation(format!(
                "invalid cursor motion '{s}' (expected linear, sweep, centre, left, right, ease or erf)"
            ))),
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Centre => "centre",
            Self::Left => "left",
            Self::Right => "right",
            Self::Ease => "ease",
            Self::Erf => "erf",
        })
    }
}

/// Cursor glyph source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Glyph {
    /// No cursor is drawn.
    #[default]
    None,
    Green,
    Red,
    /// PNG image on disk.
    File(PathBuf),
}

impl Glyph {
    /// Load the glyph and stretch it to `height` rows. `None` draws nothing.
    pub fn render(&self, height: u32) -> Wav2PngResult<Option<RgbaImage>> {
        let img = match self {
            Self::None => return Ok(None),
            Self::Green => builtin_glyph(Rgba([0x00, 0xff, 0x00, 0xff])).clone(),
            Self::Red => builtin_glyph(Rgba([0xff, 0x00, 0x00, 0xff])).clone(),
            Self::File(path) => load_glyph(path)?,
        };
        Ok(Some(stretch(&img, height)))
    }
}

fn load_glyph(path: &Path) -> Wav2PngResult<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| Wav2PngError::validation(format!("cursor '{}': {e}", path.display())))?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(Wav2PngError::validation(format!(
            "cursor '{}' is empty",
            path.display()
        )));
    }
    Ok(img)
}

/// Cursor specification: glyph plus motion, encoded as `<glyph>:<motion>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor {
    pub glyph: Glyph,
    pub motion: Motion,
}

impl FromStr for Cursor {
    type Err = Wav2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // A trailing `:<motion>` is optional; any other colon belongs to the glyph path.
        let (source, motion) = match s.rsplit_once(':') {
            Some((source, motion)) => match motion.parse() {
                Ok(motion) => (source, motion),
                Err(_) if looks_like_path(s) => (s, Motion::default()),
                Err(e) => return Err(e),
            },
            None => (s, Motion::default()),
        };

        let glyph = match source.to_ascii_lowercase().as_str() {
            "" => return Err(Wav2PngError::validation("cursor source must not be empty")),
            "none" => Glyph::None,
            "green" => Glyph::Green,
            "red" => Glyph::Red,
            _ => Glyph::File(PathBuf::from(source)),
        };
        Ok(Self { glyph, motion })
    }
}

fn looks_like_path(s: &str) -> bool {
    s.contains(['/', '\\', '.'])
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.glyph {
            Glyph::None => f.write_str("none")?,
            Glyph::Green => f.write_str("green")?,
            Glyph::Red => f.write_str("red")?,
            Glyph::File(path) => write!(f, "{}", path.display())?,
        }
        write!(f, ":{}", self.motion)
    }
}

impl TryFrom<String> for Cursor {
    type Error = Wav2PngError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Cursor> for String {
    fn from(c: Cursor) -> Self {
        c.to_string()
    }
}

/// Audio window and cursor placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameWindow {
    /// Window start, relative to the start of the selection.
    pub start: Duration,
    /// Ideal cursor fraction from the motion function.
    pub x: f64,
    /// Correction applied when the window is pinned at either end of the timeline.
    pub shift: f64,
}

impl FrameWindow {
    /// Place a `window`-long view for time `t` of `total`.
    ///
    /// The window is positioned so the cursor sits at its ideal fraction; near either end it is
    /// clamped to the timeline and the cursor is shifted instead.
    pub fn at(t: Duration, total: Duration, window: Duration, motion: Motion) -> Self {
        let x = motion.position(t, total);
        let (t, total, w) = (t.as_secs_f64(), total.as_secs_f64(), window.as_secs_f64());
        if w <= 0.0 {
            return Self {
                start: Duration::ZERO,
                x,
                shift: 0.0,
            };
        }

        let mut p = t - x * w;
        let mut shift = 0.0;
        if p < 0.0 {
            shift = -p / w;
            p = 0.0;
        } else if p + w > total {
            shift = (total - (p + w)) / w;
            p = total - w;
        }

        Self {
            start: Duration::from_secs_f64(p.max(0.0)),
            x,
            shift,
        }
    }

    /// Horizontal pixel of the cursor glyph's left edge on a `width`-pixel canvas.
    pub fn cursor_x(&self, width: u32, glyph_width: u32) -> i64 {
        let centre = ((self.x + self.shift) * f64::from(width.saturating_sub(1))).round() as i64;
        centre - i64::from(glyph_width / 2)
    }
}

/// Stretch `glyph` vertically to `height` rows.
///
/// A single-row glyph is repeated. Taller glyphs keep their top and bottom rows and repeat the
/// middle row (odd heights) or the two middle rows (even heights) to fill the gap.
pub fn stretch(glyph: &RgbaImage, height: u32) -> RgbaImage {
    let (w, dh) = glyph.dimensions();
    let mut out = RgbaImage::new(w, height);
    if dh == 0 || height == 0 {
        return out;
    }
    if height <= dh && dh > 1 {
        imageops::replace(&mut out, glyph, 0, 0);
        return out;
    }

    let copy_row = |out: &mut RgbaImage, from: u32, to: u32| {
        for x in 0..w {
            out.put_pixel(x, to, *glyph.get_pixel(x, from));
        }
    };

    if dh == 1 {
        for y in 0..height {
            copy_row(&mut out, 0, y);
        }
        return out;
    }

    let half = dh / 2;
    let bottom = dh - half - 1;
    if dh % 2 == 1 {
        for y in 0..half {
            copy_row(&mut out, y, y);
        }
        for y in half..height - bottom {
            copy_row(&mut out, half, y);
        }
    } else {
        for y in 0..half - 1 {
            copy_row(&mut out, y, y);
        }
        for y in half - 1..height / 2 {
            copy_row(&mut out, half - 1, y);
        }
        for y in height / 2..height - bottom {
            copy_row(&mut out, half, y);
        }
    }
    for k in 0..bottom {
        copy_row(&mut out, half + 1 + k, height - bottom + k);
    }
    out
}

// 7x7 bracket: solid caps, a tapered neck and a one pixel stem with a faint halo.
fn builtin_glyph(colour: Colour) -> &'static RgbaImage {
    static GREEN: OnceLock<RgbaImage> = OnceLock::new();
    static RED: OnceLock<RgbaImage> = OnceLock::new();

    let cell = if colour.0[1] > colour.0[0] { &GREEN } else { &RED };
    cell.get_or_init(|| {
        let halo = Rgba([colour.0[0], colour.0[1], colour.0[2], 0x40]);
        RgbaImage::from_fn(7, 7, |x, y| {
            let d = y.min(6 - y);
            let reach = 3 - d;
            let dx = x.abs_diff(3);
            match d {
                3 if dx == 0 => colour,
                3 if dx == 1 => halo,
                3 => Rgba([0, 0, 0, 0]),
                _ if dx <= reach => colour,
                _ => Rgba([0, 0, 0, 0]),
            }
        })
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animate/cursor.rs"]
mod tests;
