use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::OnceLock,
};

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Colour, TRANSPARENT},
    error::{Wav2PngError, Wav2PngResult},
};

/// Name of the palette used when none is given or a palette file cannot be read.
pub const DEFAULT_PALETTE: &str = "ice";

/// Ordered colour buckets indexed by signal intensity.
///
/// Index 0 is "no signal", the last index is "peak".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    pub fn new(colours: Vec<Colour>) -> Wav2PngResult<Self> {
        if colours.len() < 2 {
            return Err(Wav2PngError::validation(format!(
                "palette needs at least 2 colours, got {}",
                colours.len()
            )));
        }
        Ok(Self { colours })
    }

    /// Read column 0 of `img` top to bottom.
    pub fn from_image(img: &RgbaImage) -> Wav2PngResult<Self> {
        Self::new((0..img.height()).map(|y| *img.get_pixel(0, y)).collect())
    }

    /// Load a palette from a reference PNG.
    pub fn from_file(path: &Path) -> Wav2PngResult<Self> {
        let img = image::open(path)?.to_rgba8();
        if img.width() == 0 {
            return Err(Wav2PngError::validation(format!(
                "palette image '{}' is empty",
                path.display()
            )));
        }
        Self::from_image(&img)
    }

    /// Look up a built-in palette by name.
    pub fn builtin(name: &str) -> Option<&'static Palette> {
        builtins().get(name)
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        builtins().keys().copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Colour for a row crossed `count` times out of `total` samples in a column.
    ///
    /// Index is `ceil((len-1) * count / total)`, saturating at the last entry.
    pub fn for_count(&self, count: u32, total: usize) -> Colour {
        if count == 0 || total == 0 {
            return self.colours[0];
        }
        let top = (self.colours.len() - 1) as u64;
        let idx = (top * u64::from(count)).div_ceil(total as u64).min(top);
        self.colours[idx as usize]
    }
}

/// Where a palette comes from: a built-in name or a PNG path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaletteSource {
    Builtin(String),
    File(PathBuf),
}

impl Default for PaletteSource {
    fn default() -> Self {
        Self::Builtin(DEFAULT_PALETTE.to_string())
    }
}

impl PaletteSource {
    /// Resolve to a palette. An unreadable file falls back to the default palette.
    pub fn load(&self) -> Palette {
        match self {
            Self::Builtin(name) => Palette::builtin(name)
                .or_else(|| Palette::builtin(DEFAULT_PALETTE))
                .cloned()
                .unwrap_or_else(fallback_mono),
            Self::File(path) => match Palette::from_file(path) {
                Ok(p) => p,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "unable to load palette, using '{DEFAULT_PALETTE}'"
                    );
                    Self::default().load()
                }
            },
        }
    }
}

impl From<String> for PaletteSource {
    fn from(s: String) -> Self {
        if builtins().contains_key(s.as_str()) {
            Self::Builtin(s)
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl FromStr for PaletteSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_string()))
    }
}

impl fmt::Display for PaletteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(name) => f.write_str(name),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<PaletteSource> for String {
    fn from(p: PaletteSource) -> Self {
        p.to_string()
    }
}

fn fallback_mono() -> Palette {
    Palette {
        colours: vec![TRANSPARENT, Rgba([0x80, 0x80, 0xff, 0xff])],
    }
}

fn builtins() -> &'static BTreeMap<&'static str, Palette> {
    static BUILTINS: OnceLock<BTreeMap<&'static str, Palette>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        let gradients: [(&str, &[[u8; 4]]); 8] = [
            (
                "ice",
                &[[0x00, 0x30, 0x60, 0x60], [0x40, 0xa0, 0xe0, 0xc0], [0xe0, 0xf8, 0xff, 0xff]],
            ),
            (
                "fire",
                &[[0x60, 0x00, 0x00, 0x60], [0xe0, 0x50, 0x00, 0xc0], [0xff, 0xf0, 0x40, 0xff]],
            ),
            (
                "aurora",
                &[[0x00, 0x60, 0x30, 0x60], [0x20, 0xd0, 0xc0, 0xc0], [0xc0, 0x80, 0xff, 0xff]],
            ),
            (
                "horizon",
                &[[0x10, 0x20, 0x60, 0x60], [0xff, 0x80, 0x30, 0xc0], [0xff, 0x60, 0xa0, 0xff]],
            ),
            ("amber", &[[0x40, 0x20, 0x00, 0x60], [0xff, 0xbf, 0x00, 0xff]]),
            ("blue", &[[0x00, 0x20, 0x60, 0x60], [0x40, 0x80, 0xff, 0xff]]),
            ("green", &[[0x00, 0x40, 0x00, 0x60], [0x00, 0xff, 0x40, 0xff]]),
            ("gold", &[[0x60, 0x40, 0x00, 0x60], [0xff, 0xd7, 0x00, 0xff]]),
        ];

        let mut out: BTreeMap<&'static str, Palette> = gradients
            .into_iter()
            .map(|(name, stops)| (name, gradient(stops, 256)))
            .collect();
        out.insert("mono", fallback_mono());
        out
    })
}

// Entry 0 is transparent; entries 1..n interpolate linearly through `stops`.
fn gradient(stops: &[[u8; 4]], n: usize) -> Palette {
    let mut colours = Vec::with_capacity(n);
    colours.push(TRANSPARENT);

    let segments = (stops.len() - 1) as f64;
    for i in 1..n {
        let t = (i - 1) as f64 / (n - 2) as f64 * segments;
        let seg = (t.floor() as usize).min(stops.len() - 2);
        let f = t - seg as f64;
        let (a, b) = (stops[seg], stops[seg + 1]);
        let mut c = [0u8; 4];
        for k in 0..4 {
            c[k] = (f64::from(a[k]) + (f64::from(b[k]) - f64::from(a[k])) * f).round() as u8;
        }
        colours.push(Rgba(c));
    }
    Palette { colours }
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
