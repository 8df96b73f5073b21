use std::time::Duration;

use image::Rgba;

use crate::foundation::error::{Wav2PngError, Wav2PngResult};

/// Straight (non-premultiplied) RGBA8 colour.
pub type Colour = Rgba<u8>;

/// Fully transparent colour, the "no signal" value.
pub const TRANSPARENT: Colour = Rgba([0, 0, 0, 0]);

/// Parse `#RRGGBBAA` (or `#RRGGBB`, alpha defaults to opaque).
pub fn parse_colour(s: &str) -> Wav2PngResult<Colour> {
    let hex = s
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| Wav2PngError::validation(format!("colour '{s}' must start with '#'")))?;
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err(Wav2PngError::validation(format!(
            "colour '{s}' must be #RRGGBB or #RRGGBBAA"
        )));
    }

    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| Wav2PngError::validation(format!("colour '{s}' is not valid hex")))
    };

    let a = if hex.len() == 8 { byte(6)? } else { 0xff };
    Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, a]))
}

/// Format a colour as lowercase `#rrggbbaa`.
pub fn format_colour(c: Colour) -> String {
    let [r, g, b, a] = c.0;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

/// Parse a duration such as `1h2m3.5s`, `250ms`, `90s` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Wav2PngResult<Duration> {
    let s = s.trim();
    let invalid = || Wav2PngError::validation(format!("invalid duration '{s}'"));

    if s.is_empty() {
        return Err(invalid());
    }
    if let Ok(secs) = s.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|_| invalid());
    }

    let mut total = 0.0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if num_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..num_len].parse().map_err(|_| invalid())?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 1e-3,
            "us" | "µs" => 1e-6,
            "ns" => 1e-9,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];
        total += value * scale;
    }

    Duration::try_from_secs_f64(total).map_err(|_| invalid())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
