//! Fixed-point vertical mapping shared by the waveform renderers.
//!
//! Samples are first quantised to the signed 16-bit domain and only then mapped to pixel rows,
//! so the int16 value (with its truncation and wrap-around) is the unit of vertical position.

const RANGE_MIN: i64 = -32_768;
const RANGE: i64 = 65_536;

/// Quantise a sample to the int16 domain: `32768 * sample * gain`, truncated toward zero.
///
/// Values past the int16 range wrap rather than clamp, so a large gain folds peaks over.
pub fn to_fixed(sample: f32, gain: f64) -> i16 {
    (32_768.0 * f64::from(sample) * gain) as i64 as i16
}

/// Map an int16 value to a pixel row in `[0, |height|)`.
///
/// For `height > 0`, `-32768` maps to row 0 and `32767` to `height - 1`. A negative height flips
/// the mapping so that positive values land near row 0, i.e. plot upwards.
pub fn vscale(v: i16, height: i32) -> i32 {
    let h = i64::from(height);
    // i64 division truncates toward zero, matching the fixed-point reference.
    let row = h * (i64::from(v) - RANGE_MIN) / RANGE;
    if height < 0 {
        (row - (h + 1)) as i32
    } else {
        row as i32
    }
}

/// Row of a sample on a canvas `height` pixels tall, positive samples upward.
pub fn row_of(sample: f32, gain: f64, height: u32) -> usize {
    vscale(to_fixed(sample, gain), -(height as i32)) as usize
}

/// Row of a zero sample on a canvas `height` pixels tall.
pub fn centre_row(height: u32) -> usize {
    vscale(0, -(height as i32)) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/render/scale.rs"]
mod tests;
