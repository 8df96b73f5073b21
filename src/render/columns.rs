use image::{
    RgbaImage,
    imageops::{self, FilterType},
};

use crate::{
    render::lines::{RowCounter, column_span},
    style::palette::Palette,
};

/// Bar waveform: `bar_width`-pixel bars separated by `bar_gap` transparent pixels.
///
/// Each bar is accumulated as a single pixel column and then widened with a Catmull-Rom
/// resample, so bar edges are smooth rather than replicated.
pub fn render_columns(
    samples: &[f32],
    width: u32,
    height: u32,
    bar_width: u32,
    bar_gap: u32,
    palette: &Palette,
    gain: f64,
) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    if width == 0 || height == 0 || bar_width == 0 || samples.is_empty() {
        return img;
    }

    let dx = bar_width.saturating_add(bar_gap);
    let counter = RowCounter::new(height, gain);
    let mut x = 0u32;
    while x < width {
        let (start, end) = column_span(x, dx, width, samples.len());
        if end > start {
            let n = end - start;
            let sum = counter.count(&samples[start..end]);

            let mut bar = RgbaImage::new(1, height);
            for (y, &count) in sum.iter().enumerate() {
                if count > 0 {
                    bar.put_pixel(0, y as u32, palette.for_count(count, n));
                }
            }

            let bar = imageops::resize(&bar, bar_width, height, FilterType::CatmullRom);
            imageops::overlay(&mut img, &bar, i64::from(x), 0);
        }
        x = x.saturating_add(dx);
    }
    img
}

#[cfg(test)]
#[path = "../../tests/unit/render/columns.rs"]
mod tests;
