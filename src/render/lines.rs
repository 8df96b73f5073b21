use image::RgbaImage;

use crate::{
    render::scale::{centre_row, row_of},
    style::palette::Palette,
};

/// Per-row crossing counts for one column of samples.
///
/// Every sample draws a run from the centre row toward its own row, the destination excluded,
/// so a held level stays visible and a zero sample draws nothing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RowCounter {
    height: u32,
    gain: f64,
    centre: usize,
}

impl RowCounter {
    pub(crate) fn new(height: u32, gain: f64) -> Self {
        Self {
            height,
            gain,
            centre: centre_row(height),
        }
    }

    pub(crate) fn count(&self, samples: &[f32]) -> Vec<u32> {
        let mut sum = vec![0u32; self.height as usize];
        for &sample in samples {
            let row = row_of(sample, self.gain, self.height);
            let mut y = self.centre;
            while y != row {
                sum[y] += 1;
                if row > y {
                    y += 1;
                } else {
                    y -= 1;
                }
            }
        }
        sum
    }
}

/// Sample index range covered by output column `x` of `width`.
pub(crate) fn column_span(x: u32, dx: u32, width: u32, len: usize) -> (usize, usize) {
    let at = |px: u32| ((f64::from(px) * len as f64 / f64::from(width)).round() as usize).min(len);
    (at(x), at(x.saturating_add(dx).min(width)))
}

/// Continuous-line waveform, one pixel column per span of samples.
///
/// A row's colour is picked by how many of the column's samples passed through it.
pub fn render_lines(
    samples: &[f32],
    width: u32,
    height: u32,
    palette: &Palette,
    gain: f64,
) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    if width == 0 || height == 0 || samples.is_empty() {
        return img;
    }

    let counter = RowCounter::new(height, gain);
    for x in 0..width {
        let (start, end) = column_span(x, 1, width, samples.len());
        if end <= start {
            continue;
        }
        let n = end - start;
        let sum = counter.count(&samples[start..end]);
        for (y, &count) in sum.iter().enumerate() {
            if count > 0 {
                img.put_pixel(x, y as u32, palette.for_count(count, n));
            }
        }
    }
    img
}

#[cfg(test)]
#[path = "../../tests/unit/render/lines.rs"]
mod tests;
