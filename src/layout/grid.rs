use image::RgbaImage;

use crate::style::grid::{Fit, GridSpec};

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// Resolved grid geometry for one canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridLines {
    /// Outline inset by the padding; absent when padding is not positive.
    pub border: Option<Rect>,
    /// X coordinates of vertical lines, left to right.
    pub vertical: Vec<u32>,
    /// Y coordinates of horizontal lines: the upper fan from the midline upward, then the lower
    /// fan from the midline downward.
    pub horizontal: Vec<u32>,
}

impl GridLines {
    /// Lay out `spec` on a `width x height` canvas inset by `padding`.
    pub fn layout(spec: &GridSpec, width: u32, height: u32, padding: i32) -> Self {
        let Some((cell_w, cell_h, fit)) = spec.cell() else {
            return Self::default();
        };
        if width == 0 || height == 0 {
            return Self::default();
        }

        let inset = padding.max(0) as u32;
        let border = (padding > 0 && width > 2 * inset && height > 2 * inset).then(|| Rect {
            x0: inset,
            y0: inset,
            x1: width - 1 - inset,
            y1: height - 1 - inset,
        });
        let extent = border.unwrap_or(Rect {
            x0: 0,
            y0: 0,
            x1: width - 1,
            y1: height - 1,
        });

        Self {
            border,
            vertical: vertical_lines(extent, cell_w, fit),
            horizontal: horizontal_lines(extent, cell_h, fit, inset),
        }
    }

    /// Draw the grid into a transparent layer. Pixels are written, not blended.
    pub fn draw(&self, spec: &GridSpec, width: u32, height: u32) -> RgbaImage {
        let mut layer = RgbaImage::new(width, height);
        let Some(colour) = spec.colour() else {
            return layer;
        };
        if width == 0 || height == 0 {
            return layer;
        }

        let extent = self.border.unwrap_or(Rect {
            x0: 0,
            y0: 0,
            x1: width - 1,
            y1: height - 1,
        });

        let hline = |y: u32, layer: &mut RgbaImage| {
            if y < height {
                for x in extent.x0..=extent.x1.min(width - 1) {
                    layer.put_pixel(x, y, colour);
                }
            }
        };
        for &y in &self.horizontal {
            hline(y, &mut layer);
        }
        if let Some(b) = self.border {
            hline(b.y0, &mut layer);
            hline(b.y1, &mut layer);
        }

        let vline = |x: u32, layer: &mut RgbaImage| {
            if x < width {
                for y in extent.y0..=extent.y1.min(height - 1) {
                    layer.put_pixel(x, y, colour);
                }
            }
        };
        for &x in &self.vertical {
            vline(x, &mut layer);
        }
        if let Some(b) = self.border {
            vline(b.x0, &mut layer);
            vline(b.x1, &mut layer);
        }

        layer
    }
}

// Spacing for `span` pixels and a requested cell `size`: the whole number of cells closest to
// the request divides the span evenly, then the fit policy adjusts it.
fn step(span: u32, size: u32, fit: Fit) -> Option<f64> {
    let cells = (f64::from(span) / f64::from(size)).round();
    let step = fit.apply(f64::from(span) / cells, size);
    (step.is_finite() && step > 0.0).then_some(step)
}

fn vertical_lines(extent: Rect, size: u32, fit: Fit) -> Vec<u32> {
    let Some(dx) = step(extent.x1 - extent.x0, size, fit) else {
        return Vec::new();
    };

    let (x0, x1) = (f64::from(extent.x0), f64::from(extent.x1));
    (1u32..)
        .map(|k| (x0 + f64::from(k) * dx).round())
        .take_while(|&x| x < x1)
        .map(|x| x as u32)
        .collect()
}

// The midline is taken from the padded span, so it sits at the canvas centre rather than the
// border centre; the two fans are mirror images only when that span is even.
fn horizontal_lines(extent: Rect, size: u32, fit: Fit, inset: u32) -> Vec<u32> {
    let Some(dy) = step(extent.y1 - extent.y0, size, fit) else {
        return Vec::new();
    };

    let (y0, y1) = (f64::from(extent.y0), f64::from(extent.y1));
    let ym = f64::from(extent.y1 - extent.y0 + 2 * inset) / 2.0;

    let upper = (0u32..)
        .map(|k| (ym.floor() - f64::from(k) * dy).round())
        .take_while(|&y| y > y0);
    let lower = (0u32..)
        .map(|k| (ym.ceil() + f64::from(k) * dy).round())
        .take_while(|&y| y < y1);

    upper.chain(lower).map(|y| y as u32).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
