use image::{RgbaImage, imageops};

use crate::{
    audio::{
        mix::{Mix, mix},
        signal::{AudioSignal, Selection},
    },
    foundation::error::Wav2PngResult,
    layout::grid::GridLines,
    render::renderer::Renderer,
    style::{fill::Fill, grid::GridSpec, style::Style},
};

/// Layers background, grid and waveform into the final image.
#[derive(Clone, Debug)]
pub struct Compositor {
    pub width: u32,
    pub height: u32,
    pub padding: i32,
    pub fill: Fill,
    pub grid: GridSpec,
    pub renderer: Renderer,
}

impl Compositor {
    /// Build from a validated style. Loads the palette once.
    pub fn from_style(style: &Style) -> Wav2PngResult<Self> {
        style.validate()?;
        Ok(Self {
            width: style.width,
            height: style.height,
            padding: style.padding,
            fill: style.fill,
            grid: style.grid,
            renderer: style.renderer(),
        })
    }

    /// Render `samples` into a fresh `width x height` image.
    ///
    /// The grid sits behind the waveform unless the grid is marked as an overlay.
    pub fn render(&self, samples: &[f32]) -> Wav2PngResult<RgbaImage> {
        let waveform = self
            .renderer
            .render(samples, self.width, self.height, self.padding)?;
        Ok(self.composite(&waveform))
    }

    /// Mix `selection` of `signal` down to one channel and render it.
    ///
    /// The selection is checked before any mixing or drawing.
    #[tracing::instrument(skip(self, signal), fields(frames = signal.frame_count()))]
    pub fn render_signal(
        &self,
        signal: &AudioSignal,
        channels: Mix,
        selection: Selection,
    ) -> Wav2PngResult<RgbaImage> {
        let range = selection.frames(signal)?;
        let samples = mix(signal, channels)?;
        tracing::debug!(start = range.start, end = range.end, "rendering selection");
        self.render(&samples[range])
    }

    /// Composite a pre-rendered full-canvas waveform layer.
    pub fn composite(&self, waveform: &RgbaImage) -> RgbaImage {
        let mut img = self.fill.render(self.width, self.height);
        let grid = GridLines::layout(&self.grid, self.width, self.height, self.padding).draw(
            &self.grid,
            self.width,
            self.height,
        );

        let (back, front) = if self.grid.overlay() {
            (waveform, &grid)
        } else {
            (&grid, waveform)
        };
        imageops::overlay(&mut img, back, 0, 0);
        imageops::overlay(&mut img, front, 0, 0);
        img
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
