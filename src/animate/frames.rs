use std::time::Duration;

use image::{RgbaImage, imageops};
use rayon::prelude::*;

use crate::{
    animate::cursor::{Cursor, FrameWindow, Motion},
    audio::{
        mix::{Mix, mix},
        signal::{AudioSignal, Selection},
    },
    compose::compositor::Compositor,
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{Wav2PngError, Wav2PngResult},
};

/// Frame timing for an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// Frames per second.
    pub fps: f64,
    /// Audio shown in a single frame.
    pub window: Duration,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            fps: 30.0,
            window: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// Renders the frames of a cursor animation over a mixed-down selection of audio.
///
/// Every frame depends only on its own index, so frames may be rendered in any order.
#[derive(Debug)]
pub struct FrameRenderer {
    samples: Vec<f32>,
    sample_rate: f64,
    from: Duration,
    duration: Duration,
    timeline: Timeline,
    motion: Motion,
    glyph: Option<RgbaImage>,
    compositor: Compositor,
}

impl FrameRenderer {
    /// Set up an animation of `selection` of `signal`, mixed down to one channel.
    ///
    /// The window must fit inside the selected audio and the frame rate must be positive.
    pub fn new(
        signal: &AudioSignal,
        channels: Mix,
        selection: Selection,
        timeline: Timeline,
        cursor: &Cursor,
        compositor: Compositor,
    ) -> Wav2PngResult<Self> {
        if !(timeline.fps.is_finite() && timeline.fps > 0.0) {
            return Err(Wav2PngError::validation(format!(
                "frame rate {} must be > 0",
                timeline.fps
            )));
        }
        if timeline.window.is_zero() {
            return Err(Wav2PngError::validation("frame window must be > 0"));
        }

        let (from, to) = selection.resolve(signal.duration())?;
        let duration = to - from;
        if timeline.window > duration {
            return Err(Wav2PngError::range(format!(
                "window {:?} is longer than the selected audio {:?}",
                timeline.window, duration
            )));
        }

        let samples = mix(signal, channels)?;
        let glyph = cursor.glyph.render(compositor.height)?;

        Ok(Self {
            samples,
            sample_rate: signal.sample_rate(),
            from,
            duration,
            timeline,
            motion: cursor.motion,
            glyph,
            compositor,
        })
    }

    /// Index of the last frame; frames run `0..=last_frame()`.
    pub fn last_frame(&self) -> u64 {
        (self.duration.as_secs_f64() * self.timeline.fps).floor() as u64
    }

    /// Number of frames rendered by [`FrameRenderer::render_all`].
    pub fn frame_count(&self) -> u64 {
        self.last_frame() + 1
    }

    /// Time of frame `idx`, relative to the start of the selection.
    pub fn frame_time(&self, idx: u64) -> Duration {
        let last = self.last_frame();
        if last == 0 {
            return Duration::ZERO;
        }
        let s = idx.min(last) as f64 / last as f64;
        Duration::from_secs_f64(s * self.duration.as_secs_f64())
    }

    /// Window and cursor placement of frame `idx`.
    pub fn window(&self, idx: u64) -> FrameWindow {
        FrameWindow::at(
            self.frame_time(idx),
            self.duration,
            self.timeline.window,
            self.motion,
        )
    }

    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.compositor.width,
            height: self.compositor.height,
            fps: self.timeline.fps,
            frames: self.frame_count(),
        }
    }

    fn index_at(&self, t: Duration) -> usize {
        ((t.as_secs_f64() * self.sample_rate).floor() as usize).min(self.samples.len())
    }

    /// Render frame `idx`.
    pub fn render_frame(&self, idx: u64) -> Wav2PngResult<RgbaImage> {
        let w = self.window(idx);
        let start = self.from + w.start;
        let end = start + self.timeline.window;
        let (a, b) = (self.index_at(start), self.index_at(end));
        if b < a {
            return Err(Wav2PngError::render(format!(
                "frame {idx}: window ends at sample {b} before it starts at sample {a}"
            )));
        }
        tracing::trace!(frame = idx, ?start, ?end, shift = w.shift, "frame window");

        let mut img = self.compositor.render(&self.samples[a..b])?;
        if let Some(glyph) = &self.glyph {
            let x = w.cursor_x(self.compositor.width, glyph.width());
            imageops::overlay(&mut img, glyph, x, 0);
        }
        Ok(img)
    }

    /// Render every frame and push it to `sink` in frame order.
    #[tracing::instrument(skip_all, fields(frames = self.frame_count()))]
    pub fn render_all(
        &self,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
    ) -> Wav2PngResult<RenderStats> {
        let total = self.frame_count();
        sink.begin(self.sink_config())?;
        let mut stats = RenderStats {
            frames_total: total,
            frames_rendered: 0,
        };

        if !threading.parallel {
            for idx in 0..total {
                let frame = self.render_frame(idx)?;
                sink.push_frame(idx, &frame)?;
                stats.frames_rendered += 1;
            }
            sink.end()?;
            return Ok(stats);
        }

        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = 0;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);
            let indices: Vec<u64> = (chunk_start..chunk_end).collect();
            let rendered = pool.install(|| {
                indices
                    .par_iter()
                    .map(|&idx| self.render_frame(idx))
                    .collect::<Vec<_>>()
            });
            for (idx, frame) in indices.into_iter().zip(rendered) {
                sink.push_frame(idx, &frame?)?;
                stats.frames_rendered += 1;
            }
            tracing::debug!(chunk_start, chunk_end, "rendered chunk");
            chunk_start = chunk_end;
        }

        sink.end()?;
        Ok(stats)
    }
}

fn build_thread_pool(threads: Option<usize>) -> Wav2PngResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(Wav2PngError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| Wav2PngError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/frames.rs"]
mod tests;
