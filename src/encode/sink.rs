use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::foundation::error::{Wav2PngError, Wav2PngResult};

/// Configuration provided to a [`FrameSink`] at the start of a frame sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: f64,
    /// Number of frames that will be pushed.
    pub frames: u64,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing frame order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> Wav2PngResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &RgbaImage) -> Wav2PngResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> Wav2PngResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, RgbaImage)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Frames in push order.
    pub fn frames(&self) -> &[(u64, RgbaImage)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> Wav2PngResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &RgbaImage) -> Wav2PngResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> Wav2PngResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes each frame as `<dir>/frame-NNNNN.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Path of frame `idx`.
    pub fn frame_path(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame-{idx:05}.png"))
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> Wav2PngResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        tracing::debug!(dir = %self.dir.display(), frames = cfg.frames, "writing png sequence");
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &RgbaImage) -> Wav2PngResult<()> {
        write_png(self.frame_path(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> Wav2PngResult<()> {
        Ok(())
    }
}

/// Writes a single frame to one PNG file.
#[derive(Debug)]
pub struct PngFileSink {
    path: PathBuf,
    written: bool,
}

impl PngFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for PngFileSink {
    fn begin(&mut self, cfg: SinkConfig) -> Wav2PngResult<()> {
        if cfg.frames != 1 {
            return Err(Wav2PngError::validation(format!(
                "png file sink takes exactly one frame, got {}",
                cfg.frames
            )));
        }
        self.written = false;
        Ok(())
    }

    fn push_frame(&mut self, _idx: u64, frame: &RgbaImage) -> Wav2PngResult<()> {
        if self.written {
            return Err(Wav2PngError::validation(
                "png file sink already holds a frame",
            ));
        }
        write_png(&self.path, frame)?;
        self.written = true;
        Ok(())
    }

    fn end(&mut self) -> Wav2PngResult<()> {
        if !self.written {
            return Err(Wav2PngError::validation("png file sink received no frame"));
        }
        Ok(())
    }
}

/// Write `img` as a PNG, creating parent directories as needed.
pub fn write_png(path: impl AsRef<Path>, img: &RgbaImage) -> Wav2PngResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Encode `img` as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Wav2PngResult<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Wav2PngResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| {
                Wav2PngError::Io(std::io::Error::new(
                    e.kind(),
                    format!("creating {}: {e}", parent.display()),
                ))
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
