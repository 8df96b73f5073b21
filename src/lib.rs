//! wav2png renders WAV audio as waveform images.
//!
//! The pipeline is a chain of pure stages:
//!
//! - Decode a RIFF/WAVE container into an [`AudioSignal`]
//! - Mix it down to one channel and select a time range
//! - Rasterize the samples with a [`Strategy`], antialias with a [`Kernel`]
//! - Composite the waveform over a [`Fill`] and a [`GridSpec`] grid with a [`Compositor`]
//! - Write the image, or stream a cursor animation into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animate;
pub(crate) mod audio;
pub(crate) mod compose;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod style;

pub use crate::foundation::core::{
    Colour, TRANSPARENT, format_colour, parse_colour, parse_duration,
};
pub use crate::foundation::error::{DecodeError, Wav2PngError, Wav2PngResult};
pub use crate::foundation::math::{erf, erfinv};

pub use crate::audio::mix::{Mix, mix};
pub use crate::audio::signal::{AudioSignal, Selection};
pub use crate::audio::wav::{
    Encoding, Extension, Fact, Format, FormatTag, Wav, decode_wav, decode_wav_bytes, read_wav,
};

pub use crate::style::fill::Fill;
pub use crate::style::grid::{Fit, GridSpec};
pub use crate::style::kernel::Kernel;
pub use crate::style::palette::{DEFAULT_PALETTE, Palette, PaletteSource};
pub use crate::style::style::Style;

pub use crate::render::columns::render_columns;
pub use crate::render::lines::render_lines;
pub use crate::render::renderer::{Renderer, Strategy, inner_size};
pub use crate::render::scale::{to_fixed, vscale};

pub use crate::layout::grid::{GridLines, Rect};

pub use crate::compose::compositor::Compositor;

pub use crate::animate::cursor::{Cursor, FrameWindow, Glyph, Motion};
pub use crate::animate::frames::{FrameRenderer, RenderStats, RenderThreading, Timeline};

pub use crate::encode::sink::{
    FrameSink, InMemorySink, PngFileSink, PngSequenceSink, SinkConfig, encode_png, write_png,
};
