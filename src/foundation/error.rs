/// Convenience result type used across wav2png.
pub type Wav2PngResult<T> = Result<T, Wav2PngError>;

/// Container-level decode failures.
///
/// Decoding is all-or-nothing: any of these aborts the decode and no partial signal is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The outer chunk id is not `RIFF`.
    #[error("invalid RIFF header chunk id '{0}'")]
    BadRiffTag(String),

    /// The outer form type is not `WAVE`.
    #[error("invalid RIFF form type '{0}' (expected 'WAVE')")]
    BadWaveTag(String),

    /// The stream ended inside the 12-byte outer header or a sub-chunk header.
    #[error("truncated {what}: expected {expected} bytes, found {actual}")]
    TruncatedHeader {
        /// Which header was being read.
        what: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// A sub-chunk declared more payload than the stream holds.
    #[error("truncated '{id}' chunk: declared {expected} bytes, found {actual}")]
    TruncatedChunk {
        /// Chunk id.
        id: String,
        /// Declared payload length.
        expected: u64,
        /// Bytes actually available.
        actual: u64,
    },

    /// A mandatory chunk (`fmt ` or `data`) is absent.
    #[error("missing mandatory '{0}' chunk")]
    MissingChunk(&'static str),

    /// A chunk is present but its payload is too short or inconsistent.
    #[error("malformed '{id}' chunk: {reason}")]
    MalformedChunk {
        /// Chunk id.
        id: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The `fmt ` format tag is not integer PCM, IEEE float or extensible.
    #[error("unsupported format tag {0:#06x} (expected 1 (PCM), 3 (IEEE float) or 0xfffe (extensible))")]
    UnsupportedFormatTag(u16),

    /// The bit depth is not supported for the resolved encoding.
    #[error("unsupported bits per sample {bits} for {encoding}")]
    UnsupportedBitDepth {
        /// Declared bits per sample.
        bits: u16,
        /// Encoding the depth was checked against.
        encoding: &'static str,
    },

    /// The extensible `fmt ` extension is not the 22-byte block.
    #[error("invalid extension size {0} (expected 22)")]
    BadExtensionSize(u16),

    /// Extensible valid-bits field does not match the container bit depth.
    #[error("unsupported valid bits per sample {valid} (bits per sample {bits})")]
    UnsupportedValidBits {
        /// Valid bits per sample from the extension.
        valid: u16,
        /// Container bits per sample.
        bits: u16,
    },

    /// Extensible sub-format GUID is neither PCM nor IEEE float.
    #[error("unsupported extensible sub-format {0}")]
    UnsupportedSubFormat(String),

    /// Channel count of zero.
    #[error("invalid channel count {0}")]
    InvalidChannelCount(u16),

    /// Sample rate of zero.
    #[error("invalid sample rate {0}")]
    InvalidSampleRate(u32),
}

/// Top-level error taxonomy used by wav2png APIs.
#[derive(thiserror::Error, Debug)]
pub enum Wav2PngError {
    /// The audio container could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A requested time selection or pixel dimension is outside valid bounds.
    #[error("range error: {0}")]
    Range(String),

    /// Internal render invariant was violated (e.g. a selection ending before it starts).
    #[error("render error: {0}")]
    Render(String),

    /// Invalid user-provided configuration or text encoding.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing style files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// IO failure at the boundary (reading audio, writing images).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding/encoding failure at the boundary.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Wav2PngError {
    /// Build a [`Wav2PngError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`Wav2PngError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`Wav2PngError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`Wav2PngError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
