use std::{collections::BTreeMap, fmt, io::Read, path::Path};

use crate::{
    audio::signal::AudioSignal,
    foundation::error::{DecodeError, Wav2PngResult},
};

/// Sub-format GUID of integer PCM carried in a `WAVE_FORMAT_EXTENSIBLE` header.
pub const KSDATAFORMAT_SUBTYPE_PCM: [u8; 16] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38, 0x9b, 0x71,
];

/// Sub-format GUID of IEEE float PCM carried in a `WAVE_FORMAT_EXTENSIBLE` header.
pub const KSDATAFORMAT_SUBTYPE_IEEE_FLOAT: [u8; 16] = [
    0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38, 0x9b, 0x71,
];

const FMT: &str = "fmt ";
const FACT: &str = "fact";
const DATA: &str = "data";

/// `fmt ` format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatTag {
    /// Integer PCM (`1`).
    Pcm,
    /// IEEE float PCM (`3`).
    Float,
    /// `WAVE_FORMAT_EXTENSIBLE` (`0xfffe`).
    Extensible,
}

impl FormatTag {
    fn from_u16(v: u16) -> Result<Self, DecodeError> {
        match v {
            0x0001 => Ok(Self::Pcm),
            0x0003 => Ok(Self::Float),
            0xfffe => Ok(Self::Extensible),
            other => Err(DecodeError::UnsupportedFormatTag(other)),
        }
    }
}

/// Sample encoding after resolving the extensible wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Little-endian signed integers.
    Integer,
    /// Little-endian IEEE-754 binary32.
    Float,
}

/// The 22-byte `WAVE_FORMAT_EXTENSIBLE` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extension {
    pub valid_bits_per_sample: u16,
    pub channel_mask: u32,
    pub sub_format: [u8; 16],
}

/// Parsed `fmt ` chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    pub tag: FormatTag,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub extension: Option<Extension>,
}

impl Format {
    /// Encoding of the samples in the `data` chunk.
    pub fn encoding(&self) -> Encoding {
        match (self.tag, &self.extension) {
            (FormatTag::Float, _) => Encoding::Float,
            (FormatTag::Extensible, Some(ext)) if ext.sub_format == KSDATAFORMAT_SUBTYPE_IEEE_FLOAT => {
                Encoding::Float
            }
            _ => Encoding::Integer,
        }
    }

    fn bytes_per_sample(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.encoding() {
            Encoding::Integer => "signed PCM",
            Encoding::Float => "floating point PCM",
        };
        write!(f, "{}-bit {kind}", self.bits_per_sample)?;
        if self.tag == FormatTag::Extensible {
            f.write_str(" (extensible)")?;
        }
        Ok(())
    }
}

/// Parsed `fact` chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fact {
    /// Number of sample frames per channel, as declared by the writer.
    pub sample_frames: u32,
}

/// A decoded WAV container.
#[derive(Clone, Debug)]
pub struct Wav {
    pub format: Format,
    pub fact: Option<Fact>,
    pub signal: AudioSignal,
}

impl Wav {
    pub fn into_signal(self) -> AudioSignal {
        self.signal
    }
}

/// Read and decode a WAV file from disk.
pub fn read_wav(path: impl AsRef<Path>) -> Wav2PngResult<Wav> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_wav_bytes(&bytes)
}

/// Decode a WAV container from any reader. The stream is read to the end first.
pub fn decode_wav(mut reader: impl Read) -> Wav2PngResult<Wav> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_wav_bytes(&bytes)
}

/// Decode an in-memory WAV container.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_wav_bytes(bytes: &[u8]) -> Wav2PngResult<Wav> {
    let chunks = read_chunks(bytes)?;

    let fmt_bytes = chunks.get(FMT).ok_or(DecodeError::MissingChunk(FMT))?;
    let format = parse_format(fmt_bytes)?;

    let fact = chunks.get(FACT).map(|b| parse_fact(b)).transpose()?;
    if fact.is_none() && format.encoding() == Encoding::Float {
        tracing::warn!("float WAV without 'fact' chunk");
    }

    let data = chunks.get(DATA).ok_or(DecodeError::MissingChunk(DATA))?;
    let channels = decode_samples(&format, data);
    let signal = AudioSignal::new(f64::from(format.sample_rate), channels)?;

    tracing::debug!(
        format = %format,
        channels = format.channels,
        sample_rate = format.sample_rate,
        frames = signal.frame_count(),
        "decoded wav"
    );

    Ok(Wav {
        format,
        fact,
        signal,
    })
}

fn read_chunks(bytes: &[u8]) -> Result<BTreeMap<String, &[u8]>, DecodeError> {
    if bytes.len() < 12 {
        return Err(DecodeError::TruncatedHeader {
            what: "RIFF header",
            expected: 12,
            actual: bytes.len(),
        });
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(DecodeError::BadRiffTag(tag_string(&bytes[0..4])));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(DecodeError::BadWaveTag(tag_string(&bytes[8..12])));
    }

    let mut chunks = BTreeMap::new();
    let mut pos = 12usize;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if rest.len() < 8 {
            return Err(DecodeError::TruncatedHeader {
                what: "chunk header",
                expected: 8,
                actual: rest.len(),
            });
        }

        let id = tag_string(&rest[0..4]);
        let size = u32_le(&rest[4..8]) as usize;
        let payload = &rest[8..];
        if payload.len() < size {
            return Err(DecodeError::TruncatedChunk {
                id,
                expected: size as u64,
                actual: payload.len() as u64,
            });
        }

        chunks.entry(id).or_insert(&payload[..size]);

        // Odd-sized chunks are followed by a pad byte.
        pos += 8 + size + (size & 1);
    }

    Ok(chunks)
}

fn parse_format(b: &[u8]) -> Result<Format, DecodeError> {
    if b.len() < 16 {
        return Err(DecodeError::MalformedChunk {
            id: FMT,
            reason: format!("expected at least 16 bytes, found {}", b.len()),
        });
    }

    let tag = FormatTag::from_u16(u16_le(&b[0..2]))?;
    let channels = u16_le(&b[2..4]);
    let sample_rate = u32_le(&b[4..8]);
    let byte_rate = u32_le(&b[8..12]);
    let block_align = u16_le(&b[12..14]);
    let bits_per_sample = u16_le(&b[14..16]);

    if channels == 0 {
        return Err(DecodeError::InvalidChannelCount(channels));
    }
    if sample_rate == 0 {
        return Err(DecodeError::InvalidSampleRate(sample_rate));
    }

    let extension = match tag {
        FormatTag::Extensible => Some(parse_extension(b, bits_per_sample)?),
        _ => None,
    };

    let format = Format {
        tag,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
        extension,
    };

    match format.encoding() {
        Encoding::Integer if !matches!(bits_per_sample, 16 | 24 | 32) => {
            Err(DecodeError::UnsupportedBitDepth {
                bits: bits_per_sample,
                encoding: "integer PCM",
            })
        }
        Encoding::Float if bits_per_sample != 32 => Err(DecodeError::UnsupportedBitDepth {
            bits: bits_per_sample,
            encoding: "IEEE float PCM",
        }),
        _ => Ok(format),
    }
}

fn parse_extension(b: &[u8], bits_per_sample: u16) -> Result<Extension, DecodeError> {
    if b.len() < 18 {
        return Err(DecodeError::MalformedChunk {
            id: FMT,
            reason: "extensible format without extension size".to_string(),
        });
    }
    let cb_size = u16_le(&b[16..18]);
    if cb_size != 22 {
        return Err(DecodeError::BadExtensionSize(cb_size));
    }
    if b.len() < 40 {
        return Err(DecodeError::MalformedChunk {
            id: FMT,
            reason: format!("expected 40 bytes for extensible format, found {}", b.len()),
        });
    }

    let valid_bits_per_sample = u16_le(&b[18..20]);
    let channel_mask = u32_le(&b[20..24]);
    let mut sub_format = [0u8; 16];
    sub_format.copy_from_slice(&b[24..40]);

    let valid_ok = if sub_format == KSDATAFORMAT_SUBTYPE_IEEE_FLOAT {
        valid_bits_per_sample == 32 && bits_per_sample == 32
    } else if sub_format == KSDATAFORMAT_SUBTYPE_PCM {
        valid_bits_per_sample == bits_per_sample
    } else {
        return Err(DecodeError::UnsupportedSubFormat(guid_string(&sub_format)));
    };
    if !valid_ok {
        return Err(DecodeError::UnsupportedValidBits {
            valid: valid_bits_per_sample,
            bits: bits_per_sample,
        });
    }

    Ok(Extension {
        valid_bits_per_sample,
        channel_mask,
        sub_format,
    })
}

fn parse_fact(b: &[u8]) -> Result<Fact, DecodeError> {
    if b.len() < 4 {
        return Err(DecodeError::MalformedChunk {
            id: FACT,
            reason: format!("expected at least 4 bytes, found {}", b.len()),
        });
    }
    Ok(Fact {
        sample_frames: u32_le(&b[0..4]),
    })
}

/// De-interleave and normalise the `data` payload. A trailing partial frame is dropped.
fn decode_samples(format: &Format, data: &[u8]) -> Vec<Vec<f32>> {
    let channels = usize::from(format.channels);
    let width = format.bytes_per_sample();
    let frame_bytes = width * channels;
    let frames = data.len() / frame_bytes;

    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in data.chunks_exact(frame_bytes) {
        for (ch, raw) in frame.chunks_exact(width).enumerate() {
            out[ch].push(normalise(format.encoding(), raw));
        }
    }
    out
}

// Integer samples map to (2v+1)/2^bits so that the quantisation bucket is centred.
fn normalise(encoding: Encoding, raw: &[u8]) -> f32 {
    match (encoding, raw.len()) {
        (Encoding::Float, _) => f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
        (Encoding::Integer, 2) => {
            let v = i16::from_le_bytes([raw[0], raw[1]]);
            ((2.0 * f64::from(v) + 1.0) / 65_536.0) as f32
        }
        (Encoding::Integer, 3) => {
            let v = i32::from_le_bytes([0, raw[0], raw[1], raw[2]]) >> 8;
            ((2.0 * f64::from(v) + 1.0) / 16_777_216.0) as f32
        }
        (Encoding::Integer, _) => {
            let v = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
            ((2.0 * f64::from(v) + 1.0) / 4_294_967_296.0) as f32
        }
    }
}

fn u16_le(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

fn u32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn tag_string(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

fn guid_string(g: &[u8; 16]) -> String {
    g.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/audio/wav.rs"]
mod tests;
