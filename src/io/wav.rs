//! RIFF/WAVE codec for 16-bit mono PCM.
//!
//! The `fmt ` chunk is kept byte-for-byte, including any bytes past the
//! 16-byte PCM body, so an output file can reuse the dry file's header.

use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::{Error, Result};

const RIFF: [u8; 4] = *b"RIFF";
const WAVE: [u8; 4] = *b"WAVE";
const FMT: [u8; 4] = *b"fmt ";
const DATA: [u8; 4] = *b"data";

const PCM_FORMAT: u16 = 1;
const PCM_FMT_LEN: usize = 16;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: usize = 2;

/// Contents of the `fmt ` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Bytes past the 16-byte PCM body, copied through verbatim.
    pub fmt_extra: Vec<u8>,
}

impl WavHeader {
    pub fn pcm16_mono(sample_rate: u32) -> Self {
        Self {
            audio_format: PCM_FORMAT,
            channels: 1,
            sample_rate,
            byte_rate: sample_rate * BYTES_PER_SAMPLE as u32,
            block_align: BYTES_PER_SAMPLE as u16,
            bits_per_sample: BITS_PER_SAMPLE,
            fmt_extra: Vec::new(),
        }
    }

    /// Declared size of the `fmt ` chunk.
    pub fn fmt_len(&self) -> usize {
        PCM_FMT_LEN + self.fmt_extra.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFile {
    pub header: WavHeader,
    pub samples: Vec<i16>,
}

pub fn decode(path: &Path) -> Result<WavFile> {
    let bytes = fs::read(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let file = parse(path, &bytes)?;

    let header = &file.header;
    debug!("{}:", path.display());
    debug!("  audio format: {}", header.audio_format);
    debug!("  number of channels: {}", header.channels);
    debug!("  sample rate: {}", header.sample_rate);
    debug!("  bits per sample: {}", header.bits_per_sample);
    debug!("  size of fmt chunk: {}", header.fmt_len());
    debug!("  number of samples: {}", file.samples.len());

    Ok(file)
}

/// Writes `samples` after a copy of `header`.
///
/// The file is assembled in memory and written to a temporary file next to
/// `path`, which then replaces `path`. On failure the temporary file is
/// removed and whatever was at `path` is left alone.
pub fn encode(path: &Path, header: &WavHeader, samples: &[i16]) -> Result<()> {
    let bytes = to_bytes(header, samples).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: format!("{} samples do not fit in a RIFF file", samples.len()),
    })?;

    let open_failed = |source: std::io::Error| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(open_failed)?;
    file.write_all(&bytes).map_err(open_failed)?;
    file.persist(path).map_err(|e| open_failed(e.error))?;

    debug!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Directory that will hold `path`; `.` for a bare file name.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Serializes a complete WAV file. `None` if the sizes overflow RIFF's u32 fields.
pub fn to_bytes(header: &WavHeader, samples: &[i16]) -> Option<Vec<u8>> {
    let fmt_len = header.fmt_len();
    let fmt_pad = fmt_len & 1;
    let data_len = samples.len().checked_mul(BYTES_PER_SAMPLE)?;
    let riff_len = 4 + 8 + fmt_len + fmt_pad + 8 + data_len;

    let riff_len_field = u32::try_from(riff_len).ok()?;
    let fmt_len_field = u32::try_from(fmt_len).ok()?;
    let data_len_field = u32::try_from(data_len).ok()?;

    let mut bytes = Vec::with_capacity(riff_len + 8);
    bytes.extend_from_slice(&RIFF);
    bytes.extend_from_slice(&riff_len_field.to_le_bytes());
    bytes.extend_from_slice(&WAVE);

    bytes.extend_from_slice(&FMT);
    bytes.extend_from_slice(&fmt_len_field.to_le_bytes());
    bytes.extend_from_slice(&header.audio_format.to_le_bytes());
    bytes.extend_from_slice(&header.channels.to_le_bytes());
    bytes.extend_from_slice(&header.sample_rate.to_le_bytes());
    bytes.extend_from_slice(&header.byte_rate.to_le_bytes());
    bytes.extend_from_slice(&header.block_align.to_le_bytes());
    bytes.extend_from_slice(&header.bits_per_sample.to_le_bytes());
    bytes.extend_from_slice(&header.fmt_extra);
    bytes.resize(bytes.len() + fmt_pad, 0);

    bytes.extend_from_slice(&DATA);
    bytes.extend_from_slice(&data_len_field.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    Some(bytes)
}

/// Parses an in-memory WAV file. `path` is only used for error reporting.
pub fn parse(path: &Path, bytes: &[u8]) -> Result<WavFile> {
    let malformed = |reason: String| Error::MalformedHeader {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = ByteReader::new(bytes);

    if reader.tag() != Some(RIFF) {
        return Err(malformed("missing RIFF tag".to_string()));
    }
    let riff_len = reader
        .u32()
        .ok_or_else(|| malformed("truncated RIFF size".to_string()))?;
    if u64::from(riff_len) + 8 > bytes.len() as u64 {
        return Err(malformed(format!(
            "RIFF size {riff_len} exceeds file length {}",
            bytes.len()
        )));
    }
    if reader.tag() != Some(WAVE) {
        return Err(malformed("missing WAVE tag".to_string()));
    }

    let mut header = None;

    loop {
        let Some(id) = reader.tag() else {
            return Err(malformed("no data chunk".to_string()));
        };
        let len = reader
            .u32()
            .ok_or_else(|| malformed("truncated chunk size".to_string()))? as usize;
        let remaining = reader.remaining();
        let body = reader.take(len).ok_or_else(|| {
            malformed(format!(
                "'{}' chunk size {len} exceeds the {remaining} bytes left in the file",
                String::from_utf8_lossy(&id)
            ))
        })?;

        match id {
            FMT => header = Some(parse_fmt(path, body)?),
            DATA => {
                let header =
                    header.ok_or_else(|| malformed("data chunk before fmt chunk".to_string()))?;
                if len % usize::from(header.block_align) != 0 {
                    return Err(malformed(format!(
                        "data size {len} is not a multiple of block align {}",
                        header.block_align
                    )));
                }

                let samples = body
                    .chunks_exact(BYTES_PER_SAMPLE)
                    .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                return Ok(WavFile { header, samples });
            }
            _ => debug!(
                "Skipping '{}' chunk ({len} bytes)",
                String::from_utf8_lossy(&id)
            ),
        }

        // Chunks are word-aligned
        if len % 2 == 1 {
            reader.take(1);
        }
    }
}

fn parse_fmt(path: &Path, body: &[u8]) -> Result<WavHeader> {
    if body.len() < PCM_FMT_LEN {
        return Err(Error::MalformedHeader {
            path: path.to_path_buf(),
            reason: format!(
                "fmt chunk is {} bytes, expected at least {PCM_FMT_LEN}",
                body.len()
            ),
        });
    }

    let mut fields = ByteReader::new(body);
    let header = WavHeader {
        audio_format: fields.u16().unwrap_or_default(),
        channels: fields.u16().unwrap_or_default(),
        sample_rate: fields.u32().unwrap_or_default(),
        byte_rate: fields.u32().unwrap_or_default(),
        block_align: fields.u16().unwrap_or_default(),
        bits_per_sample: fields.u16().unwrap_or_default(),
        fmt_extra: body[PCM_FMT_LEN..].to_vec(),
    };

    let unsupported = |reason: String| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        reason,
    };

    if header.audio_format != PCM_FORMAT {
        return Err(unsupported(format!(
            "audio format {} (only PCM is supported)",
            header.audio_format
        )));
    }
    if header.bits_per_sample != BITS_PER_SAMPLE {
        return Err(unsupported(format!(
            "{} bits per sample (only 16-bit is supported)",
            header.bits_per_sample
        )));
    }
    if header.channels != 1 {
        return Err(unsupported(format!(
            "{} channels (only mono is supported)",
            header.channels
        )));
    }
    if usize::from(header.block_align) != BYTES_PER_SAMPLE {
        return Err(Error::MalformedHeader {
            path: path.to_path_buf(),
            reason: format!(
                "block align {} does not match 16-bit mono",
                header.block_align
            ),
        });
    }

    Ok(header)
}

/// Little-endian cursor over a byte slice. Every read is `None` past the end.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn tag(&mut self) -> Option<[u8; 4]> {
        self.take(4)?.try_into().ok()
    }

    fn u16(&mut self) -> Option<u16> {
        Some(u16::from_le_bytes(self.take(2)?.try_into().ok()?))
    }

    fn u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }
}
