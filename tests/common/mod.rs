#![allow(dead_code)]

use anyhow::Result;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::f64::consts::TAU;
use std::path::Path;

pub const SAMPLE_RATE: u32 = 44_100;

pub fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

pub fn write_pcm16(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<()> {
    let mut writer = WavWriter::create(path, pcm16_spec(sample_rate))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn read_pcm16(path: &Path) -> Result<(WavSpec, Vec<i16>)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok((spec, samples))
}

pub fn sine(freq: f64, amplitude: f64, len: usize, sample_rate: u32) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f64 / f64::from(sample_rate);
            (amplitude * (TAU * freq * t).sin() * f64::from(i16::MAX)) as i16
        })
        .collect()
}

/// Exponentially decaying noise-like tail, like a small room.
pub fn decaying_ir(len: usize, sample_rate: u32) -> Vec<i16> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = f64::from(state) / f64::from(u32::MAX) * 2.0 - 1.0;
            let t = i as f64 / f64::from(sample_rate);
            (noise * (-t * 30.0).exp() * 20_000.0) as i16
        })
        .collect()
}

/// Builds a mono 16-bit file by hand with `extra` bytes appended to the
/// `fmt ` chunk, a layout `hound` does not produce.
pub fn pcm16_with_fmt_extra(sample_rate: u32, samples: &[i16], extra: &[u8]) -> Vec<u8> {
    let fmt_len = 16 + extra.len();
    let data_len = samples.len() * 2;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&((4 + 8 + fmt_len + 8 + data_len) as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&(fmt_len as u32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(extra);
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data_len as u32).to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
