#![allow(dead_code)]

use hound::{WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_RATE: u32 = 48000;

/// Writes (once) a synthetic dry tone and room IR to a temp dir.
pub fn create_test_files(dry_length: usize, ir_length: usize) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join("irverb_bench");
    fs::create_dir_all(&dir).unwrap();

    let dry_path = dir.join(format!("dry_{dry_length}.wav"));
    if !dry_path.exists() {
        write_wav(&dry_path, &synthetic_dry(dry_length));
    }

    let ir_path = dir.join(format!("ir_{ir_length}.wav"));
    if !ir_path.exists() {
        write_wav(&ir_path, &synthetic_ir(ir_length));
    }

    (dry_path, ir_path)
}

pub fn synthetic_dry(length: usize) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let t = i as f64 / f64::from(SAMPLE_RATE);
            let freq = 220.0 * std::f64::consts::TAU;
            0.6 * (freq * t).sin() + 0.2 * (3.0 * freq * t).sin()
        })
        .collect()
}

pub fn synthetic_ir(length: usize) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let t = i as f64 / f64::from(SAMPLE_RATE);
            let decay = (-t * 3.0).exp();
            let freq = 440.0 * std::f64::consts::TAU;
            (freq * t).sin() * decay
        })
        .collect()
}

fn write_wav(path: &Path, samples: &[f64]) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer
            .write_sample((sample * f64::from(i16::MAX)) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}
