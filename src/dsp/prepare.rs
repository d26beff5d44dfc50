use log::debug;

use super::buffer::ComplexBuffer;
use crate::{Error, Result};

/// Scale between signed 16-bit PCM and the `[-1.0, 1.0)` real range.
pub const PCM_SCALE: f64 = 32768.0;

/// A decoded mono signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    pub const fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn from_pcm(pcm: &[i16], sample_rate: u32) -> Self {
        Self::new(pcm_to_real(pcm), sample_rate)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn channels(&self) -> u16 {
        1
    }
}

pub fn pcm_to_real(pcm: &[i16]) -> Vec<f64> {
    pcm.iter().map(|&s| f64::from(s) / PCM_SCALE).collect()
}

/// Length of the full linear convolution of two signals.
pub fn linear_len(dry_len: usize, ir_len: usize) -> Result<usize> {
    if dry_len == 0 || ir_len == 0 {
        return Err(Error::EmptyInput);
    }
    (dry_len - 1)
        .checked_add(ir_len)
        .ok_or(Error::Allocation { len: usize::MAX })
}

/// Smallest power of two that holds the linear convolution without wraparound.
pub fn transform_len(dry_len: usize, ir_len: usize) -> Result<usize> {
    let len = linear_len(dry_len, ir_len)?;
    len.checked_next_power_of_two()
        .ok_or(Error::Allocation { len })
}

/// Real samples zero-padded to `len`, for the planned real-input transform.
pub fn zero_padded_real(samples: &[f64], len: usize) -> Result<Vec<f64>> {
    debug_assert!(samples.len() <= len, "signal longer than transform");

    let mut padded = Vec::new();
    padded
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { len })?;
    padded.extend_from_slice(samples);
    padded.resize(len, 0.0);
    Ok(padded)
}

/// Dry and IR buffers ready for the forward transform.
#[derive(Debug)]
pub struct Prepared {
    pub dry: ComplexBuffer,
    pub ir: ComplexBuffer,
    /// Transform length N, a power of two.
    pub transform_len: usize,
    /// len(dry) + len(IR) - 1
    pub output_len: usize,
}

/// Builds equal-length zero-padded complex buffers for both signals.
///
/// The transform length is at least the linear-convolution length, so the
/// circular convolution computed in the frequency domain does not alias.
pub fn prepare(dry: &[f64], ir: &[f64]) -> Result<Prepared> {
    let output_len = linear_len(dry.len(), ir.len())?;
    let transform_len = transform_len(dry.len(), ir.len())?;

    debug!(
        "Preparing {} dry and {} IR samples, transform length {transform_len}",
        dry.len(),
        ir.len()
    );

    Ok(Prepared {
        dry: ComplexBuffer::from_real(dry, transform_len)?,
        ir: ComplexBuffer::from_real(ir, transform_len)?,
        transform_len,
        output_len,
    })
}
