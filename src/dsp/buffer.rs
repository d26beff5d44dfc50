use rustfft::num_complex::Complex;
use std::ops::{Index, IndexMut};

use crate::{Error, Result};

/// Complex samples stored interleaved as `[re0, im0, re1, im1, ...]`.
///
/// The length (in complex entries) is always a power of two, and every entry
/// past the prepared signal is exactly `0.0`. Indexing through [`get`] and
/// [`set`] is zero-based and bounds-checked.
///
/// [`get`]: ComplexBuffer::get
/// [`set`]: ComplexBuffer::set
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexBuffer {
    data: Vec<f64>,
}

impl ComplexBuffer {
    /// Allocates `len` complex entries, all zero.
    pub fn zeroed(len: usize) -> Result<Self> {
        let mut data = reserve(len)?;
        data.resize(len * 2, 0.0);
        Ok(Self { data })
    }

    /// Copies real `samples` into the real slots and zero-pads to `len` entries.
    pub fn from_real(samples: &[f64], len: usize) -> Result<Self> {
        debug_assert!(samples.len() <= len, "signal longer than transform");

        let mut data = reserve(len)?;
        for &sample in samples {
            data.push(sample);
            data.push(0.0);
        }

        let mut buffer = Self { data };
        buffer.pad_zeros_to(len);
        Ok(buffer)
    }

    pub fn from_complex(values: &[Complex<f64>]) -> Result<Self> {
        let mut data = reserve(values.len())?;
        for value in values {
            data.push(value.re);
            data.push(value.im);
        }
        Ok(Self { data })
    }

    /// Extends the buffer with zeroed entries (real and imaginary) up to `len`.
    pub fn pad_zeros_to(&mut self, len: usize) {
        let target = len * 2;
        if target > self.data.len() {
            self.data.resize(target, 0.0);
        }
    }

    /// Number of complex entries.
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Complex<f64> {
        Complex::new(self.data[2 * index], self.data[2 * index + 1])
    }

    pub fn set(&mut self, index: usize, value: Complex<f64>) {
        self.data[2 * index] = value.re;
        self.data[2 * index + 1] = value.im;
    }

    pub fn as_interleaved(&self) -> &[f64] {
        &self.data
    }

    pub fn as_interleaved_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Complex<f64>> + '_ {
        self.data
            .chunks_exact(2)
            .map(|pair| Complex::new(pair[0], pair[1]))
    }

    pub fn real_parts(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().step_by(2).copied()
    }

    /// Multiplies every real and imaginary part by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    pub(crate) fn one_based(&mut self) -> OneBased<'_> {
        OneBased {
            data: &mut self.data,
        }
    }
}

fn reserve(len: usize) -> Result<Vec<f64>> {
    let slots = len.checked_mul(2).ok_or(Error::Allocation { len })?;
    let mut data = Vec::new();
    data.try_reserve_exact(slots)
        .map_err(|_| Error::Allocation { len })?;
    Ok(data)
}

/// One-based view of an interleaved buffer, as used by the radix-2 engine.
///
/// `view[1]` is the real part of the first entry and `view[2]` its imaginary
/// part, so entry `k` (zero-based) lives at `2k + 1` and `2k + 2`.
pub(crate) struct OneBased<'a> {
    data: &'a mut [f64],
}

impl OneBased<'_> {
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a - 1, b - 1);
    }
}

impl Index<usize> for OneBased<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index - 1]
    }
}

impl IndexMut<usize> for OneBased<'_> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index - 1]
    }
}
