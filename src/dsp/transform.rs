//! In-place radix-2 Cooley–Tukey FFT over a [`ComplexBuffer`].
//!
//! Both directions are unnormalized: a forward transform followed by an
//! inverse transform scales every entry by N, and callers divide by N
//! themselves. The buffer length must be a power of two; this is not checked.

use std::f64::consts::TAU;

use super::buffer::{ComplexBuffer, OneBased};

/// Transform direction.
///
/// `Forward` uses the negative exponent `e^(-2πi·kn/N)`, matching `rustfft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    const fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Inverse => 1.0,
        }
    }
}

/// Transforms `buffer` in place.
pub fn transform(buffer: &mut ComplexBuffer, direction: Direction) {
    let len = buffer.len();
    let mut data = buffer.one_based();

    bit_reverse(&mut data, len);
    butterflies(&mut data, len, direction.sign());
}

/// Reorders entries by bit-reversed index so the butterflies can run in place.
///
/// Indices are one-based positions in the interleaved data: entry `k` starts
/// at `2k + 1`.
fn bit_reverse(data: &mut OneBased<'_>, len: usize) {
    let n = len << 1;
    let mut j = 1;

    for i in (1..n).step_by(2) {
        if j > i {
            data.swap(j, i);
            data.swap(j + 1, i + 1);
        }

        let mut m = len;
        while m >= 2 && j > m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}

fn butterflies(data: &mut OneBased<'_>, len: usize, sign: f64) {
    let n = len << 1;
    // `mmax` is twice the half-size of the current stage, in interleaved slots,
    // which is the stage size in complex entries.
    let mut mmax = 2;

    while n > mmax {
        let istep = mmax << 1;
        let theta = sign * (TAU / mmax as f64);

        // Twiddle recurrence: w <- w + w * (wpr + i*wpi), with wpr = cos(theta) - 1
        // computed as -2 sin^2(theta/2) to keep precision for small angles.
        let half_sin = (0.5 * theta).sin();
        let wpr = -2.0 * half_sin * half_sin;
        let wpi = theta.sin();
        let mut wr = 1.0;
        let mut wi = 0.0;

        for m in (1..mmax).step_by(2) {
            for i in (m..=n).step_by(istep) {
                let j = i + mmax;
                let tempr = wr * data[j] - wi * data[j + 1];
                let tempi = wr * data[j + 1] + wi * data[j];

                data[j] = data[i] - tempr;
                data[j + 1] = data[i + 1] - tempi;
                data[i] += tempr;
                data[i + 1] += tempi;
            }

            let prev_wr = wr;
            wr = wr * wpr - wi * wpi + wr;
            wi = wi * wpr + prev_wr * wpi + wi;
        }

        mmax = istep;
    }
}
