use crate::dsp::prepare::{linear_len, zero_padded_real};
use crate::dsp::render::{Rendered, finish};
use crate::{Error, Result};

/// Simple time-domain convolver.
///
/// Best for short IRs (a few dozen samples), and the reference the FFT
/// strategies are checked against. O(dry_len * ir_len) complexity.
#[derive(Debug, Default)]
pub struct DirectConvolver {
    /// IR coefficients (stored in original order)
    coefficients: Vec<f64>,
}

impl DirectConvolver {
    pub const fn new() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn set_ir(&mut self, ir: &[f64]) -> Result<()> {
        if ir.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.coefficients = ir.to_vec();
        Ok(())
    }

    pub fn convolve(&self, dry: &[f64]) -> Result<Rendered> {
        Ok(finish(convolve_direct(dry, &self.coefficients)?))
    }

    /// Returns the current IR length
    pub fn ir_length(&self) -> usize {
        self.coefficients.len()
    }
}

/// Full linear convolution by accumulation: `out[n + m] += dry[n] * ir[m]`.
///
/// No padding and no normalization. The output is reserved fallibly, like
/// the transform buffers.
pub fn convolve_direct(dry: &[f64], ir: &[f64]) -> Result<Vec<f64>> {
    let mut output = zero_padded_real(&[], linear_len(dry.len(), ir.len())?)?;

    for (n, &x) in dry.iter().enumerate() {
        for (out, &h) in output[n..].iter_mut().zip(ir) {
            *out += x * h;
        }
    }

    Ok(output)
}
