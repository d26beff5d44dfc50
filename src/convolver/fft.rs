use log::debug;

use crate::dsp::prepare::{Prepared, prepare};
use crate::dsp::render::{Rendered, render};
use crate::dsp::spectrum::multiply;
use crate::dsp::transform::{Direction, transform};
use crate::{Error, Result};

/// Fast convolution through the radix-2 engine.
///
/// Both signals are zero-padded to the smallest power of two that holds the
/// full linear convolution, transformed, multiplied bin by bin, and brought
/// back with the inverse transform.
#[derive(Debug, Default)]
pub struct FftConvolver {
    ir: Vec<f64>,
}

impl FftConvolver {
    pub const fn new() -> Self {
        Self { ir: Vec::new() }
    }

    pub fn set_ir(&mut self, ir: &[f64]) -> Result<()> {
        if ir.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.ir = ir.to_vec();
        Ok(())
    }

    pub fn convolve(&self, dry: &[f64]) -> Result<Rendered> {
        let Prepared {
            dry: mut spectrum,
            ir: mut ir_spectrum,
            transform_len,
            output_len,
        } = prepare(dry, &self.ir)?;

        transform(&mut spectrum, Direction::Forward);
        transform(&mut ir_spectrum, Direction::Forward);

        multiply(&mut spectrum, &ir_spectrum);
        drop(ir_spectrum);

        debug!("Rendering {output_len} samples from a {transform_len}-point spectrum");
        Ok(render(spectrum, output_len))
    }

    pub fn ir_length(&self) -> usize {
        self.ir.len()
    }
}
