use log::debug;
use realfft::RealFftPlanner;

use crate::dsp::prepare::{linear_len, transform_len, zero_padded_real};
use crate::dsp::render::{Rendered, finish};
use crate::{Error, Result};

/// Fast convolution through planned real-input FFTs.
///
/// Uses the same padding policy, 1/N rescale and peak normalization as
/// [`FftConvolver`](super::FftConvolver), with `realfft` doing the transforms.
/// Plans are cached by the planner across calls.
pub struct PlannedConvolver {
    planner: RealFftPlanner<f64>,
    ir: Vec<f64>,
}

impl Default for PlannedConvolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannedConvolver {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::<f64>::new(),
            ir: Vec::new(),
        }
    }

    pub fn set_ir(&mut self, ir: &[f64]) -> Result<()> {
        if ir.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.ir = ir.to_vec();
        Ok(())
    }

    pub fn convolve(&mut self, dry: &[f64]) -> Result<Rendered> {
        let output_len = linear_len(dry.len(), self.ir.len())?;
        let len = transform_len(dry.len(), self.ir.len())?;

        let r2c = self.planner.plan_fft_forward(len);
        let c2r = self.planner.plan_fft_inverse(len);

        let mut dry_time = zero_padded_real(dry, len)?;
        let mut ir_time = zero_padded_real(&self.ir, len)?;
        let mut dry_freq = r2c.make_output_vec();
        let mut ir_freq = r2c.make_output_vec();

        r2c.process(&mut dry_time, &mut dry_freq)
            .map_err(|e| Error::Fft(format!("forward transform of dry signal: {e}")))?;
        r2c.process(&mut ir_time, &mut ir_freq)
            .map_err(|e| Error::Fft(format!("forward transform of IR: {e}")))?;
        drop(ir_time);

        for (x, h) in dry_freq.iter_mut().zip(&ir_freq) {
            *x *= *h;
        }

        // Ensure DC and Nyquist are real
        dry_freq[0].im = 0.0;
        if len % 2 == 0
            && let Some(last) = dry_freq.last_mut()
        {
            last.im = 0.0;
        }

        c2r.process(&mut dry_freq, &mut dry_time)
            .map_err(|e| Error::Fft(format!("inverse transform: {e}")))?;

        debug!("Planned convolution: {output_len} samples from a {len}-point transform");

        let scale = 1.0 / len as f64;
        dry_time.truncate(output_len);
        for sample in &mut dry_time {
            *sample *= scale;
        }

        let mut rendered = finish(dry_time);
        rendered.transform_len = Some(len);
        Ok(rendered)
    }

    pub fn ir_length(&self) -> usize {
        self.ir.len()
    }
}
