pub mod direct;
pub mod fft;
pub mod planned;

pub use direct::DirectConvolver;
pub use fft::FftConvolver;
pub use planned::PlannedConvolver;

use crate::Result;
use crate::dsp::Rendered;
use crate::settings::Strategy;

/// Convolver implementation selector
#[allow(clippy::large_enum_variant)]
pub enum Convolver {
    Fft(FftConvolver),
    Direct(DirectConvolver),
    Planned(PlannedConvolver),
}

impl Convolver {
    /// Builds the convolver for `strategy` and loads `ir` into it.
    ///
    /// `Auto` picks the direct convolver for IRs of at most `direct_max_ir_len`
    /// samples and the radix-2 FFT convolver otherwise.
    pub fn for_ir(strategy: Strategy, ir: &[f64], direct_max_ir_len: usize) -> Result<Self> {
        let mut convolver = match strategy.resolve(ir.len(), direct_max_ir_len) {
            Strategy::Direct => Self::Direct(DirectConvolver::new()),
            Strategy::Planned => Self::Planned(PlannedConvolver::new()),
            Strategy::Fft | Strategy::Auto => Self::Fft(FftConvolver::new()),
        };
        convolver.set_ir(ir)?;
        Ok(convolver)
    }

    pub fn set_ir(&mut self, ir: &[f64]) -> Result<()> {
        match self {
            Self::Fft(c) => c.set_ir(ir),
            Self::Direct(c) => c.set_ir(ir),
            Self::Planned(c) => c.set_ir(ir),
        }
    }

    /// Convolves `dry` with the loaded IR and peak-normalizes the result.
    pub fn convolve(&mut self, dry: &[f64]) -> Result<Rendered> {
        match self {
            Self::Fft(c) => c.convolve(dry),
            Self::Direct(c) => c.convolve(dry),
            Self::Planned(c) => c.convolve(dry),
        }
    }

    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Fft(_) => Strategy::Fft,
            Self::Direct(_) => Strategy::Direct,
            Self::Planned(_) => Strategy::Planned,
        }
    }

    pub fn ir_length(&self) -> usize {
        match self {
            Self::Fft(c) => c.ir_length(),
            Self::Direct(c) => c.ir_length(),
            Self::Planned(c) => c.ir_length(),
        }
    }
}
