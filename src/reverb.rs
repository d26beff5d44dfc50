use log::{debug, info, warn};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::convolver::Convolver;
use crate::dsp::render::to_pcm;
use crate::dsp::resample::resample;
use crate::dsp::{Rendered, Signal};
use crate::io::wav::{self, WavHeader};
use crate::settings::{Settings, Strategy};
use crate::{Error, Result};

/// Summary of one rendered file.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub strategy: Strategy,
    pub sample_rate: u32,
    pub dry_samples: usize,
    pub ir_samples: usize,
    pub output_samples: usize,
    pub transform_len: Option<usize>,
    /// Peak magnitude of the convolution before normalization.
    pub peak: f64,
}

pub struct Reverb {
    settings: Settings,
}

impl Reverb {
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convolves `dry` with `ir` and returns the peak-normalized result.
    ///
    /// If the sample rates differ and resampling is enabled, the IR is
    /// brought to the dry rate first.
    pub fn process(&self, dry: &Signal, ir: &Signal) -> Result<(Rendered, Strategy)> {
        let ir_samples = self.match_sample_rate(dry, ir)?;

        let mut convolver = Convolver::for_ir(
            self.settings.strategy,
            &ir_samples,
            self.settings.direct_max_ir_len,
        )?;
        debug!(
            "Convolving {} dry samples with a {}-sample IR using {}",
            dry.len(),
            convolver.ir_length(),
            convolver.strategy()
        );

        let rendered = convolver.convolve(dry.samples())?;
        Ok((rendered, convolver.strategy()))
    }

    /// Renders `dry_path` through `ir_path` into `output_path`.
    ///
    /// Both inputs are decoded and validated, and the output location is
    /// checked, before any transform work starts. The output header is the
    /// dry file's header. Nothing is written unless rendering succeeds.
    pub fn render_file(
        &self,
        dry_path: &Path,
        ir_path: &Path,
        output_path: &Path,
    ) -> Result<RenderReport> {
        let (header, dry) = load_signal(dry_path)?;
        let (_, ir) = load_signal(ir_path)?;
        check_writable(output_path)?;

        let (rendered, strategy) = self.process(&dry, &ir)?;
        let pcm = to_pcm(&rendered.samples);
        wav::encode(output_path, &header, &pcm)?;

        let report = RenderReport {
            strategy,
            sample_rate: dry.sample_rate(),
            dry_samples: dry.len(),
            ir_samples: ir.len(),
            output_samples: pcm.len(),
            transform_len: rendered.transform_len,
            peak: rendered.peak,
        };
        info!(
            "Rendered {} samples to {} ({} strategy, peak {:.4})",
            report.output_samples,
            output_path.display(),
            report.strategy,
            report.peak
        );

        Ok(report)
    }

    fn match_sample_rate<'a>(&self, dry: &Signal, ir: &'a Signal) -> Result<Cow<'a, [f64]>> {
        if dry.sample_rate() == ir.sample_rate() {
            return Ok(Cow::Borrowed(ir.samples()));
        }

        if !self.settings.resample_ir {
            warn!(
                "IR sample rate {} Hz differs from dry sample rate {} Hz; using IR as-is",
                ir.sample_rate(),
                dry.sample_rate()
            );
            return Ok(Cow::Borrowed(ir.samples()));
        }

        warn!(
            "Resampling IR from {} Hz to {} Hz",
            ir.sample_rate(),
            dry.sample_rate()
        );
        let resampled = resample(ir.samples(), ir.sample_rate(), dry.sample_rate())?;
        if resampled.is_empty() {
            return Err(Error::Resample(format!(
                "{}-sample IR is too short to resample",
                ir.len()
            )));
        }
        Ok(Cow::Owned(resampled))
    }
}

fn load_signal(path: &Path) -> Result<(WavHeader, Signal)> {
    let file = wav::decode(path)?;
    if file.samples.is_empty() {
        return Err(Error::EmptySignal {
            path: path.to_path_buf(),
        });
    }

    let signal = Signal::from_pcm(&file.samples, file.header.sample_rate);
    Ok((file.header, signal))
}

/// Fails early if `path` cannot be created: missing parent or a directory in the way.
fn check_writable(path: &Path) -> Result<()> {
    let not_writable = |message: &str| Error::FileOpen {
        path: path.to_path_buf(),
        source: std::io::Error::other(message.to_string()),
    };

    if path.is_dir() {
        return Err(not_writable("output path is a directory"));
    }

    match fs::metadata(wav::parent_dir(path)) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(not_writable("parent is not a directory")),
        Err(source) => Err(Error::FileOpen {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_process_uses_auto_strategy() -> Result<()> {
        let reverb = Reverb::new(Settings::default());
        let dry = Signal::new(vec![1.0, 2.0, 3.0], 44100);
        let ir = Signal::new(vec![1.0, 1.0], 44100);

        let (rendered, strategy) = reverb.process(&dry, &ir)?;

        assert_eq!(strategy, Strategy::Direct);
        assert_eq!(rendered.samples, vec![0.2, 0.6, 1.0, 0.6]);
        Ok(())
    }

    #[test]
    fn test_process_without_resampling_keeps_ir() -> Result<()> {
        let settings = Settings {
            resample_ir: false,
            strategy: Strategy::Fft,
            ..Settings::default()
        };
        let reverb = Reverb::new(settings);
        let dry = Signal::new(vec![1.0, 0.0, 0.0], 48000);
        let ir = Signal::new(vec![0.5, 0.25], 44100);

        let (rendered, _) = reverb.process(&dry, &ir)?;

        assert_eq!(rendered.samples.len(), 4);
        assert_abs_diff_eq!(rendered.samples[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rendered.samples[1], 0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_process_resamples_ir() -> Result<()> {
        let reverb = Reverb::new(Settings::default());
        let dry = Signal::new(vec![0.1; 100], 48000);
        let decay = (0..4800).map(|i| (-(i as f64) / 500.0).exp()).collect();
        let ir = Signal::new(decay, 24000);

        let (rendered, strategy) = reverb.process(&dry, &ir)?;

        // 4800 IR samples become 9600 after upsampling
        assert_eq!(strategy, Strategy::Fft);
        assert_eq!(rendered.samples.len(), 100 + 9600 - 1);
        Ok(())
    }

    #[test]
    fn test_process_resamples_single_sample_ir() -> Result<()> {
        let reverb = Reverb::new(Settings::default());
        let dry = Signal::new(vec![0.5, -0.25, 0.125], 48000);
        let ir = Signal::new(vec![1.0], 44100);

        let (rendered, _) = reverb.process(&dry, &ir)?;

        assert_eq!(rendered.samples.len(), 3 + 2 - 1);
        assert!(rendered.peak > 0.0);
        Ok(())
    }

    #[test]
    fn test_check_writable() -> anyhow::Result<()> {
        let tmp = tempfile::TempDir::new()?;
        assert!(check_writable(&tmp.path().join("out.wav")).is_ok());
        assert!(check_writable(tmp.path()).is_err());
        assert!(check_writable(&tmp.path().join("missing").join("out.wav")).is_err());
        Ok(())
    }
}
