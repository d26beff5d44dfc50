use super::buffer::ComplexBuffer;
use super::prepare::PCM_SCALE;
use super::transform::{Direction, transform};

/// Real output of a convolution, peak-normalized and truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub samples: Vec<f64>,
    /// Peak absolute magnitude before normalization.
    pub peak: f64,
    /// Transform length used, if the strategy had one.
    pub transform_len: Option<usize>,
}

/// Peak absolute magnitude. Zero for an empty input.
pub fn peak_magnitude(samples: impl IntoIterator<Item = f64>) -> f64 {
    samples.into_iter().map(f64::abs).fold(0.0, f64::max)
}

/// Inverse-transforms a product spectrum into the final output signal.
///
/// Runs the inverse FFT, divides by N, divides by the peak magnitude and
/// keeps the first `output_len` samples. The peak division changes absolute
/// loudness: the output always peaks at exactly 1.0 unless it is silent.
pub fn render(mut spectrum: ComplexBuffer, output_len: usize) -> Rendered {
    let transform_len = spectrum.len();

    transform(&mut spectrum, Direction::Inverse);
    spectrum.scale(1.0 / transform_len as f64);

    let peak = peak_magnitude(spectrum.real_parts());
    let mut samples: Vec<f64> = spectrum.real_parts().take(output_len).collect();
    normalize(&mut samples, peak);

    Rendered {
        samples,
        peak,
        transform_len: Some(transform_len),
    }
}

/// Peak-normalizes an already time-domain result.
pub fn finish(mut samples: Vec<f64>) -> Rendered {
    let peak = peak_magnitude(samples.iter().copied());
    normalize(&mut samples, peak);

    Rendered {
        samples,
        peak,
        transform_len: None,
    }
}

// Divide rather than multiply by the reciprocal so the peak sample lands on exactly 1.0.
fn normalize(samples: &mut [f64], peak: f64) {
    if peak > 0.0 {
        for sample in samples {
            *sample /= peak;
        }
    }
}

/// Encodes real samples as signed 16-bit PCM, truncating toward zero.
///
/// No dither and no clip guard: inputs are expected in `[-1.0, 1.0]`. The
/// float-to-int cast saturates, so `1.0` lands on `i16::MAX`.
pub fn to_pcm(samples: &[f64]) -> Vec<i16> {
    samples.iter().map(|&s| (s * PCM_SCALE) as i16).collect()
}
