use log::debug;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::{Error, Result};

const SINC_LEN: usize = 256;

/// resample takes input samples at `from_rate` and returns them at `to_rate`
///
/// Returns `ceil(len * to_rate / from_rate)` samples. The input is padded
/// with zeros so the sinc filter flushes its tail, and the filter delay is
/// cut from the front so sample 0 stays aligned.
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Result<Vec<f64>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    debug!(
        "Resampling {} samples from {from_rate} Hz to {to_rate} Hz",
        samples.len()
    );

    let ratio = f64::from(to_rate) / f64::from(from_rate);
    let output_len = (samples.len() as u128 * u128::from(to_rate))
        .div_ceil(u128::from(from_rate)) as usize;

    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut padded = samples.to_vec();
    padded.resize(samples.len() + 2 * SINC_LEN, 0.0);

    let mut resampler = SincFixedIn::<f64>::new(ratio, 1.0, params, padded.len(), 1)
        .map_err(|e| Error::Resample(e.to_string()))?;
    let delay = resampler.output_delay();

    let input = vec![padded];
    let output = resampler
        .process(&input, None)
        .map_err(|e| Error::Resample(e.to_string()))?;
    let channel = output
        .into_iter()
        .next()
        .ok_or_else(|| Error::Resample("resampler produced no channels".to_string()))?;

    if channel.len() < delay + output_len {
        return Err(Error::Resample(format!(
            "resampler produced {} frames, expected {}",
            channel.len(),
            delay + output_len
        )));
    }

    Ok(channel[delay..delay + output_len].to_vec())
}
