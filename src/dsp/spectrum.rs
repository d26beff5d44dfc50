use super::buffer::ComplexBuffer;

/// Multiplies `spectrum` by `other` bin by bin, in place.
///
/// With both spectra of length N this is circular convolution of length N in
/// the time domain, which equals linear convolution only when N covers the
/// full linear-convolution length.
pub fn multiply(spectrum: &mut ComplexBuffer, other: &ComplexBuffer) {
    debug_assert_eq!(spectrum.len(), other.len(), "spectrum length mismatch");

    let bins = spectrum
        .as_interleaved_mut()
        .chunks_exact_mut(2)
        .zip(other.as_interleaved().chunks_exact(2));

    for (x, h) in bins {
        let (a, b) = (x[0], x[1]);
        let (c, d) = (h[0], h[1]);
        x[0] = a * c - b * d;
        x[1] = a * d + b * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::transform::{Direction, transform};
    use approx::assert_abs_diff_eq;
    use rustfft::num_complex::Complex;

    #[test]
    fn test_multiply_is_complex_product() -> crate::Result<()> {
        let mut x =
            ComplexBuffer::from_complex(&[Complex::new(1.0, 2.0), Complex::new(0.0, -1.0)])?;
        let h =
            ComplexBuffer::from_complex(&[Complex::new(3.0, -4.0), Complex::new(2.0, 5.0)])?;

        multiply(&mut x, &h);

        assert_eq!(x.get(0), Complex::new(1.0, 2.0) * Complex::new(3.0, -4.0));
        assert_eq!(x.get(1), Complex::new(5.0, -2.0));
        Ok(())
    }

    #[test]
    fn test_short_transform_wraps_around() -> crate::Result<()> {
        // [1,2] * [1,1] needs 3 bins; forcing 2 folds the tail back onto the head.
        let mut x = ComplexBuffer::from_real(&[1.0, 2.0], 2)?;
        let mut h = ComplexBuffer::from_real(&[1.0, 1.0], 2)?;
        transform(&mut x, Direction::Forward);
        transform(&mut h, Direction::Forward);
        multiply(&mut x, &h);
        transform(&mut x, Direction::Inverse);
        x.scale(0.5);

        // Linear result is [1, 3, 2]; circular length 2 gives [1 + 2, 3].
        assert_abs_diff_eq!(x.get(0).re, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x.get(1).re, 3.0, epsilon = 1e-12);
        Ok(())
    }
}
