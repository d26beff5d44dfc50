use std::path::PathBuf;

/// Errors surfaced before or around the convolution core.
///
/// The numeric core trusts its preconditions, so every variant here is
/// raised at an input or output boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open '{}': {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed WAV header in '{}': {reason}", path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("unsupported WAV format in '{}': {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("failed to allocate a buffer of {len} samples")]
    Allocation { len: usize },

    #[error("'{}' contains no samples", path.display())]
    EmptySignal { path: PathBuf },

    #[error("cannot convolve an empty signal")]
    EmptyInput,

    #[error("resampling failed: {0}")]
    Resample(String),

    #[error("invalid settings file '{}': {reason}", path.display())]
    Settings { path: PathBuf, reason: String },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = Error::MalformedHeader {
            path: PathBuf::from("dry.wav"),
            reason: "missing RIFF tag".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed WAV header in 'dry.wav': missing RIFF tag"
        );

        let err = Error::FileOpen {
            path: PathBuf::from("missing.wav"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to open 'missing.wav'"));
    }

    #[test]
    fn test_allocation_message() {
        let err = Error::Allocation { len: 1 << 20 };
        assert_eq!(
            err.to_string(),
            "failed to allocate a buffer of 1048576 samples"
        );
    }
}
