pub mod wav;

pub use wav::{WavFile, WavHeader, decode, encode};
