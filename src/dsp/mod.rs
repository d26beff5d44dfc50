pub mod buffer;
pub mod prepare;
pub mod render;
pub mod resample;
pub mod spectrum;
pub mod transform;

pub use buffer::ComplexBuffer;
pub use prepare::{Prepared, Signal};
pub use render::Rendered;
pub use transform::Direction;
