// Enable pedantic lints globally, then allow the noisy ones we're not fixing.
#![warn(clippy::pedantic, clippy::nursery)]
// Not a public API surface worth annotating everywhere
#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]
// DSP variable names (wr/wi, wpr/wpi, etc.) are intentionally similar
#![allow(clippy::similar_names)]
// Audio code performs intentional casts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(
    clippy::module_name_repetitions,
    clippy::doc_markdown,
    clippy::float_cmp,
    clippy::many_single_char_names
)]
#![allow(clippy::redundant_pub_crate)]

pub mod convolver;
pub mod dsp;
pub mod error;
pub mod io;
pub mod reverb;
pub mod settings;

pub use error::{Error, Result};
pub use reverb::{RenderReport, Reverb};
pub use settings::{Settings, Strategy};
