//#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! A crate for squeezing 24-bit BMP images down to 4-bit indexed BMP images.
//!
//! Every pixel is replaced with whichever of the 16 colors in
//! [TARGET_PALETTE] is closest to it, and the indexes are packed two to a
//! byte.
//!
//! ```no_run
//! use bmp4bit::{convert_file, ConvertConfig};
//!
//! let report = convert_file(&ConvertConfig::from_assets_dir("assets"))?;
//! println!("{} bytes of pixels", report.geometry.pixel_array_size);
//! # Ok::<(), bmp4bit::BmpError>(())
//! ```

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod ascii_array;
pub use ascii_array::*;

mod error;
pub use error::*;

pub mod bmp;

pub mod palette;
pub use palette::*;

pub mod convert;
pub use convert::*;
