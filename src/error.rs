use std::{io, path::PathBuf};

use crate::AsciiArray;

/// Result alias used across the crate.
pub type BmpResult<T> = Result<T, BmpError>;

/// Everything that can stop a conversion or an inspection.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
  /// The input file couldn't be opened.
  #[error("failed to open input file {}", path.display())]
  InputOpen {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The tag isn't `BM`, or the headers couldn't be read in full.
  #[error("input is not a BMP file (tag {tag:?})")]
  NotABmp { tag: AsciiArray<2> },

  /// Only 24 bits per pixel input is accepted.
  #[error("input has {0} bits per pixel, expected 24")]
  UnsupportedDepth(u16),

  /// Only `BI_RGB` (uncompressed) input is accepted.
  #[error("input uses compression method {0}, only uncompressed images are supported")]
  UnsupportedCompression(u32),

  /// The width isn't positive, the height is zero, either one is over
  /// [MAX_DIMENSION](crate::MAX_DIMENSION), or the output would be too big
  /// for the `u32` file size field.
  #[error("input has unusable or too large dimensions {width}x{height}")]
  InvalidDimensions { width: i32, height: i32 },

  /// The output file couldn't be created.
  #[error("failed to open output file {}", path.display())]
  OutputOpen {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A read or write failed partway through the pixel data.
  #[error("i/o error during conversion")]
  Io(#[from] io::Error),
}

impl BmpError {
  /// A distinct non-zero process exit code for each kind of failure.
  #[inline]
  #[must_use]
  pub const fn exit_code(&self) -> u8 {
    match self {
      Self::InputOpen { .. } => 2,
      Self::NotABmp { .. } => 3,
      Self::UnsupportedDepth(_) => 4,
      Self::UnsupportedCompression(_) => 5,
      Self::InvalidDimensions { .. } => 6,
      Self::OutputOpen { .. } => 7,
      Self::Io(_) => 8,
    }
  }
}
