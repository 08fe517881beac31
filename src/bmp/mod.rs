#![forbid(unsafe_code)]

//! Module for Windows Bitmap files (BMP).
//!
//! ## Parsing The Format
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file always starts with a "file header". This is always 14 bytes.
//!   * A tag for the kind of bitmap you're expected to find (`BM`)
//!   * A total size of the file
//!   * Two reserved `u16` values
//!   * The position of the pixel data within the file.
//! * Next is an "info header". This crate only deals with the 40 byte
//!   `BITMAPINFOHEADER` version, which covers the width, height, bit depth, and
//!   compression of the image.
//! * Next there **might** be a color table. This is mandatory if the bit depth
//!   is 8 (or less) bits per pixel. Each entry in the color table is a `[u8;4]`
//!   value (`[b, g, r, 0]`).
//! * Next there **might** be a gap in the data, the pixel data offset in the
//!   file header says where the pixels really start.
//! * Next there is the pixel array. Each row of the bitmap is padded to 4
//!   bytes. With a positive height the rows go from the bottom of the image to
//!   the top.
//!
//! When the bits per pixel is less than 8 the pixels will be packed within a
//! byte. In this case, the leftmost pixel is the highest bits of the byte.
//! * 4 bits per pixel is indexed color, two pixels per byte.
//! * 24 bits per pixel is direct color and the channel order is always implied
//!   to be `[b,g,r]` within `[u8; 3]`.

use crate::AsciiArray;

mod header_structs;
pub use header_structs::*;

mod codec;
pub use codec::*;

mod inspect;
pub use inspect::*;

/// The tag that starts every BMP this crate works with.
pub const BMP_SIGNATURE: AsciiArray<2> = AsciiArray(*b"BM");

/// Uncompressed pixel data.
pub const BI_RGB: u32 = 0;

/// Bytes per line of pixel data, including the padding out to 4 bytes.
///
/// The ceiling happens before the multiply, so a 10 pixel wide 4bpp row is
/// `ceil(40 / 32) * 4 == 8` bytes. `None` if the math overflows.
#[inline]
#[must_use]
pub const fn padded_row_size(bits_per_pixel: u32, width: u32) -> Option<usize> {
  match (bits_per_pixel as usize).checked_mul(width as usize) {
    Some(bits) => match bits.checked_add(31) {
      Some(bits) => (bits / 32).checked_mul(4),
      None => None,
    },
    None => None,
  }
}
