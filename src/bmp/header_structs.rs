//! The on-disk structs. Every field is a byte array newtype from `pack1`, so
//! the structs have an alignment of 1, no padding, and little-endian fields
//! no matter what the host does.

use crate::ascii_array::AsciiArray;
use core::mem::size_of;
use pack1::*;

/// `BITMAPFILEHEADER`, always 14 bytes.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BitmapFileHeader {
  /// Should be `BM` for anything this crate will convert.
  pub ty: AsciiArray<2>,
  /// The total size of the file.
  pub file_size: U32LE,
  pub reserved1: U16LE,
  pub reserved2: U16LE,
  /// Byte index within the file where the pixel array starts.
  pub bitmap_offset: U32LE,
}

/// `BITMAPINFOHEADER`, always 40 bytes.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BitmapInfoHeader {
  /// size of the struct.
  pub size: U32LE,

  /// width in pixels.
  pub width: I32LE,

  /// height in pixels. when height is positive the bitmap is bottom up. when
  /// the height is negative the bitmap is top down.
  pub height: I32LE,

  /// must be 1
  pub planes: U16LE,

  /// * 4: Paletted, two pixels per byte, leftmost pixel in the high bits.
  /// * 24: Direct; RGB`[b,g,r]`
  pub bits_per_pixel: U16LE,

  /// `BI_RGB` is the only value this crate accepts.
  pub compression: U32LE,

  /// If non-zero, the size of the image data.
  pub image_size: U32LE,

  /// pixels per meter of the intended device, wide
  pub pixels_per_meter_x: I32LE,

  /// pixels per meter of the intended device, tall
  pub pixels_per_meter_y: I32LE,

  /// The number of color table entries that are used. If zero, uses the maximum
  /// number according to the bits per pixel.
  pub colors_used: U32LE,

  /// The number of colors that are important, if zero then all colors are
  /// important.
  pub important_colors: U32LE,
}

/// `RGBQUAD`: one color table entry, `[b, g, r, 0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct PaletteEntry {
  pub blue: u8,
  pub green: u8,
  pub red: u8,
  pub reserved: u8,
}
impl PaletteEntry {
  #[inline]
  #[must_use]
  pub const fn new(blue: u8, green: u8, red: u8) -> Self {
    Self { blue, green, red, reserved: 0 }
  }
}

/// `RGBTRIPLE`: one 24-bit pixel, `[b, g, r]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct SourcePixel {
  pub blue: u8,
  pub green: u8,
  pub red: u8,
}
impl SourcePixel {
  #[inline]
  #[must_use]
  pub const fn new(blue: u8, green: u8, red: u8) -> Self {
    Self { blue, green, red }
  }
}

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
pub const PALETTE_ENTRY_SIZE: usize = 4;
pub const SOURCE_PIXEL_SIZE: usize = 3;

const _: () = assert!(size_of::<BitmapFileHeader>() == FILE_HEADER_SIZE);
const _: () = assert!(size_of::<BitmapInfoHeader>() == INFO_HEADER_SIZE);
const _: () = assert!(size_of::<PaletteEntry>() == PALETTE_ENTRY_SIZE);
const _: () = assert!(size_of::<SourcePixel>() == SOURCE_PIXEL_SIZE);
