//! The fixed 16 color output palette and the nearest color search.

use crate::bmp::{PaletteEntry, SourcePixel};

/// Number of entries in [TARGET_PALETTE], `2**4`.
pub const PALETTE_LEN: usize = 16;

/// The 16 color palette of the Epoch Super Cassette Vision, in BMP color table
/// order (`[b, g, r, 0]`).
pub const TARGET_PALETTE: [PaletteEntry; PALETTE_LEN] = [
  PaletteEntry::new(0x00, 0x00, 0x00), // black
  PaletteEntry::new(0x00, 0x00, 0xFF), // red
  PaletteEntry::new(0x00, 0xA1, 0xFF), // orange
  PaletteEntry::new(0x9F, 0xA0, 0xFF), // light red
  PaletteEntry::new(0x00, 0xFF, 0xFF), // yellow
  PaletteEntry::new(0x00, 0xA0, 0xA3), // dark yellow
  PaletteEntry::new(0x00, 0xA1, 0x00), // green
  PaletteEntry::new(0x00, 0xFF, 0x00), // lime
  PaletteEntry::new(0x9D, 0xFF, 0xA0), // light green
  PaletteEntry::new(0x9B, 0x00, 0x00), // dark blue
  PaletteEntry::new(0xFF, 0x00, 0x00), // blue
  PaletteEntry::new(0xFF, 0x00, 0xA2), // purple
  PaletteEntry::new(0xFF, 0x00, 0xFF), // magenta
  PaletteEntry::new(0xFF, 0xFF, 0x00), // cyan
  PaletteEntry::new(0x9F, 0xA1, 0xA2), // gray
  PaletteEntry::new(0xFF, 0xFF, 0xFF), // white
];

/// Euclidean distance between a pixel and a palette color, in `(b, g, r)`
/// space.
#[inline]
#[must_use]
pub fn color_distance(pixel: SourcePixel, entry: PaletteEntry) -> f64 {
  let d = |a: u8, b: u8| f64::from(i32::from(a) - i32::from(b));
  let (db, dg, dr) =
    (d(pixel.blue, entry.blue), d(pixel.green, entry.green), d(pixel.red, entry.red));
  (db * db + dg * dg + dr * dr).sqrt()
}

/// Index of the palette entry closest to `pixel`.
///
/// When several entries are equally close the lowest index wins. An empty
/// palette gives 0.
#[inline]
#[must_use]
pub fn nearest_index(pixel: SourcePixel, palette: &[PaletteEntry]) -> u8 {
  let mut best_index = 0;
  let mut best_distance = f64::INFINITY;
  for (i, entry) in palette.iter().copied().enumerate() {
    let distance = color_distance(pixel, entry);
    if distance < best_distance {
      best_index = i;
      best_distance = distance;
    }
  }
  best_index as u8
}

/// Packs two 4-bit indexes into one byte, the first in the high bits.
#[inline]
#[must_use]
pub const fn pack_nibbles(first: u8, second: u8) -> u8 {
  (first << 4) | (second & 0xF)
}
