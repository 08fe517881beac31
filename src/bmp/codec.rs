//! Reading and writing the header structs over byte streams.
//!
//! No validation happens here, the bytes go in and out exactly as they are.

use super::*;
use bytemuck::{bytes_of, cast_slice, pod_read_unaligned, Pod};
use std::io::{self, Read, Write};

#[inline]
fn read_pod<T: Pod, const N: usize>(reader: &mut impl Read) -> io::Result<T> {
  let mut a = [0_u8; N];
  reader.read_exact(&mut a)?;
  Ok(pod_read_unaligned(&a))
}

/// Reads the 14 byte file header.
#[inline]
pub fn read_file_header(reader: &mut impl Read) -> io::Result<BitmapFileHeader> {
  read_pod::<BitmapFileHeader, FILE_HEADER_SIZE>(reader)
}

/// Reads the 40 byte info header.
#[inline]
pub fn read_info_header(reader: &mut impl Read) -> io::Result<BitmapInfoHeader> {
  read_pod::<BitmapInfoHeader, INFO_HEADER_SIZE>(reader)
}

#[inline]
pub fn write_file_header(writer: &mut impl Write, h: &BitmapFileHeader) -> io::Result<()> {
  writer.write_all(bytes_of(h))
}

#[inline]
pub fn write_info_header(writer: &mut impl Write, h: &BitmapInfoHeader) -> io::Result<()> {
  writer.write_all(bytes_of(h))
}

/// Writes every entry of the color table, in order.
#[inline]
pub fn write_palette(writer: &mut impl Write, palette: &[PaletteEntry]) -> io::Result<()> {
  writer.write_all(cast_slice(palette))
}
