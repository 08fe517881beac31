//! Turning a 24bpp BMP into a 4bpp BMP that uses [TARGET_PALETTE].
//!
//! The pipeline is straight through: read the headers, check them, write the
//! new headers and the palette, then stream the pixels one row at a time.
//! Nothing is cleaned up if a write fails partway, whatever was written stays.

use crate::{
  bmp::*,
  palette::{nearest_index, pack_nibbles, PALETTE_LEN, TARGET_PALETTE},
  AsciiArray, BmpError, BmpResult,
};
use bytemuck::cast_slice;
use pack1::*;
use std::{
  fs::File,
  io::{self, BufReader, BufWriter, Read, Write},
  path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// Bits per pixel of the input.
pub const SOURCE_BIT_COUNT: u16 = 24;

/// Bits per pixel of the output.
pub const TARGET_BIT_COUNT: u16 = 4;

/// Size of the color table that gets inserted after the info header.
pub const PALETTE_SIZE: usize = PALETTE_LEN * PALETTE_ENTRY_SIZE;

/// Largest width or height that will be converted.
///
/// Row buffers are sized from the header before any pixel is read, so this
/// keeps a hostile header from asking for gigabytes of memory.
pub const MAX_DIMENSION: u32 = 17_000;

/// Where to read from and where to write to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConvertConfig {
  pub input: PathBuf,
  pub output: PathBuf,
}
impl ConvertConfig {
  /// `input.bmp` and `output_4bit.bmp` inside of `dir`.
  #[inline]
  #[must_use]
  pub fn from_assets_dir(dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self { input: dir.join("input.bmp"), output: dir.join("output_4bit.bmp") }
  }
}
impl Default for ConvertConfig {
  /// The `assets` folder of the current directory.
  #[inline]
  fn default() -> Self {
    Self::from_assets_dir("assets")
  }
}

/// Sizes of the output image, all derived from the input's info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputGeometry {
  pub width: u32,
  /// Row count, regardless of the row order.
  pub height: u32,
  /// Bytes in one padded output row.
  pub row_size: usize,
  /// Bytes in one padded input row.
  pub source_row_size: usize,
  /// `row_size * height`
  pub pixel_array_size: usize,
}
impl OutputGeometry {
  /// Errors if the width isn't positive, the height is zero, or either one
  /// is over [MAX_DIMENSION].
  #[inline]
  pub fn new(width: i32, height: i32) -> BmpResult<Self> {
    let invalid = || BmpError::InvalidDimensions { width, height };
    if width <= 0 || height == 0 {
      return Err(invalid());
    }
    let width = width.unsigned_abs();
    let height = height.unsigned_abs();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
      return Err(invalid());
    }
    let row_size = padded_row_size(u32::from(TARGET_BIT_COUNT), width).ok_or_else(invalid)?;
    let source_row_size =
      padded_row_size(u32::from(SOURCE_BIT_COUNT), width).ok_or_else(invalid)?;
    let pixel_array_size = row_size.checked_mul(height as usize).ok_or_else(invalid)?;
    Ok(Self { width, height, row_size, source_row_size, pixel_array_size })
  }

  /// The value written to the output's file size field.
  ///
  /// This is the pixel array plus the two headers. The 64 byte palette is
  /// *not* counted, so the field is smaller than the real file.
  #[inline]
  #[must_use]
  pub const fn file_size_field(&self) -> usize {
    self.pixel_array_size + FILE_HEADER_SIZE + INFO_HEADER_SIZE
  }
}

/// What a finished conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionReport {
  pub geometry: OutputGeometry,
  /// The file size field as written to the output header.
  pub file_size_field: u32,
  /// The pixel data offset as written to the output header.
  pub pixel_data_offset: u32,
}

/// Headers that passed every check, with the derived output geometry.
#[derive(Debug, Clone, Copy)]
struct CheckedInput {
  file_header: BitmapFileHeader,
  info_header: BitmapInfoHeader,
  geometry: OutputGeometry,
  /// Bytes between the end of the info header and the pixel array.
  gap: u32,
  file_size_field: u32,
  pixel_data_offset: u32,
}

fn read_checked_input(reader: &mut impl Read) -> BmpResult<CheckedInput> {
  let file_header =
    read_file_header(reader).map_err(|_| BmpError::NotABmp { tag: AsciiArray::default() })?;
  let info_header =
    read_info_header(reader).map_err(|_| BmpError::NotABmp { tag: file_header.ty })?;
  debug!(?file_header, ?info_header, "read headers");

  if file_header.ty != BMP_SIGNATURE {
    return Err(BmpError::NotABmp { tag: file_header.ty });
  }
  let bits_per_pixel = info_header.bits_per_pixel.get();
  if bits_per_pixel != SOURCE_BIT_COUNT {
    return Err(BmpError::UnsupportedDepth(bits_per_pixel));
  }
  let compression = info_header.compression.get();
  if compression != BI_RGB {
    return Err(BmpError::UnsupportedCompression(compression));
  }
  let geometry = OutputGeometry::new(info_header.width.get(), info_header.height.get())?;
  let gap = file_header
    .bitmap_offset
    .get()
    .checked_sub((FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32)
    .ok_or(BmpError::NotABmp { tag: file_header.ty })?;
  let too_big = BmpError::InvalidDimensions {
    width: info_header.width.get(),
    height: info_header.height.get(),
  };
  let file_size_field = u32::try_from(geometry.file_size_field()).map_err(|_| too_big)?;
  let pixel_data_offset = file_header
    .bitmap_offset
    .get()
    .checked_add(PALETTE_SIZE as u32)
    .ok_or(BmpError::NotABmp { tag: file_header.ty })?;
  debug!(?geometry, gap, file_size_field, pixel_data_offset, "derived output geometry");
  Ok(CheckedInput { file_header, info_header, geometry, gap, file_size_field, pixel_data_offset })
}

/// Writes the rewritten headers, the palette, and any gap bytes.
fn write_output_prelude(
  reader: &mut impl Read, writer: &mut impl Write, input: &CheckedInput,
) -> BmpResult<ConversionReport> {
  let CheckedInput {
    mut file_header,
    mut info_header,
    geometry,
    gap,
    file_size_field,
    pixel_data_offset,
  } = *input;
  file_header.file_size = U32LE::new(file_size_field);
  file_header.bitmap_offset = U32LE::new(pixel_data_offset);
  info_header.bits_per_pixel = U16LE::new(TARGET_BIT_COUNT);

  write_file_header(writer, &file_header)?;
  write_info_header(writer, &info_header)?;
  write_palette(writer, &TARGET_PALETTE)?;

  // keeps the output's pixel data offset pointing at the pixel data
  let copied = io::copy(&mut reader.take(u64::from(gap)), writer)?;
  if copied != u64::from(gap) {
    return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
  }

  Ok(ConversionReport { geometry, file_size_field, pixel_data_offset })
}

/// Quantizes one row of source pixels into packed output bytes.
///
/// `out` must hold at least `ceil(pixels.len() / 2)` bytes. An odd trailing
/// pixel gets index 0 as its partner. Bytes of `out` past the packed pixels
/// are left alone.
pub fn quantize_row(pixels: &[SourcePixel], out: &mut [u8]) {
  for (pair, byte) in pixels.chunks(2).zip(out.iter_mut()) {
    let first = nearest_index(pair[0], &TARGET_PALETTE);
    let second = match pair.get(1) {
      Some(p) => nearest_index(*p, &TARGET_PALETTE),
      None => 0,
    };
    *byte = pack_nibbles(first, second);
  }
}

fn write_pixels(
  reader: &mut impl Read, writer: &mut impl Write, geometry: &OutputGeometry,
) -> BmpResult<()> {
  let used = geometry.width as usize * SOURCE_PIXEL_SIZE;
  let mut source_row = vec![0_u8; geometry.source_row_size];
  let mut out_row = vec![0_u8; geometry.row_size];
  for y in 0..geometry.height {
    reader.read_exact(&mut source_row)?;
    let pixels: &[SourcePixel] = cast_slice(&source_row[..used]);
    quantize_row(pixels, &mut out_row);
    writer.write_all(&out_row)?;
    trace!(y, "row converted");
  }
  Ok(())
}

/// Converts a 24bpp BMP from `reader` into a 4bpp BMP on `writer`.
///
/// The input is fully checked before the first byte is written.
pub fn convert_stream(
  reader: &mut impl Read, writer: &mut impl Write,
) -> BmpResult<ConversionReport> {
  let input = read_checked_input(reader)?;
  let report = write_output_prelude(reader, writer, &input)?;
  write_pixels(reader, writer, &report.geometry)?;
  writer.flush()?;
  Ok(report)
}

/// Converts the file at `config.input`, writing the result to `config.output`.
///
/// The output file is only created once the input has passed every check, so
/// a rejected input never leaves an output file behind.
pub fn convert_file(config: &ConvertConfig) -> BmpResult<ConversionReport> {
  let input_file = File::open(&config.input)
    .map_err(|source| BmpError::InputOpen { path: config.input.clone(), source })?;
  let mut reader = BufReader::new(input_file);
  let input = read_checked_input(&mut reader)?;

  let output_file = File::create(&config.output)
    .map_err(|source| BmpError::OutputOpen { path: config.output.clone(), source })?;
  let mut writer = BufWriter::new(output_file);
  let report = write_output_prelude(&mut reader, &mut writer, &input)?;
  write_pixels(&mut reader, &mut writer, &report.geometry)?;
  writer.flush()?;
  debug!(input = %config.input.display(), output = %config.output.display(), ?report, "converted");
  Ok(report)
}
