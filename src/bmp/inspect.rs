use super::*;
use crate::{BmpError, BmpResult};
use bytemuck::{pod_read_unaligned, Pod};
use core::mem::size_of;
use std::{
  fs::File,
  io::{BufReader, Read},
  path::Path,
};

/// The few header values worth showing to a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BmpSummary {
  /// Width in pixels.
  pub width: i32,
  /// Height in pixels. Negative means the rows are stored top down.
  pub height: i32,
  pub bits_per_pixel: u16,
}
impl BmpSummary {
  /// Checks the tag and pulls the summary out of the two headers.
  ///
  /// The bit depth isn't checked, any depth is reported as-is.
  #[inline]
  pub fn from_headers(
    file_header: &BitmapFileHeader, info_header: &BitmapInfoHeader,
  ) -> BmpResult<Self> {
    if file_header.ty != BMP_SIGNATURE {
      return Err(BmpError::NotABmp { tag: file_header.ty });
    }
    Ok(Self {
      width: info_header.width.get(),
      height: info_header.height.get(),
      bits_per_pixel: info_header.bits_per_pixel.get(),
    })
  }

  /// Tries to get the summary from the bytes of a BMP file.
  #[inline]
  pub fn try_from_bytes(bytes: &[u8]) -> BmpResult<Self> {
    let not_a_bmp = || BmpError::NotABmp { tag: tag_of(bytes) };
    let (file_header, rest) = try_pull_pod::<BitmapFileHeader>(bytes).ok_or_else(not_a_bmp)?;
    let (info_header, _rest) = try_pull_pod::<BitmapInfoHeader>(rest).ok_or_else(not_a_bmp)?;
    Self::from_headers(&file_header, &info_header)
  }
}
impl core::fmt::Display for BmpSummary {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "Width: {} Height: {}\nNumber of bits per pixel: {}",
      self.width, self.height, self.bits_per_pixel
    )
  }
}

#[inline]
fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Option<(T, &[u8])> {
  if bytes.len() >= size_of::<T>() {
    let (head, tail) = bytes.split_at(size_of::<T>());
    Some((pod_read_unaligned(head), tail))
  } else {
    None
  }
}

fn tag_of(bytes: &[u8]) -> AsciiArray<2> {
  match bytes {
    [a, b, ..] => AsciiArray([*a, *b]),
    [a] => AsciiArray([*a, 0]),
    [] => AsciiArray::default(),
  }
}

/// Reads both headers off the stream and summarizes them.
///
/// A stream too short to hold both headers counts as "not a BMP".
pub fn inspect_reader(reader: &mut impl Read) -> BmpResult<BmpSummary> {
  let mut bytes = Vec::with_capacity(FILE_HEADER_SIZE + INFO_HEADER_SIZE);
  reader.take((FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u64).read_to_end(&mut bytes)?;
  BmpSummary::try_from_bytes(&bytes)
}

/// Opens the file at `path` and summarizes its headers.
pub fn inspect_path(path: &Path) -> BmpResult<BmpSummary> {
  let file =
    File::open(path).map_err(|source| BmpError::InputOpen { path: path.to_path_buf(), source })?;
  let summary = inspect_reader(&mut BufReader::new(file))?;
  tracing::debug!(path = %path.display(), ?summary, "inspected");
  Ok(summary)
}
