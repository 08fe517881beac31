use super::*;

use bmp4bit::{
  bmp::{PaletteEntry, SourcePixel},
  color_distance, convert_file, convert_stream, BmpError, ConvertConfig, TARGET_PALETTE,
};
use std::io::Cursor;

const RED: [u8; 3] = [0x00, 0x00, 0xFF];
const DARK_BLUE: [u8; 3] = [0x9B, 0x00, 0x00];
const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BLUE: [u8; 3] = [0xFF, 0x00, 0x00];
const BLACK: [u8; 3] = [0x00, 0x00, 0x00];
const LIME: [u8; 3] = [0x00, 0xFF, 0x00];

fn convert_bytes(input: &[u8]) -> Result<Vec<u8>, BmpError> {
  let mut out = Vec::new();
  convert_stream(&mut Cursor::new(input), &mut out)?;
  Ok(out)
}

#[test]
fn test_two_pixels_pack_into_one_byte() {
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  let out = convert_bytes(&input).unwrap();

  assert_eq!(out.len(), 54 + 64 + 4);
  assert_eq!(&out[0..2], b"BM");
  assert_eq!(u16_at(&out, 28), 4);
  assert_eq!(out[118], (1 << 4) | 9);
  assert_eq!(out[118], 0x19);
  assert_eq!(&out[119..122], &[0, 0, 0]);
}

#[test]
fn test_rewritten_header_fields() {
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  let out = convert_bytes(&input).unwrap();

  // the file size field leaves out the 64 byte palette
  assert_eq!(u32_at(&out, 2), 4 + 14 + 40);
  assert_eq!(u32_at(&out, 2) as usize, out.len() - 64);
  assert_eq!(u32_at(&out, 10), u32_at(&input, 10) + 64);
  assert_eq!(u32_at(&out, 10), 118);
  // passed through untouched
  assert_eq!(u16_at(&out, 6), 0xBEEF);
  assert_eq!(u16_at(&out, 8), 0xCAFE);
  assert_eq!(&out[14..28], &input[14..28]);
  assert_eq!(&out[30..54], &input[30..54]);
}

#[test]
fn test_palette_follows_the_info_header() {
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  let out = convert_bytes(&input).unwrap();
  let expected: &[u8] = bytemuck::cast_slice(TARGET_PALETTE.as_slice());
  assert_eq!(&out[54..118], expected);
  assert_eq!(&out[54..58], &[0, 0, 0, 0]);
  assert_eq!(&out[58..62], &[0x00, 0x00, 0xFF, 0x00]);
}

#[test]
fn test_width_ten_rows_are_eight_bytes() {
  let row: Vec<[u8; 3]> = vec![WHITE; 10];
  let input = build_bmp(*b"BM", 24, 10, 2, &[row.clone(), row], &[]);
  let mut out = Vec::new();
  let report = convert_stream(&mut Cursor::new(&input), &mut out).unwrap();

  assert_eq!(report.geometry.row_size, 8);
  assert_eq!(report.geometry.pixel_array_size, 16);
  assert_eq!(report.file_size_field, 16 + 54);
  assert_eq!(out.len(), 118 + 16);
  let row0 = &out[118..126];
  assert_eq!(row0, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0]);
}

#[test]
fn test_odd_width_and_source_row_padding() {
  // 3 pixels is 9 bytes per source row, padded to 12
  let input = build_bmp(
    *b"BM",
    24,
    3,
    2,
    &[vec![RED, WHITE, BLUE], vec![WHITE, BLACK, LIME]],
    &[],
  );
  let out = convert_bytes(&input).unwrap();

  assert_eq!(out.len(), 118 + 8);
  assert_eq!(&out[118..122], &[0x1F, 0xA0, 0, 0]);
  assert_eq!(&out[122..126], &[0xF0, 0x70, 0, 0]);
}

#[test]
fn test_gap_before_pixels_is_kept() {
  let gap: [u8; 6] = [1, 2, 3, 4, 5, 6];
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &gap);
  let out = convert_bytes(&input).unwrap();

  let offset = u32_at(&out, 10) as usize;
  assert_eq!(offset, 54 + 6 + 64);
  assert_eq!(&out[118..124], &gap);
  assert_eq!(out[offset], 0x19);
}

#[test]
fn test_top_down_rows_keep_their_order() {
  let input = build_bmp(*b"BM", 24, 2, -2, &[vec![RED, RED], vec![BLUE, BLUE]], &[]);
  let out = convert_bytes(&input).unwrap();

  assert_eq!(i32::from_le_bytes(out[22..26].try_into().unwrap()), -2);
  assert_eq!(out[118], 0x11);
  assert_eq!(out[122], 0xAA);
}

#[test]
fn test_every_pixel_gets_a_nearest_color() {
  let (width, height) = (16_usize, 16_usize);
  let noise = rand_bytes(width * height * 3);
  let rows: Vec<Vec<[u8; 3]>> = noise
    .chunks_exact(width * 3)
    .map(|row| row.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect())
    .collect();
  let input = build_bmp(*b"BM", 24, width as i32, height as i32, &rows, &[]);
  let out = convert_bytes(&input).unwrap();

  let row_size = 8;
  for (y, row) in rows.iter().enumerate() {
    for (x, px) in row.iter().enumerate() {
      let byte = out[118 + y * row_size + x / 2];
      let index = if x % 2 == 0 { byte >> 4 } else { byte & 0xF };
      assert!(index < 16);
      let pixel = SourcePixel::new(px[0], px[1], px[2]);
      let chosen = color_distance(pixel, TARGET_PALETTE[usize::from(index)]);
      for (other, entry) in TARGET_PALETTE.iter().copied().enumerate() {
        let d = color_distance(pixel, entry);
        assert!(chosen <= d, "{pixel:?} got {index} but {other} is closer");
        if d == chosen {
          assert!(usize::from(index) <= other, "{pixel:?} tie should go to the lower index");
        }
      }
    }
  }
}

#[test]
fn test_wrong_tag_is_not_a_bmp() {
  let input = build_bmp(*b"PK", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  let mut out = Vec::new();
  match convert_stream(&mut Cursor::new(&input), &mut out) {
    Err(BmpError::NotABmp { tag }) => assert_eq!(tag.0, *b"PK"),
    other => panic!("unexpected: {other:?}"),
  }
  assert!(out.is_empty());
}

#[test]
fn test_eight_bit_input_is_rejected() {
  let input = build_bmp(*b"BM", 8, 2, 1, &[], &[]);
  assert!(matches!(convert_bytes(&input), Err(BmpError::UnsupportedDepth(8))));
}

#[test]
fn test_converted_output_is_rejected() {
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  let once = convert_bytes(&input).unwrap();
  assert!(matches!(convert_bytes(&once), Err(BmpError::UnsupportedDepth(4))));
}

#[test]
fn test_compressed_input_is_rejected() {
  let mut input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  input[30..34].copy_from_slice(&1_u32.to_le_bytes());
  assert!(matches!(convert_bytes(&input), Err(BmpError::UnsupportedCompression(1))));
}

#[test]
fn test_zero_width_is_rejected() {
  let input = build_bmp(*b"BM", 24, 0, 1, &[], &[]);
  assert!(matches!(
    convert_bytes(&input),
    Err(BmpError::InvalidDimensions { width: 0, height: 1 })
  ));
}

#[test]
fn test_huge_width_header_is_rejected_before_allocating() {
  let input = build_bmp(*b"BM", 24, i32::MAX, 1, &[], &[]);
  assert_eq!(input.len(), 54);
  let mut out = Vec::new();
  assert!(matches!(
    convert_stream(&mut Cursor::new(&input), &mut out),
    Err(BmpError::InvalidDimensions { width: i32::MAX, height: 1 })
  ));
  assert!(out.is_empty());

  let input_path = temp_path("huge-input.bmp");
  let output_path = temp_path("huge-output.bmp");
  std::fs::write(&input_path, &input).unwrap();
  let config = ConvertConfig { input: input_path.clone(), output: output_path.clone() };
  assert!(matches!(convert_file(&config), Err(BmpError::InvalidDimensions { .. })));
  assert!(!output_path.exists());

  let _ = std::fs::remove_file(input_path);
}

#[test]
fn test_truncated_headers_are_not_a_bmp() {
  let input = build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[]);
  assert!(matches!(convert_bytes(&input[..10]), Err(BmpError::NotABmp { .. })));
  assert!(matches!(convert_bytes(&input[..40]), Err(BmpError::NotABmp { .. })));
}

#[test]
fn test_truncated_pixels_are_an_io_error() {
  let input = build_bmp(*b"BM", 24, 2, 2, &[vec![RED, RED], vec![RED, RED]], &[]);
  let mut out = Vec::new();
  let result = convert_stream(&mut Cursor::new(&input[..input.len() - 4]), &mut out);
  assert!(matches!(result, Err(BmpError::Io(_))));
  // the rows before the failure were already written
  assert_eq!(out.len(), 118 + 4);
}

#[test]
fn test_convert_file_round_trip() {
  let input_path = temp_path("ok-input.bmp");
  let output_path = temp_path("ok-output.bmp");
  std::fs::write(&input_path, build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[])).unwrap();

  let config = ConvertConfig { input: input_path.clone(), output: output_path.clone() };
  let report = convert_file(&config).unwrap();
  assert_eq!(report.pixel_data_offset, 118);

  let out = std::fs::read(&output_path).unwrap();
  assert_eq!(out[118], 0x19);
  assert_eq!(u16_at(&out, 28), 4);

  let _ = std::fs::remove_file(input_path);
  let _ = std::fs::remove_file(output_path);
}

#[test]
fn test_rejected_file_creates_no_output() {
  let input_path = temp_path("bad-input.bmp");
  let output_path = temp_path("bad-output.bmp");
  std::fs::write(&input_path, build_bmp(*b"MB", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[])).unwrap();

  let config = ConvertConfig { input: input_path.clone(), output: output_path.clone() };
  assert!(matches!(convert_file(&config), Err(BmpError::NotABmp { .. })));
  assert!(!output_path.exists());

  let _ = std::fs::remove_file(input_path);
}

#[test]
fn test_missing_input_file() {
  let config = ConvertConfig {
    input: temp_path("does-not-exist.bmp"),
    output: temp_path("never-written.bmp"),
  };
  match convert_file(&config) {
    Err(e @ BmpError::InputOpen { .. }) => assert_eq!(e.exit_code(), 2),
    other => panic!("unexpected: {other:?}"),
  }
  assert!(!config.output.exists());
}

#[test]
fn test_unwritable_output_file() {
  let input_path = temp_path("unwritable-input.bmp");
  std::fs::write(&input_path, build_bmp(*b"BM", 24, 2, 1, &[vec![RED, DARK_BLUE]], &[])).unwrap();

  let config = ConvertConfig {
    input: input_path.clone(),
    output: temp_path("no-such-dir").join("output.bmp"),
  };
  assert!(matches!(convert_file(&config), Err(BmpError::OutputOpen { .. })));

  let _ = std::fs::remove_file(input_path);
}

#[test]
fn test_exit_codes_are_distinct() {
  let io = || std::io::Error::from(std::io::ErrorKind::Other);
  let errors = [
    BmpError::InputOpen { path: "a".into(), source: io() },
    BmpError::NotABmp { tag: Default::default() },
    BmpError::UnsupportedDepth(8),
    BmpError::UnsupportedCompression(1),
    BmpError::InvalidDimensions { width: 0, height: 0 },
    BmpError::OutputOpen { path: "b".into(), source: io() },
    BmpError::Io(io()),
  ];
  let mut codes: Vec<u8> = errors.iter().map(BmpError::exit_code).collect();
  assert!(codes.iter().all(|&c| c != 0));
  codes.sort_unstable();
  codes.dedup();
  assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_palette_entries_are_unique() {
  for (i, a) in TARGET_PALETTE.iter().enumerate() {
    for b in &TARGET_PALETTE[i + 1..] {
      assert_ne!(a, b);
    }
    assert_eq!(a.reserved, 0);
  }
  assert_eq!(TARGET_PALETTE[9], PaletteEntry::new(0x9B, 0x00, 0x00));
}
