//! Renders decoded frames as minimal truecolor PNG files for inspection.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use deflate::write::ZlibEncoder;
use deflate::Compression;

use crate::gif::{ColorTable, Frame};
use crate::result::Result;
use crate::{GifStegoError, PixelIndex};

pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const BIT_DEPTH: u8 = 8;
/// truecolor, RGB without alpha
const COLOR_TYPE_RGB: u8 = 2;
const FILTER_NONE: u8 = 0;

/// pixels a frame may have beyond its decoded indices, those render black
pub const PADDING_LIMIT: u64 = 1 << 22;

/// Renders `frame` with `table`, pixel indices missing from the frame are taken as 0.
pub fn frame_to_png(frame: &Frame, table: Option<&ColorTable>) -> Result<Vec<u8>> {
    encode_png(
        u32::from(frame.width()),
        u32::from(frame.height()),
        &frame.pixels,
        table,
    )
}

/// Encodes `width` x `height` pixel indices as PNG.
///
/// Indices without a color, or every index if there is no table at all, render black.
/// A frame may be padded with black up to [`PADDING_LIMIT`] pixels, anything larger
/// must be backed by decoded pixel indices.
pub fn encode_png(
    width: u32,
    height: u32,
    pixels: &[PixelIndex],
    table: Option<&ColorTable>,
) -> Result<Vec<u8>> {
    let area = u64::from(width) * u64::from(height);
    if area > (pixels.len() as u64).max(PADDING_LIMIT) {
        return Err(GifStegoError::OversizedFrame {
            width,
            height,
            decoded: pixels.len(),
        });
    }

    let mut png = Vec::new();
    png.write_all(&SIGNATURE)?;

    let mut ihdr = Vec::with_capacity(13);
    ihdr.write_u32::<BigEndian>(width)?;
    ihdr.write_u32::<BigEndian>(height)?;
    ihdr.write_u8(BIT_DEPTH)?;
    ihdr.write_u8(COLOR_TYPE_RGB)?;
    ihdr.write_u8(0)?; // compression method
    ihdr.write_u8(0)?; // filter method
    ihdr.write_u8(0)?; // no interlace
    write_chunk(&mut png, b"IHDR", &ihdr)?;

    let idat = deflate_scanlines(width as usize, height as usize, pixels, table)?;
    write_chunk(&mut png, b"IDAT", &idat)?;
    write_chunk(&mut png, b"IEND", &[])?;

    Ok(png)
}

/// Compresses the filtered RGB scanlines one row at a time.
fn deflate_scanlines(
    width: usize,
    height: usize,
    pixels: &[PixelIndex],
    table: Option<&ColorTable>,
) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::Default);
    let mut indices = pixels.iter().copied().chain(std::iter::repeat(0));
    let mut row = Vec::with_capacity(1 + 3 * width);

    for _ in 0..height {
        row.clear();
        row.push(FILTER_NONE);
        for index in indices.by_ref().take(width) {
            let rgb = table.and_then(|t| t.color(index)).unwrap_or([0, 0, 0]);
            row.extend_from_slice(&rgb);
        }
        encoder.write_all(&row)?;
    }

    Ok(encoder.finish()?)
}

fn write_chunk(w: &mut impl Write, chunk_type: &[u8; 4], data: &[u8]) -> Result<()> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);

    w.write_u32::<BigEndian>(data.len() as u32)?;
    w.write_all(chunk_type)?;
    w.write_all(data)?;
    w.write_u32::<BigEndian>(hasher.finalize())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::ByteOrder;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    /// splits a PNG into (type, data) pairs, checking every CRC on the way
    fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
        assert_eq!(png[..8], SIGNATURE);
        let mut pos = 8;
        let mut chunks = Vec::new();
        while pos < png.len() {
            let len = BigEndian::read_u32(&png[pos..pos + 4]) as usize;
            let body = &png[pos + 4..pos + 8 + len];
            let crc = BigEndian::read_u32(&png[pos + 8 + len..pos + 12 + len]);
            assert_eq!(crc32fast::hash(body), crc, "crc mismatch");

            let mut chunk_type = [0; 4];
            chunk_type.copy_from_slice(&body[..4]);
            chunks.push((chunk_type, body[4..].to_vec()));
            pos += 12 + len;
        }
        chunks
    }

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut raw = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut raw)
            .expect("IDAT should inflate");
        raw
    }

    #[test]
    fn should_write_a_valid_chunk_layout() {
        let table = ColorTable::from_bytes(&[0, 0, 0, 255, 255, 255]);
        let png = encode_png(3, 2, &[0, 1, 0, 1, 0, 1], Some(&table)).unwrap();
        let chunks = chunks(&png);

        let types: Vec<&[u8; 4]> = chunks.iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec![b"IHDR", b"IDAT", b"IEND"]);

        let ihdr = &chunks[0].1;
        assert_eq!(BigEndian::read_u32(&ihdr[0..4]), 3);
        assert_eq!(BigEndian::read_u32(&ihdr[4..8]), 2);
        assert_eq!(&ihdr[8..], &[8, 2, 0, 0, 0]);
        assert!(chunks[2].1.is_empty());
    }

    #[test]
    fn should_deflate_rgb_scanlines() {
        let table = ColorTable::from_bytes(&[1, 2, 3, 4, 5, 6]);
        let png = encode_png(2, 1, &[1, 0], Some(&table)).unwrap();
        let raw = inflate(&chunks(&png)[1].1);

        assert_eq!(raw, vec![0, 4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn should_inflate_to_the_full_image_size() {
        let (width, height) = (17, 5);
        let pixels: Vec<PixelIndex> = (0..width * height).map(|i| (i % 4) as PixelIndex).collect();
        let table = ColorTable::from_bytes(&[9; 12]);
        let png = encode_png(width, height, &pixels, Some(&table)).unwrap();
        let raw = inflate(&chunks(&png)[1].1);

        assert_eq!(raw.len(), (height * (1 + 3 * width)) as usize);
    }

    #[test]
    fn should_pad_short_frames_and_render_unknown_colors_black() {
        let table = ColorTable::from_bytes(&[10, 20, 30, 40, 50, 60]);
        let png = encode_png(2, 2, &[7], Some(&table)).unwrap();
        let raw = inflate(&chunks(&png)[1].1);

        assert_eq!(
            raw,
            vec![0, 0, 0, 0, 10, 20, 30, 0, 10, 20, 30, 10, 20, 30]
        );
    }

    #[test]
    fn should_render_black_without_a_color_table() {
        let png = encode_png(1, 1, &[3], None).unwrap();
        let raw = inflate(&chunks(&png)[1].1);

        assert_eq!(raw, vec![0, 0, 0, 0]);
    }

    #[test]
    fn should_refuse_padding_beyond_the_limit() {
        let result = encode_png(PADDING_LIMIT as u32 + 1, 1, &[], None);

        assert!(matches!(result, Err(GifStegoError::OversizedFrame { decoded: 0, .. })));
    }

    #[test]
    fn should_refuse_areas_far_beyond_the_decoded_pixels() {
        let result = encode_png(0xFFFF, 0xFFFF, &[1, 2], None);

        assert!(matches!(
            result,
            Err(GifStegoError::OversizedFrame {
                width: 0xFFFF,
                height: 0xFFFF,
                decoded: 2
            })
        ));
    }
}
