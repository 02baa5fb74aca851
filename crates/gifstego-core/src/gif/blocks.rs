//! Immutable records of the GIF block structure.
//!
//! Every record is built once from the bytes that were read for it and never
//! changes afterwards. Field names follow the GIF89a format description.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use super::sub_block::SubBlock;
use crate::PixelIndex;

/// Signature and version, `GIF87a` or `GIF89a` for well formed streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    raw: [u8; 6],
}

impl Header {
    pub const LEN: usize = 6;

    pub fn new(raw: [u8; 6]) -> Self {
        Self { raw }
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.raw
    }

    pub fn is_gif(&self) -> bool {
        matches!(&self.raw, b"GIF87a" | b"GIF89a")
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.raw))
    }
}

/// Logical screen descriptor, the 7 bytes following the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDescriptor {
    pub screen_width: u16,
    pub screen_height: u16,
    pub packed_fields: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
}

impl ScreenDescriptor {
    pub const LEN: usize = 7;

    pub fn from_bytes(raw: [u8; 7]) -> Self {
        Self {
            screen_width: LittleEndian::read_u16(&raw[0..2]),
            screen_height: LittleEndian::read_u16(&raw[2..4]),
            packed_fields: raw[4],
            background_color_index: raw[5],
            pixel_aspect_ratio: raw[6],
        }
    }

    pub fn has_global_color_table(&self) -> bool {
        self.packed_fields & 0b1000_0000 != 0
    }

    pub fn color_resolution(&self) -> u8 {
        (self.packed_fields & 0b0111_0000) >> 4
    }

    pub fn is_sorted(&self) -> bool {
        self.packed_fields & 0b0000_1000 != 0
    }

    /// the exponent `e` of the global color table size `2^(e+1)`, always in 0..=7
    pub fn global_color_table_exponent(&self) -> u8 {
        self.packed_fields & 0b0000_0111
    }
}

impl fmt::Display for ScreenDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "screen_width = {}", self.screen_width)?;
        writeln!(f, "screen_height = {}", self.screen_height)?;
        writeln!(f, "packed_fields = {:#010b}", self.packed_fields)?;
        writeln!(f, "gct_flag = {}", u8::from(self.has_global_color_table()))?;
        writeln!(f, "color_res = {}", self.color_resolution())?;
        writeln!(f, "sort_flag = {}", u8::from(self.is_sorted()))?;
        writeln!(f, "gct_size = {}", self.global_color_table_exponent())?;
        writeln!(f, "bg_color_index = {}", self.background_color_index)?;
        writeln!(f, "pixel_aspect_ratio = {}", self.pixel_aspect_ratio)
    }
}

/// A global or local palette of RGB triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<[u8; 3]>,
}

impl ColorTable {
    /// Number of entries of a table with the given size exponent.
    pub fn entries(exponent: u8) -> usize {
        1 << ((exponent & 0b111) + 1)
    }

    /// Number of bytes a table with the given size exponent occupies.
    pub fn byte_len(exponent: u8) -> usize {
        3 * Self::entries(exponent)
    }

    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            colors: raw
                .chunks_exact(3)
                .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Looks up the color of a pixel index, `None` if the index is outside the table.
    pub fn color(&self, index: PixelIndex) -> Option<[u8; 3]> {
        self.colors.get(index as usize).copied()
    }
}

impl fmt::Display for ColorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size = {}", self.len())?;
        write!(f, "colors = [")?;
        for (i, [r, g, b]) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {}, {})", r, g, b)?;
        }
        writeln!(f, "]")
    }
}

/// Application extension (label `0xFF`) with an 11 byte block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationExtension {
    pub identifier: [u8; 8],
    pub auth_code: [u8; 3],
    pub sub_blocks: Vec<SubBlock>,
    pub payload: Vec<u8>,
}

impl ApplicationExtension {
    /// block size of a well formed application extension
    pub const BLOCK_SIZE: u8 = 11;
}

impl fmt::Display for ApplicationExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "block_size = {}", Self::BLOCK_SIZE)?;
        writeln!(
            f,
            "app_identifier = {}",
            String::from_utf8_lossy(&self.identifier)
        )?;
        writeln!(f, "app_auth_code = {}", hex(&self.auth_code))?;
        for sub_block in &self.sub_blocks {
            writeln!(f, "sub_block_size: {}", sub_block.len())?;
            writeln!(f, "sub_block_data: {}", hex(sub_block.data()))?;
        }
        Ok(())
    }
}

/// Image descriptor, the 9 bytes following the image separator `0x2C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub left_position: u16,
    pub top_position: u16,
    pub width: u16,
    pub height: u16,
    pub packed_fields: u8,
}

impl ImageDescriptor {
    pub const LEN: usize = 9;

    pub fn from_bytes(raw: [u8; 9]) -> Self {
        Self {
            left_position: LittleEndian::read_u16(&raw[0..2]),
            top_position: LittleEndian::read_u16(&raw[2..4]),
            width: LittleEndian::read_u16(&raw[4..6]),
            height: LittleEndian::read_u16(&raw[6..8]),
            packed_fields: raw[8],
        }
    }

    pub fn has_local_color_table(&self) -> bool {
        self.packed_fields & 0x80 != 0
    }

    pub fn is_interlaced(&self) -> bool {
        self.packed_fields & 0x40 != 0
    }

    pub fn is_sorted(&self) -> bool {
        self.packed_fields & 0x20 != 0
    }

    pub fn reserved(&self) -> u8 {
        (self.packed_fields & 0x18) >> 3
    }

    pub fn local_color_table_exponent(&self) -> u8 {
        self.packed_fields & 0x07
    }

    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "left_position = {}", self.left_position)?;
        writeln!(f, "top_position = {}", self.top_position)?;
        writeln!(f, "width = {}", self.width)?;
        writeln!(f, "height = {}", self.height)?;
        writeln!(
            f,
            "local_color_table_flag = {}",
            u8::from(self.has_local_color_table())
        )?;
        writeln!(f, "interlace_flag = {}", u8::from(self.is_interlaced()))?;
        writeln!(f, "sort_flag = {}", u8::from(self.is_sorted()))?;
        writeln!(f, "reserved = {}", self.reserved())?;
        writeln!(
            f,
            "local_color_table_size = {}",
            self.local_color_table_exponent()
        )
    }
}

/// One image of the stream together with its decoded pixel indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub descriptor: ImageDescriptor,
    pub local_color_table: Option<ColorTable>,
    pub min_code_size: u8,
    /// the compressed data as it was found in the source
    pub sub_blocks: Vec<SubBlock>,
    /// decoded pixel indices, after hiding if this frame carries a payload
    pub pixels: Vec<PixelIndex>,
}

impl Frame {
    pub fn width(&self) -> u16 {
        self.descriptor.width
    }

    pub fn height(&self) -> u16 {
        self.descriptor.height
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_unpack_the_screen_descriptor() {
        let screen = ScreenDescriptor::from_bytes([0x0A, 0x00, 0x0B, 0x01, 0b1011_1010, 3, 49]);

        assert_eq!(screen.screen_width, 10);
        assert_eq!(screen.screen_height, 267);
        assert!(screen.has_global_color_table());
        assert_eq!(screen.color_resolution(), 0b011);
        assert!(screen.is_sorted());
        assert_eq!(screen.global_color_table_exponent(), 2);
        assert_eq!(screen.background_color_index, 3);
        assert_eq!(screen.pixel_aspect_ratio, 49);
    }

    #[test]
    fn should_unpack_the_image_descriptor() {
        let descriptor =
            ImageDescriptor::from_bytes([1, 0, 2, 0, 0x40, 0x01, 0x20, 0x00, 0b1111_1101]);

        assert_eq!(descriptor.left_position, 1);
        assert_eq!(descriptor.top_position, 2);
        assert_eq!(descriptor.width, 320);
        assert_eq!(descriptor.height, 32);
        assert!(descriptor.has_local_color_table());
        assert!(descriptor.is_interlaced());
        assert!(descriptor.is_sorted());
        assert_eq!(descriptor.reserved(), 0b11);
        assert_eq!(descriptor.local_color_table_exponent(), 5);
        assert_eq!(descriptor.pixel_count(), 320 * 32);
    }

    #[test]
    fn should_size_color_tables_by_exponent() {
        for e in 0..=7u8 {
            let entries = 2usize.pow(u32::from(e) + 1);
            assert_eq!(ColorTable::entries(e), entries);
            assert_eq!(ColorTable::byte_len(e), 3 * entries);

            let table = ColorTable::from_bytes(&vec![0; ColorTable::byte_len(e)]);
            assert_eq!(table.len(), entries);
        }
    }

    #[test]
    fn should_look_up_colors() {
        let table = ColorTable::from_bytes(&[1, 2, 3, 4, 5, 6]);

        assert_eq!(table.color(1), Some([4, 5, 6]));
        assert_eq!(table.color(2), None);
    }

    #[test]
    fn should_recognize_gif_signatures() {
        assert!(Header::new(*b"GIF87a").is_gif());
        assert!(Header::new(*b"GIF89a").is_gif());
        assert!(!Header::new(*b"\x89PNG\r\n").is_gif());
    }
}
