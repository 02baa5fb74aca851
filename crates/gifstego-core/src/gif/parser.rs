//! Single pass over a GIF byte source.
//!
//! The parser walks the block structure once, front to back, and echoes every
//! byte it consumes into the [`GifWriter`](super::writer::GifWriter) of its
//! reader. What happens to the image data of a frame depends on the [`PassMode`].

use std::io::Read;

use log::{debug, info, warn};

use super::blocks::{ApplicationExtension, ColorTable, Frame, Header, ImageDescriptor, ScreenDescriptor};
use super::reader::EchoReader;
use super::stream::{FrameNotice, GifStream, NoticeKind};
use super::sub_block::{self, SubBlock};
use super::{APPLICATION_LABEL, EXTENSION_INTRODUCER, IMAGE_SEPARATOR, TRAILER};
use crate::result::Result;
use crate::{bit_plane, lzw, GifStegoError, PixelIndex};

/// decode limit for frames whose descriptor has no area
const EMPTY_FRAME_PIXEL_LIMIT: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassMode {
    /// parse and decode only
    Inspect,
    /// hide the i-th payload in the i-th frame
    Hide(Vec<Vec<u8>>),
    /// extract one blob per frame
    Recover,
}

impl PassMode {
    fn is_hide(&self) -> bool {
        matches!(self, PassMode::Hide(_))
    }
}

pub struct GifStreamParser<R> {
    reader: EchoReader<R>,
    mode: PassMode,
    stream: GifStream,
}

impl<R: Read> GifStreamParser<R> {
    pub fn new(source: R, mode: PassMode) -> Self {
        Self {
            reader: EchoReader::new(source),
            mode,
            stream: GifStream::default(),
        }
    }

    /// Runs the pass until the source is exhausted.
    ///
    /// A source that ends in the middle of a block is not an error, the
    /// result is marked as truncated and keeps everything read so far.
    pub fn parse(mut self) -> Result<GifStream> {
        match self.parse_blocks() {
            Ok(()) => {}
            Err(GifStegoError::TruncatedStream { offset }) => {
                warn!("GIF stream ends unexpectedly after {} bytes", offset);
                self.stream.truncated = true;
            }
            Err(e) => return Err(e),
        }

        if let PassMode::Hide(payloads) = &self.mode {
            let unused = payloads.len().saturating_sub(self.stream.frames.len());
            if unused > 0 {
                warn!(
                    "{} payload(s) left over, the GIF has only {} frame(s)",
                    unused,
                    self.stream.frames.len()
                );
            }
            self.stream.unused_payloads = unused;
        }

        self.stream.output = self.reader.into_writer().into_bytes();
        Ok(self.stream)
    }

    fn parse_blocks(&mut self) -> Result<()> {
        let header = Header::new(self.reader.read_array::<{ Header::LEN }>()?);
        if !header.is_gif() {
            warn!("unexpected signature {:?}, parsing anyway", header.as_bytes());
        }
        self.stream.header = Some(header);

        let screen = ScreenDescriptor::from_bytes(self.reader.read_array::<{ ScreenDescriptor::LEN }>()?);
        debug!(
            "logical screen {}x{}, global color table: {}",
            screen.screen_width,
            screen.screen_height,
            screen.has_global_color_table()
        );
        self.stream.screen = Some(screen);

        if screen.has_global_color_table() {
            let exponent = screen.global_color_table_exponent();
            let raw = self.reader.read_bytes(ColorTable::byte_len(exponent))?;
            self.stream.global_color_table = Some(ColorTable::from_bytes(&raw));
        }

        while let Some(tag) = self.reader.next_byte()? {
            match tag {
                EXTENSION_INTRODUCER => self.parse_extension()?,
                IMAGE_SEPARATOR => self.parse_image()?,
                TRAILER => debug!("trailer at offset {}", self.reader.position() - 1),
                other => debug!(
                    "skipping unknown block tag {:#04x} at offset {}",
                    other,
                    self.reader.position() - 1
                ),
            }
        }

        Ok(())
    }

    fn parse_extension(&mut self) -> Result<()> {
        let label = self.reader.read_u8()?;
        let block_size = self.reader.read_u8()?;

        if label == APPLICATION_LABEL && block_size == ApplicationExtension::BLOCK_SIZE {
            let identifier = self.reader.read_array::<8>()?;
            let auth_code = self.reader.read_array::<3>()?;
            let sub_blocks = self.read_sub_blocks()?;
            let payload = sub_block::payload(&sub_blocks);
            debug!(
                "application extension {} with {} payload bytes",
                String::from_utf8_lossy(&identifier),
                payload.len()
            );
            self.stream.application_extensions.push(ApplicationExtension {
                identifier,
                auth_code,
                sub_blocks,
                payload,
            });
            return Ok(());
        }

        debug!("skipping extension {:#04x}", label);
        self.reader.read_bytes(usize::from(block_size))?;
        self.read_sub_blocks()?;

        Ok(())
    }

    fn read_sub_blocks(&mut self) -> Result<Vec<SubBlock>> {
        let mut blocks = Vec::new();
        loop {
            let len = self.reader.read_u8()?;
            if len == 0 {
                return Ok(blocks);
            }
            blocks.push(SubBlock::new(self.reader.read_bytes(usize::from(len))?));
        }
    }

    fn parse_image(&mut self) -> Result<()> {
        let index = self.stream.frames.len();
        let descriptor = ImageDescriptor::from_bytes(self.reader.read_array::<{ ImageDescriptor::LEN }>()?);
        let local_color_table = if descriptor.has_local_color_table() {
            let exponent = descriptor.local_color_table_exponent();
            let raw = self.reader.read_bytes(ColorTable::byte_len(exponent))?;
            Some(ColorTable::from_bytes(&raw))
        } else {
            None
        };
        debug!(
            "frame {}: {}x{} at ({}, {})",
            index,
            descriptor.width,
            descriptor.height,
            descriptor.left_position,
            descriptor.top_position
        );

        if self.mode.is_hide() {
            self.reader.writer_mut().hold();
        }
        let min_code_size = self.reader.read_u8()?;
        let sub_blocks = self.read_sub_blocks()?;

        let limit = match descriptor.pixel_count() {
            0 => EMPTY_FRAME_PIXEL_LIMIT,
            pixel_count => pixel_count,
        };
        let decoded = self.decode_frame(index, min_code_size, &sub_blocks, limit)?;
        if let Some(pixels) = &decoded {
            if pixels.len() != descriptor.pixel_count() {
                debug!(
                    "frame {}: decoded {} pixel indices, expected {}",
                    index,
                    pixels.len(),
                    descriptor.pixel_count()
                );
            }
        }

        let payload = match &mut self.mode {
            PassMode::Hide(payloads) => {
                Some(payloads.get_mut(index).map(std::mem::take).unwrap_or_default())
            }
            _ => None,
        };

        let pixels = match payload {
            Some(payload) => self.hide_in_frame(index, min_code_size, decoded, &payload)?,
            None => {
                let pixels = decoded.unwrap_or_default();
                if self.mode == PassMode::Recover {
                    let blob = bit_plane::extract(&pixels);
                    debug!("frame {}: recovered {} bytes", index, blob.len());
                    self.stream.blobs.push(blob);
                }
                pixels
            }
        };

        self.stream.frames.push(Frame {
            descriptor,
            local_color_table,
            min_code_size,
            sub_blocks,
            pixels,
        });

        Ok(())
    }

    /// Decodes the image data of a frame into at most `limit` pixel indices.
    ///
    /// Unsupported code sizes, and corrupt data outside of a hide pass, are
    /// recorded as notices and yield `None`.
    fn decode_frame(
        &mut self,
        index: usize,
        min_code_size: u8,
        sub_blocks: &[SubBlock],
        limit: usize,
    ) -> Result<Option<Vec<PixelIndex>>> {
        match lzw::decode(min_code_size, &sub_block::payload(sub_blocks), limit) {
            Ok(pixels) => Ok(Some(pixels)),
            Err(GifStegoError::UnsupportedCodeSize(m)) => {
                self.notice(index, NoticeKind::UnsupportedCodeSize(m));
                Ok(None)
            }
            Err(GifStegoError::CorruptLzwStream { code, next }) if !self.mode.is_hide() => {
                self.notice(index, NoticeKind::CorruptLzwStream { code, next });
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn hide_in_frame(
        &mut self,
        index: usize,
        min_code_size: u8,
        decoded: Option<Vec<PixelIndex>>,
        payload: &[u8],
    ) -> Result<Vec<PixelIndex>> {
        let Some(mut pixels) = decoded else {
            self.reader.writer_mut().release();
            return Ok(Vec::new());
        };
        if payload.is_empty() {
            self.reader.writer_mut().release();
            return Ok(pixels);
        }

        match bit_plane::embed(&mut pixels, payload) {
            Ok(()) => {
                let compressed = lzw::encode(min_code_size, &pixels)?;
                self.reader
                    .writer_mut()
                    .substitute(min_code_size, &compressed);
                info!("frame {}: hid {} bytes", index, payload.len());
                self.stream.embedded.push(index);
            }
            Err(GifStegoError::CapacityExceeded {
                required,
                available,
            }) => {
                self.reader.writer_mut().release();
                self.notice(
                    index,
                    NoticeKind::CapacityExceeded {
                        required,
                        available,
                    },
                );
            }
            Err(e) => return Err(e),
        }

        Ok(pixels)
    }

    fn notice(&mut self, frame: usize, kind: NoticeKind) {
        let notice = FrameNotice { frame, kind };
        warn!("{}", notice);
        self.stream.notices.push(notice);
    }
}
