use std::fmt;
use std::io::Read;

use super::blocks::{ApplicationExtension, ColorTable, Frame, Header, ScreenDescriptor};
use super::parser::{GifStreamParser, PassMode};
use crate::bit_plane;
use crate::result::Result;

/// Result of one pass over a GIF stream.
///
/// Holds the parsed structure, the recovered blobs, everything that went wrong
/// per frame without aborting the pass, and the echoed (possibly modified) output.
#[derive(Debug, Default)]
pub struct GifStream {
    pub header: Option<Header>,
    pub screen: Option<ScreenDescriptor>,
    pub global_color_table: Option<ColorTable>,
    pub application_extensions: Vec<ApplicationExtension>,
    pub frames: Vec<Frame>,
    /// one blob per frame in frame order, only filled by a recover pass
    pub blobs: Vec<Vec<u8>>,
    pub notices: Vec<FrameNotice>,
    /// indices of the frames that carry a payload after a hide pass
    pub embedded: Vec<usize>,
    /// payloads of a hide pass that found no frame
    pub unused_payloads: usize,
    /// the source ended in the middle of a block
    pub truncated: bool,
    pub(crate) output: Vec<u8>,
}

impl GifStream {
    /// Parses `source` without modifying anything.
    pub fn inspect<R: Read>(source: R) -> Result<Self> {
        GifStreamParser::new(source, PassMode::Inspect).parse()
    }

    /// Hides the i-th payload in the i-th frame of `source`.
    pub fn hide<R: Read>(source: R, payloads: Vec<Vec<u8>>) -> Result<Self> {
        GifStreamParser::new(source, PassMode::Hide(payloads)).parse()
    }

    /// Recovers one blob per frame of `source`.
    pub fn recover<R: Read>(source: R) -> Result<Self> {
        GifStreamParser::new(source, PassMode::Recover).parse()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The local color table of `frame`, or the global one if it has none.
    pub fn color_table_for<'a>(&'a self, frame: &'a Frame) -> Option<&'a ColorTable> {
        frame
            .local_color_table
            .as_ref()
            .or(self.global_color_table.as_ref())
    }

    /// The bytes echoed during the pass, the full GIF after a hide pass.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "---")?;
    writeln!(f, "{}", title)?;
    writeln!(f, "---")
}

impl fmt::Display for GifStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "GIF INFO")?;
        match &self.header {
            Some(header) => writeln!(f, "header = {}", header)?,
            None => writeln!(f, "header = <missing>")?,
        }
        writeln!(f, "frames = {}", self.frame_count())?;
        if self.truncated {
            writeln!(f, "truncated = true")?;
        }

        if let Some(screen) = &self.screen {
            section(f, "LOGICAL SCREEN DESCRIPTOR")?;
            write!(f, "{}", screen)?;
        }

        if let Some(table) = &self.global_color_table {
            section(f, "GLOBAL COLOR TABLE")?;
            write!(f, "{}", table)?;
        }

        if !self.application_extensions.is_empty() {
            section(f, "APPLICATION EXTENSIONS")?;
            for extension in &self.application_extensions {
                write!(f, "{}", extension)?;
            }
        }

        if !self.frames.is_empty() {
            section(f, "IMAGE DESCRIPTORS")?;
            for (index, frame) in self.frames.iter().enumerate() {
                writeln!(f, "frame = {}", index)?;
                write!(f, "{}", frame.descriptor)?;
                writeln!(f, "min_code_size = {}", frame.min_code_size)?;
                writeln!(f, "capacity = {}", bit_plane::capacity(&frame.pixels))?;
                if let Some(table) = &frame.local_color_table {
                    write!(f, "{}", table)?;
                }
            }
        }

        if !self.notices.is_empty() {
            section(f, "NOTICES")?;
            for notice in &self.notices {
                writeln!(f, "{}", notice)?;
            }
        }

        Ok(())
    }
}

/// Something that kept a frame from being processed, without failing the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNotice {
    pub frame: usize,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// the payload needs more pixel indices than the frame has
    CapacityExceeded { required: usize, available: usize },
    /// image data with this minimum code size is passed through undecoded
    UnsupportedCodeSize(u8),
    /// image data that cannot be decoded, the frame yields no pixels
    CorruptLzwStream { code: u16, next: u16 },
}

impl fmt::Display for FrameNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}: {}", self.frame, self.kind)
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::CapacityExceeded {
                required,
                available,
            } => write!(
                f,
                "payload needs {} pixel indices, only {} available, frame left unchanged",
                required, available
            ),
            NoticeKind::UnsupportedCodeSize(m) => write!(
                f,
                "unsupported LZW minimum code size {}, image data passed through",
                m
            ),
            NoticeKind::CorruptLzwStream { code, next } => write!(
                f,
                "corrupt LZW stream (code {}, next {}), no pixels decoded",
                code, next
            ),
        }
    }
}
