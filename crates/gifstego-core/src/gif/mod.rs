mod blocks;
mod parser;
mod reader;
mod stream;
pub mod sub_block;
mod writer;

pub use blocks::*;
pub use parser::{GifStreamParser, PassMode};
pub use reader::EchoReader;
pub use stream::{FrameNotice, GifStream, NoticeKind};
pub use sub_block::SubBlock;
pub use writer::GifWriter;

pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const TRAILER: u8 = 0x3B;
pub const APPLICATION_LABEL: u8 = 0xFF;
