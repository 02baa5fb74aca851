//! # GIF Stego Core API
//!
//! Hides opaque payloads in the least significant bit of the decoded pixel
//! indices of GIF frames, one payload per frame, and recovers them later.
//!
//! Everything happens in a single forward pass over the GIF, driven by
//! [`GifStream`][stream]:
//! - [`GifStream::inspect`][inspect] parses the block structure and decodes every frame
//! - [`GifStream::hide`][hide] additionally re-encodes the frames that carry a payload
//! - [`GifStream::recover`][recover] extracts one blob per frame
//!
//! All bytes that are not part of a modified frame are written out exactly as
//! they were read.
//!
//! # Usage Examples
//!
//! ## Hide data inside a GIF
//!
//! ```rust,no_run
//! gifstego_core::api::hide::prepare()
//!     .with_file("secret.txt")    // will hide this file in the first frame
//!     .with_payload("Hello")      // and this one in the second frame
//!     .with_gif("carrier.gif")
//!     .with_output("carrier-with-secrets.gif")
//!     .execute()
//!     .expect("Failed to hide data in gif");
//! ```
//!
//! ## Recover data from a GIF
//!
//! ```rust,no_run
//! let blobs = gifstego_core::api::recover::prepare()
//!     .from_secret_file("carrier-with-secrets.gif")
//!     .execute()
//!     .expect("Failed to recover data from gif");
//!
//! for (frame, blob) in blobs.iter().enumerate() {
//!     println!("frame {} carries {} bytes", frame, blob.len());
//! }
//! ```
//!
//! [stream]: ./gif/struct.GifStream.html
//! [inspect]: ./gif/struct.GifStream.html#method.inspect
//! [hide]: ./gif/struct.GifStream.html#method.hide
//! [recover]: ./gif/struct.GifStream.html#method.recover

#![warn(clippy::redundant_else)]

pub mod bit_iterator;
pub use bit_iterator::BitIterator;

pub mod api;
pub mod bit_plane;
pub mod commands;
pub mod error;
pub mod gif;
pub mod lzw;
pub mod png;
pub mod result;
pub mod split;

pub use crate::bit_plane::HideBit;
pub use crate::error::GifStegoError;
pub use crate::gif::{FrameNotice, GifStream, NoticeKind, PassMode};
pub use crate::result::Result;

/// A decoded pixel index, wide enough for the 12 bit minimum code size.
pub type PixelIndex = u16;
