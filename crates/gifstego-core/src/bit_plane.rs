//! Least significant bit plane of the pixel indices of one frame.
//!
//! A payload is written bit by bit, least significant bit of each byte first,
//! into the lowest bit of consecutive pixel indices and closed by [`MARKER`].
//! Extraction reads bytes back until the first marker occurrence, so a payload
//! that itself contains the marker bytes comes back truncated.

use std::io::Read;

use crate::result::Result;
use crate::{BitIterator, GifStegoError, PixelIndex};

/// delimiter appended to every hidden payload
pub const MARKER: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut PixelIndex {
    fn hide_bit(self, bit: bool) {
        *self = (*self & !1) | PixelIndex::from(bit);
    }
}

/// Number of pixel indices needed to hide `payload_len` bytes plus the marker.
pub fn required_indices(payload_len: usize) -> usize {
    (payload_len + MARKER.len()) * 8
}

/// Largest payload in bytes the given pixel indices can carry.
pub fn capacity(pixels: &[PixelIndex]) -> usize {
    (pixels.len() / 8).saturating_sub(MARKER.len())
}

/// Hides `payload` followed by the marker in the lowest bits of `pixels`.
///
/// Returns [`GifStegoError::CapacityExceeded`] without touching `pixels` if
/// the payload does not fit. Higher bits of every index stay as they are.
pub fn embed(pixels: &mut [PixelIndex], payload: &[u8]) -> Result<()> {
    let required = required_indices(payload.len());
    if required > pixels.len() {
        return Err(GifStegoError::CapacityExceeded {
            required,
            available: pixels.len(),
        });
    }

    let bits = BitIterator::new(payload.chain(&MARKER[..]));
    for (pixel, bit) in pixels.iter_mut().zip(bits) {
        pixel.hide_bit(bit);
    }

    Ok(())
}

/// Collects the bytes hidden in `pixels` up to the first marker.
///
/// Returns an empty vector if no marker can be found.
pub fn extract(pixels: &[PixelIndex]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() / 8);

    for group in pixels.chunks_exact(8) {
        let byte = group
            .iter()
            .enumerate()
            .fold(0u8, |byte, (bit, pixel)| byte | (((pixel & 1) as u8) << bit));
        bytes.push(byte);

        if bytes.ends_with(&MARKER) {
            bytes.truncate(bytes.len() - MARKER.len());
            return bytes;
        }
    }

    Vec::new()
}
