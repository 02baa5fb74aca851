//! Output side of a pass.
//!
//! Every byte the parser consumes is echoed into the writer. While the image
//! data of a frame may still be replaced, echoed bytes are held aside instead;
//! afterwards they are either released verbatim or dropped in favour of a
//! recompressed sub-block sequence.

use log::debug;

use super::sub_block;

#[derive(Debug, Default)]
pub struct GifWriter {
    buffer: Vec<u8>,
    held: Option<Vec<u8>>,
}

impl GifWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echo(&mut self, bytes: &[u8]) {
        match self.held.as_mut() {
            Some(held) => held.extend_from_slice(bytes),
            None => self.buffer.extend_from_slice(bytes),
        }
    }

    /// Starts holding back echoed bytes.
    pub fn hold(&mut self) {
        self.release();
        self.held = Some(Vec::new());
    }

    /// Appends the held bytes unchanged.
    pub fn release(&mut self) {
        if let Some(held) = self.held.take() {
            self.buffer.extend_from_slice(&held);
        }
    }

    /// Drops the held image data and writes `min_code_size` and `compressed`
    /// as a fresh sub-block sequence instead.
    pub fn substitute(&mut self, min_code_size: u8, compressed: &[u8]) {
        if let Some(held) = self.held.take() {
            debug!(
                "replacing {} bytes of image data by {} bytes",
                held.len(),
                compressed.len()
            );
        }
        self.buffer.push(min_code_size);
        self.buffer.extend_from_slice(&sub_block::chunk(compressed));
    }

    /// Finishes the output, anything still held is kept verbatim.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.release();
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_echo_bytes_in_order() {
        let mut writer = GifWriter::new();
        writer.echo(b"GIF");
        writer.echo(b"89a");

        assert_eq!(writer.into_bytes(), b"GIF89a".to_vec());
    }

    #[test]
    fn should_release_held_bytes_verbatim() {
        let mut writer = GifWriter::new();
        writer.echo(&[1]);
        writer.hold();
        writer.echo(&[2, 3]);
        writer.release();
        writer.echo(&[4]);

        assert_eq!(writer.into_bytes(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn should_substitute_held_bytes() {
        let mut writer = GifWriter::new();
        writer.echo(&[0x2C]);
        writer.hold();
        writer.echo(&[2, 3, 0xAA, 0xBB, 0xCC, 0]);
        writer.substitute(2, &[0x11, 0x22]);
        writer.echo(&[0x3B]);

        assert_eq!(writer.into_bytes(), vec![0x2C, 2, 2, 0x11, 0x22, 0, 0x3B]);
    }

    #[test]
    fn should_keep_held_bytes_when_finished_early() {
        let mut writer = GifWriter::new();
        writer.hold();
        writer.echo(&[8, 5]);

        assert_eq!(writer.into_bytes(), vec![8, 5]);
    }
}
