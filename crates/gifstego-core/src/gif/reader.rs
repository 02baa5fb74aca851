use std::io::Read;

use super::writer::GifWriter;
use crate::result::Result;
use crate::GifStegoError;

/// Forward only byte source that echoes everything it consumes into a [`GifWriter`].
pub struct EchoReader<R> {
    inner: R,
    writer: GifWriter,
    position: usize,
}

impl<R: Read> EchoReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            writer: GifWriter::new(),
            position: 0,
        }
    }

    /// Reads exactly `len` bytes.
    ///
    /// Bytes are echoed even if the source ends early, in which case
    /// [`GifStegoError::TruncatedStream`] is returned.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len);
        self.inner
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|source| GifStegoError::ReadError { source })?;

        self.writer.echo(&buf);
        self.position += buf.len();

        if buf.len() < len {
            return Err(GifStegoError::TruncatedStream {
                offset: self.position,
            });
        }
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads the next byte, `None` once the source is exhausted.
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.read_u8() {
            Ok(byte) => Ok(Some(byte)),
            Err(GifStegoError::TruncatedStream { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn writer_mut(&mut self) -> &mut GifWriter {
        &mut self.writer
    }

    pub fn into_writer(self) -> GifWriter {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_echo_what_was_read() {
        let mut reader = EchoReader::new(&b"GIF89a\x0a\x00"[..]);

        assert_eq!(reader.read_array::<6>().unwrap(), *b"GIF89a");
        assert_eq!(reader.read_u8().unwrap(), 0x0a);
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.into_writer().into_bytes(), b"GIF89a\x0a".to_vec());
    }

    #[test]
    fn should_echo_a_short_read_and_report_truncation() {
        let mut reader = EchoReader::new(&[1u8, 2, 3][..]);

        match reader.read_bytes(5) {
            Err(GifStegoError::TruncatedStream { offset: 3 }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(reader.into_writer().into_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn should_signal_the_end_of_the_source() {
        let mut reader = EchoReader::new(&[0x3Bu8][..]);

        assert_eq!(reader.next_byte().unwrap(), Some(0x3B));
        assert_eq!(reader.next_byte().unwrap(), None);
    }
}
