use std::io::{ErrorKind, Read};
use std::slice;

/// Iterates over the bits of a byte source, least significant bit first.
pub struct BitIterator<I> {
    i: u32,
    iter: I,
    byte: Option<u8>,
}

impl<I> BitIterator<I> {
    pub fn new(s: I) -> Self {
        BitIterator {
            i: 0,
            iter: s,
            byte: None,
        }
    }
}

impl<I> Iterator for BitIterator<I>
where
    I: Read,
{
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = (self.i % 8) as u8;
        if bit == 0 {
            self.byte = loop {
                let mut b = 0;
                match self.iter.read(slice::from_mut(&mut b)) {
                    Ok(0) => break None,
                    Ok(..) => break Some(b),
                    Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => break None,
                }
            };
        }
        self.i += 1;

        self.byte.map(|b| (b >> bit) & 1 == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream_io::{BitRead, BitReader, LittleEndian};

    #[test]
    fn should_return_the_bits_of_h_in_little_endian_order() {
        let b = [0b0100_1000];
        let bits: Vec<bool> = BitIterator::new(&b[..]).collect();

        assert_eq!(
            bits,
            vec![false, false, false, true, false, false, true, false]
        );
    }

    #[test]
    fn should_end_after_the_last_bit_of_the_last_byte() {
        let b = [0b0100_1000, 0b0110_0001];
        let mut it = BitIterator::new(&b[..]).skip(8);

        for _ in 0..8 {
            assert!(it.next().is_some());
        }
        assert_eq!(it.next(), None);
    }

    #[test]
    fn should_behave_as_the_bit_reader() {
        let b = [0b0100_1000, 0b0110_0001];
        let mut it = BitIterator::new(&b[..]);
        let mut reader = BitReader::endian(&b[..], LittleEndian);

        for i in 0..16 {
            assert_eq!(
                it.next().unwrap(),
                reader.read_bit().unwrap(),
                "{} bit not correct",
                i
            );
        }
    }
}
