//! Length prefixed data sub-blocks, terminated by a zero length block.

/// Largest amount of data a single sub-block can carry.
pub const MAX_SUB_BLOCK_LEN: usize = 255;

/// One data sub-block, 1 to 255 bytes long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBlock {
    data: Vec<u8>,
}

impl SubBlock {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        debug_assert!(!data.is_empty() && data.len() <= MAX_SUB_BLOCK_LEN);
        Self { data }
    }

    /// the size byte as it appears in the stream
    pub fn len(&self) -> u8 {
        self.data.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Splits `data` into sub-blocks of at most 255 bytes.
pub fn split(data: &[u8]) -> Vec<SubBlock> {
    data.chunks(MAX_SUB_BLOCK_LEN)
        .map(|chunk| SubBlock::new(chunk.to_vec()))
        .collect()
}

/// Serializes sub-blocks including the zero length terminator.
pub fn serialize(blocks: &[SubBlock]) -> Vec<u8> {
    let mut out = Vec::with_capacity(blocks.iter().map(|b| b.data.len() + 1).sum::<usize>() + 1);
    for block in blocks {
        out.push(block.len());
        out.extend_from_slice(&block.data);
    }
    out.push(0);
    out
}

/// Chunks `data` into a complete, terminated sub-block sequence.
pub fn chunk(data: &[u8]) -> Vec<u8> {
    serialize(&split(data))
}

/// Concatenates the data of sub-blocks.
pub fn payload(blocks: &[SubBlock]) -> Vec<u8> {
    blocks.iter().flat_map(|b| b.data.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// walks a serialized sequence the way a GIF reader would
    fn bodies(serialized: &[u8]) -> (Vec<u8>, usize) {
        let mut pos = 0;
        let mut out = Vec::new();
        loop {
            let len = serialized[pos] as usize;
            pos += 1;
            if len == 0 {
                return (out, pos);
            }
            out.extend_from_slice(&serialized[pos..pos + len]);
            pos += len;
        }
    }

    #[test]
    fn should_reproduce_the_data_for_various_lengths() {
        for len in [0, 1, 254, 255, 256, 510, 511, 1000] {
            let data: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
            let serialized = chunk(&data);
            let (restored, consumed) = bodies(&serialized);

            assert_eq!(restored, data, "len = {}", len);
            assert_eq!(consumed, serialized.len(), "terminator must be last");
        }
    }

    #[test]
    fn should_use_full_blocks_before_the_last_one() {
        let blocks = split(&[9; 600]);

        assert_eq!(
            blocks.iter().map(SubBlock::len).collect::<Vec<_>>(),
            vec![255, 255, 90]
        );
        assert_eq!(payload(&blocks), vec![9; 600]);
    }

    #[test]
    fn should_serialize_empty_data_as_terminator_only() {
        assert_eq!(chunk(&[]), vec![0]);
    }
}
