/// Splits `data` into `parts` contiguous chunks whose sizes differ by at most one.
///
/// The first `data.len() % parts` chunks get one byte more. No chunks are
/// returned for zero parts.
pub fn split_evenly(data: &[u8], parts: usize) -> Vec<Vec<u8>> {
    if parts == 0 {
        return Vec::new();
    }

    let base = data.len() / parts;
    let remainder = data.len() % parts;
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;

    for i in 0..parts {
        let len = base + usize::from(i < remainder);
        chunks.push(data[start..start + len].to_vec());
        start += len;
    }

    chunks
}
