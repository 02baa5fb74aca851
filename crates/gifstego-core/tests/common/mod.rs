use gifstego_core::gif::sub_block;
use gifstego_core::{bit_plane, lzw, PixelIndex};

/// A GIF89a with a 4 color global table and `frames` full screen frames.
///
/// Pixel indices of every frame run through 0, 1, 2, 3 and start over.
pub fn gif_with_frames(width: u16, height: u16, frames: usize) -> Vec<u8> {
    gif_with_payloads(width, height, &vec![&b""[..]; frames])
}

/// Like [`gif_with_frames`], the i-th frame already carries the i-th payload.
pub fn gif_with_payloads(width: u16, height: u16, payloads: &[&[u8]]) -> Vec<u8> {
    let mut gif = b"GIF89a".to_vec();
    gif.extend(width.to_le_bytes());
    gif.extend(height.to_le_bytes());
    gif.extend([0xF1, 0, 0]);
    gif.extend([0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255]);

    for payload in payloads {
        let mut pixels: Vec<PixelIndex> = (0..usize::from(width) * usize::from(height))
            .map(|i| (i % 4) as PixelIndex)
            .collect();
        if !payload.is_empty() {
            bit_plane::embed(&mut pixels, payload).expect("payload should fit");
        }

        gif.extend([0x21, 0xF9, 4, 0, 10, 0, 0, 0]);
        gif.push(0x2C);
        gif.extend([0, 0, 0, 0]);
        gif.extend(width.to_le_bytes());
        gif.extend(height.to_le_bytes());
        gif.push(0);
        gif.push(2);
        gif.extend(sub_block::chunk(
            &lzw::encode(2, &pixels).expect("pixels fit the code size"),
        ));
    }

    gif.push(0x3B);
    gif
}
