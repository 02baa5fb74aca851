//! Variable-width LZW as used for GIF image data.
//!
//! Codes are packed least significant bit first across byte boundaries.
//! Both directions share the same table growth rule, so that for every
//! sequence `y` of pixel indices `decode(m, &encode(m, &y)?, y.len())? == y` holds.
//! Re-encoding a decoded stream does not reproduce the original bytes.

use std::collections::HashMap;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};
use log::debug;

use crate::result::Result;
use crate::{GifStegoError, PixelIndex};

/// Code widths never grow beyond this, except for a minimum code size of 12
/// where the initial width already is 13 bits.
pub const MAX_CODE_WIDTH: u8 = 12;

/// Largest minimum code size accepted by [`decode`] and [`encode`].
pub const MAX_MIN_CODE_SIZE: u8 = 12;

/// Returns true if the codec can handle the given minimum code size.
pub fn is_supported_code_size(min_code_size: u8) -> bool {
    (1..=MAX_MIN_CODE_SIZE).contains(&min_code_size)
}

/// Code numbering shared by encoder and decoder.
#[derive(Debug, Clone, Copy)]
struct CodeSpace {
    min_code_size: u8,
    clear: u16,
    end: u16,
    /// number of codes the table may hold at the widest code width
    limit: u32,
}

impl CodeSpace {
    fn new(min_code_size: u8) -> Result<Self> {
        if !is_supported_code_size(min_code_size) {
            return Err(GifStegoError::UnsupportedCodeSize(min_code_size));
        }
        let clear = 1u16 << min_code_size;
        let widest = MAX_CODE_WIDTH.max(min_code_size + 1);

        Ok(Self {
            min_code_size,
            clear,
            end: clear + 1,
            limit: 1 << widest,
        })
    }

    fn first_free(&self) -> u16 {
        self.end + 1
    }

    fn initial_width(&self) -> u8 {
        self.min_code_size + 1
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: Option<u16>,
    suffix: PixelIndex,
    first: PixelIndex,
    len: usize,
}

/// code -> string table of the decoder, strings are stored as prefix chains
struct DecodeTable {
    entries: Vec<Entry>,
}

impl DecodeTable {
    fn new(space: &CodeSpace) -> Self {
        let mut table = Self {
            entries: Vec::with_capacity(space.limit as usize),
        };
        table.reset(space);
        table
    }

    fn reset(&mut self, space: &CodeSpace) {
        self.entries.clear();
        self.entries.extend((0..space.clear).map(|symbol| Entry {
            prefix: None,
            suffix: symbol,
            first: symbol,
            len: 1,
        }));
        // placeholders for the clear and end code, never emitted
        for _ in 0..2 {
            self.entries.push(Entry {
                prefix: None,
                suffix: 0,
                first: 0,
                len: 0,
            });
        }
    }

    fn next_code(&self) -> u16 {
        self.entries.len() as u16
    }

    fn contains(&self, code: u16) -> bool {
        (code as usize) < self.entries.len()
    }

    fn push(&mut self, prefix: u16, suffix: PixelIndex) {
        let parent = self.entries[prefix as usize];
        self.entries.push(Entry {
            prefix: Some(prefix),
            suffix,
            first: parent.first,
            len: parent.len + 1,
        });
    }

    fn write_string(&self, code: u16, output: &mut Vec<PixelIndex>) {
        let len = self.entries[code as usize].len;
        let start = output.len();
        output.resize(start + len, 0);

        let mut pos = output.len();
        let mut cursor = Some(code);
        while let Some(c) = cursor {
            let entry = &self.entries[c as usize];
            pos -= 1;
            output[pos] = entry.suffix;
            cursor = entry.prefix;
        }
    }
}

/// Decodes the concatenated sub-block payload of one image into at most
/// `limit` pixel indices.
///
/// Reading stops at the end code, when the data runs out or once `limit`
/// indices are decoded, truncated or garbage input never panics. A code that
/// is neither known nor the deferred next entry yields
/// [`GifStegoError::CorruptLzwStream`].
pub fn decode(min_code_size: u8, data: &[u8], limit: usize) -> Result<Vec<PixelIndex>> {
    let space = CodeSpace::new(min_code_size)?;
    let mut table = DecodeTable::new(&space);
    let mut reader = BitReader::endian(data, LittleEndian);
    let mut width = space.initial_width();
    let mut previous: Option<u16> = None;
    let mut output = Vec::new();

    loop {
        // the encoder is one table entry ahead while a previous code exists
        if previous.is_some()
            && u32::from(table.next_code()) >= 1 << width
            && width < MAX_CODE_WIDTH
        {
            width += 1;
        }

        let code: u16 = match reader.read(u32::from(width)) {
            Ok(code) => code,
            Err(_) => {
                debug!("lzw data exhausted without an end code");
                break;
            }
        };

        if code == space.clear {
            table.reset(&space);
            width = space.initial_width();
            previous = None;
            continue;
        }
        if code == space.end {
            break;
        }

        let next = table.next_code();
        let first = match previous {
            _ if table.contains(code) => table.entries[code as usize].first,
            Some(prev) if code == next && u32::from(next) < space.limit => {
                table.entries[prev as usize].first
            }
            _ => return Err(GifStegoError::CorruptLzwStream { code, next }),
        };

        if let Some(prev) = previous {
            if u32::from(next) < space.limit {
                table.push(prev, first);
            }
        }
        table.write_string(code, &mut output);
        previous = Some(code);

        if output.len() >= limit {
            debug!("lzw output reached the limit of {} pixel indices", limit);
            output.truncate(limit);
            break;
        }
    }

    Ok(output)
}

/// Encodes pixel indices into an LZW stream, starting with a clear code and
/// terminated by the end code, zero padded to a full byte.
pub fn encode(min_code_size: u8, pixels: &[PixelIndex]) -> Result<Vec<u8>> {
    let space = CodeSpace::new(min_code_size)?;
    let mut table: HashMap<(u16, PixelIndex), u16> = HashMap::new();
    let mut writer = BitWriter::endian(Vec::new(), LittleEndian);
    let mut width = space.initial_width();
    let mut next = u32::from(space.first_free());
    let mut current: Option<u16> = None;

    writer.write(u32::from(width), space.clear)?;

    for &pixel in pixels {
        if pixel >= space.clear {
            return Err(GifStegoError::PixelIndexOutOfRange {
                index: pixel,
                min_code_size,
            });
        }

        current = match current {
            None => Some(pixel),
            Some(prefix) => match table.get(&(prefix, pixel)) {
                Some(&code) => Some(code),
                None => {
                    writer.write(u32::from(width), prefix)?;
                    if next < space.limit {
                        table.insert((prefix, pixel), next as u16);
                        next += 1;
                        if next > 1 << width && width < MAX_CODE_WIDTH {
                            width += 1;
                        }
                    }
                    Some(pixel)
                }
            },
        };
    }

    if let Some(code) = current {
        writer.write(u32::from(width), code)?;
    }
    writer.write(u32::from(width), space.end)?;
    writer.byte_align()?;

    Ok(writer.into_writer())
}
