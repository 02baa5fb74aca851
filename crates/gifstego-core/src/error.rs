use thiserror::Error;

#[derive(Error, Debug)]
pub enum GifStegoError {
    /// Represents an LZW code that is neither in the dictionary nor the next assignable code
    #[error("Corrupt LZW stream: code {code} is unknown, next assignable code is {next}")]
    CorruptLzwStream { code: u16, next: u16 },

    /// Represents a payload (plus its marker) that does not fit the pixel indices of a frame
    #[error("Capacity Error: the payload requires {required} pixel indices but the frame only has {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// Represents an LZW minimum code size outside of 1..=12
    #[error("Unsupported LZW minimum code size: {0}")]
    UnsupportedCodeSize(u8),

    /// Represents a pixel index that cannot be expressed with the given minimum code size
    #[error("Pixel index {index} does not fit a minimum code size of {min_code_size}")]
    PixelIndexOutOfRange { index: u16, min_code_size: u8 },

    /// Represents a frame whose declared area is far larger than its decoded pixel indices
    #[error("Frame of {width}x{height} pixels is not backed by its {decoded} decoded pixel indices")]
    OversizedFrame {
        width: u32,
        height: u32,
        decoded: usize,
    },

    /// Represents a GIF stream that ended in the middle of a block.
    /// The parser turns this into a best-effort end of the block loop.
    #[error("GIF stream ended unexpectedly after {offset} bytes")]
    TruncatedStream { offset: usize },

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No source GIF set")]
    SourceNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing files")]
    MissingFiles,
}
