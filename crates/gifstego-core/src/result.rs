use crate::GifStegoError;

pub type Result<T> = std::result::Result<T, GifStegoError>;
