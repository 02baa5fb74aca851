use std::path::{Path, PathBuf};

use super::shared::open_source;
use crate::gif::GifStream;
use crate::result::Result;
use crate::GifStegoError;

pub fn prepare() -> RecoverApi {
    RecoverApi::default()
}

#[derive(Default, Debug)]
pub struct RecoverApi {
    secret_gif: Option<PathBuf>,
}

impl RecoverApi {
    /// This is the GIF that contains the data to be recovered
    pub fn from_secret_file(mut self, secret_gif: impl AsRef<Path>) -> Self {
        self.secret_gif = Some(secret_gif.as_ref().to_path_buf());
        self
    }

    /// Execute the recover pass, returns one blob per frame in frame order
    ///
    /// Frames without hidden data yield an empty blob.
    pub fn execute(self) -> Result<Vec<Vec<u8>>> {
        let Some(secret_gif) = self.secret_gif else {
            return Err(GifStegoError::SourceNotSet);
        };

        let stream = GifStream::recover(open_source(&secret_gif)?)?;

        Ok(stream.blobs)
    }
}
