use std::path::{Path, PathBuf};

use log::info;

use super::shared::{open_source, read_file, write_file};
use crate::gif::{FrameNotice, GifStream};
use crate::result::Result;
use crate::GifStegoError;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    files: Option<Vec<PathBuf>>,
    payloads: Option<Vec<Vec<u8>>>,
    gif: Option<PathBuf>,
    output: Option<PathBuf>,
}

/// What a hide pass did to the frames of the GIF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideReport {
    pub frames: usize,
    /// frames that carry a payload now
    pub embedded: Vec<usize>,
    pub notices: Vec<FrameNotice>,
    pub unused_payloads: usize,
    pub truncated: bool,
}

impl HideApi {
    pub fn with_files(mut self, data_files: Vec<PathBuf>) -> Self {
        self.files = Some(data_files);
        self
    }

    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        let data_file = data_file.as_ref().to_path_buf();
        if let Some(files) = &mut self.files {
            files.push(data_file);
        } else {
            self.files = Some(vec![data_file]);
        }
        self
    }

    /// Hide raw bytes, they are hidden after the payloads of all files
    pub fn with_payloads(mut self, payloads: Vec<Vec<u8>>) -> Self {
        self.payloads = Some(payloads);
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payloads.get_or_insert_with(Vec::new).push(payload.into());
        self
    }

    /// This is the GIF the payloads are hidden in
    pub fn with_gif<A: AsRef<Path>>(mut self, gif: A) -> Self {
        self.gif = Some(gif.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Execute the hide pass and write the output GIF once it is complete
    pub fn execute(self) -> Result<HideReport> {
        self.validate()?;
        let Some(gif) = self.gif else {
            return Err(GifStegoError::SourceNotSet);
        };
        let Some(output) = self.output else {
            return Err(GifStegoError::TargetNotSet);
        };

        let mut payloads = Vec::new();
        for file in self.files.iter().flatten() {
            info!("We will hide: {}", file.display());
            payloads.push(read_file(file)?);
        }
        payloads.extend(self.payloads.into_iter().flatten());

        let stream = GifStream::hide(open_source(&gif)?, payloads)?;
        let report = HideReport {
            frames: stream.frame_count(),
            embedded: stream.embedded.clone(),
            notices: stream.notices.clone(),
            unused_payloads: stream.unused_payloads,
            truncated: stream.truncated,
        };

        info!("writing {}", output.display());
        write_file(&output, stream.output())?;

        Ok(report)
    }

    fn validate(&self) -> Result<()> {
        if self.files.is_none() && self.payloads.is_none() {
            return Err(GifStegoError::MissingFiles);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::test_utils::GifBuilder;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.gif");
        std::fs::write(&carrier, GifBuilder::new(8, 8).frame_with_pattern().build())
            .expect("Failed to write carrier");

        let report = crate::api::hide::prepare()
            .with_payload("hi")
            .with_gif(&carrier)
            .with_output(temp_dir.path().join("gif-with-secret.gif"))
            .execute()
            .expect("Failed to hide payload in gif");

        assert_eq!(report.embedded, vec![0]);
        assert!(report.notices.is_empty());
    }

    #[test]
    fn should_fail_without_anything_to_hide() {
        let result = crate::api::hide::prepare()
            .with_gif("some.gif")
            .with_output("other.gif")
            .execute();

        assert!(matches!(result, Err(crate::GifStegoError::MissingFiles)));
    }

    #[test]
    fn should_fail_without_a_source() {
        let result = crate::api::hide::prepare()
            .with_payload("x")
            .with_output("other.gif")
            .execute();

        assert!(matches!(result, Err(crate::GifStegoError::SourceNotSet)));
    }
}
