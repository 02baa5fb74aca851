use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::api::hide::HideReport;
use crate::api::{open_source, read_file, write_file};
use crate::gif::GifStream;
use crate::png::frame_to_png;
use crate::result::Result;
use crate::split::split_evenly;
use crate::GifStegoError;

/// Hides each of `files` in the successive frames of `source`, writes the result to `destination`.
pub fn hide(source: &Path, destination: &Path, files: &[PathBuf]) -> Result<HideReport> {
    info!(
        "Hiding files in {} and writing to {}",
        source.display(),
        destination.display()
    );

    crate::api::hide::prepare()
        .with_gif(source)
        .with_output(destination)
        .with_files(files.to_vec())
        .execute()
}

/// Writes the blob of the i-th frame to the i-th file, returns how many files were written.
pub fn recover(source: &Path, files: &[PathBuf]) -> Result<usize> {
    info!("Recovering files from {}", source.display());
    let blobs = crate::api::recover::prepare()
        .from_secret_file(source)
        .execute()?;

    let mut written = 0;
    for (index, file) in files.iter().enumerate() {
        match blobs.get(index) {
            Some(blob) => {
                info!("Recovering {} ({} bytes)", file.display(), blob.len());
                write_file(file, blob)?;
                written += 1;
            }
            None => warn!(
                "We don't have that many recovered blobs, skipping {}",
                file.display()
            ),
        }
    }

    Ok(written)
}

/// Dumps the structure of `gif` and renders every frame as `frame_<n>.png` into `output_folder`.
///
/// Frames that declare far more pixels than they decode to are skipped.
pub fn analyze(gif: &Path, output_folder: &Path) -> Result<String> {
    let stream = GifStream::inspect(open_source(gif)?)?;

    for (index, frame) in stream.frames.iter().enumerate() {
        let target = output_folder.join(format!("frame_{}.png", index));
        let png = match frame_to_png(frame, stream.color_table_for(frame)) {
            Ok(png) => png,
            Err(e @ GifStegoError::OversizedFrame { .. }) => {
                warn!("skipping frame {}: {}", index, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        info!("writing {}", target.display());
        write_file(&target, &png)?;
    }

    Ok(stream.to_string())
}

/// Splits `file` evenly across all frames of `source` and hides the chunks.
pub fn spread(source: &Path, destination: &Path, file: &Path) -> Result<HideReport> {
    info!(
        "Hiding {} across frames of {} and writing to {}",
        file.display(),
        source.display(),
        destination.display()
    );
    let payload = read_file(file)?;
    let frames = GifStream::inspect(open_source(source)?)?.frame_count();
    if frames == 0 {
        warn!("{} has no frames, nothing can be hidden", source.display());
    }

    let chunks = split_evenly(&payload, frames);
    for chunk in &chunks {
        info!("Chunk of size {}", chunk.len());
    }

    crate::api::hide::prepare()
        .with_gif(source)
        .with_output(destination)
        .with_payloads(chunks)
        .execute()
}

/// Concatenates the blobs of all frames of `source` into `file`.
pub fn gather(source: &Path, file: &Path) -> Result<()> {
    info!("Recovering {} from {}", file.display(), source.display());
    let blobs = crate::api::recover::prepare()
        .from_secret_file(source)
        .execute()?;

    for blob in &blobs {
        info!("Writing recovered blob of size {}", blob.len());
    }

    write_file(file, &blobs.concat())
}
