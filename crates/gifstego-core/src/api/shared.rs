use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use log::error;
use tempfile::NamedTempFile;

use crate::result::Result;
use crate::GifStegoError;

pub(crate) fn open_source(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|source| {
        error!("cannot open {}: {}", path.display(), source);
        GifStegoError::ReadError { source }
    })
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        error!("cannot read {}: {}", path.display(), source);
        GifStegoError::ReadError { source }
    })
}

/// Writes `data` next to `path` first and moves it into place once complete,
/// a failed write leaves neither a partial file nor a temporary one behind.
pub(crate) fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(folder).map_err(|source| {
        error!("cannot create a file in {}: {}", folder.display(), source);
        GifStegoError::WriteError { source }
    })?;

    file.write_all(data)
        .map_err(|source| GifStegoError::WriteError { source })?;

    file.persist(path).map_err(|e| {
        error!("cannot write {}: {}", path.display(), e.error);
        GifStegoError::WriteError { source: e.error }
    })?;

    Ok(())
}
