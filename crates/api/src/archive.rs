//! In-memory ZIP archives for album and selection downloads.

use std::fs::File;
use std::io::{Cursor, ErrorKind, Write};
use std::path::PathBuf;

use friendtrip_core::error::CoreError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One archive member: the name inside the ZIP and the file to read.
pub type ArchiveEntry = (String, PathBuf);

/// Build a deflate-compressed ZIP of `entries`.
///
/// Paths that no longer exist are skipped. Duplicate names are stored once.
/// Blocking; call via [`build_zip_blocking`] from async code.
pub fn build_zip(entries: Vec<ArchiveEntry>) -> Result<Vec<u8>, CoreError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = std::collections::HashSet::new();

    for (name, path) in entries {
        if !seen.insert(name.clone()) {
            continue;
        }
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Skipping missing file in archive");
                continue;
            }
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| CoreError::Internal(format!("Zip error: {e}")))?;
        std::io::copy(&mut file, &mut writer)
            .map_err(|e| CoreError::Internal(format!("Zip write error: {e}")))?;
    }

    let mut cursor = writer
        .finish()
        .map_err(|e| CoreError::Internal(format!("Zip error: {e}")))?;
    cursor
        .flush()
        .map_err(|e| CoreError::Internal(format!("Zip write error: {e}")))?;
    Ok(cursor.into_inner())
}

/// Run [`build_zip`] on the blocking thread pool.
pub async fn build_zip_blocking(entries: Vec<ArchiveEntry>) -> Result<Vec<u8>, CoreError> {
    tokio::task::spawn_blocking(move || build_zip(entries))
        .await
        .map_err(|e| CoreError::Internal(format!("Archive task failed: {e}")))?
}
