//! Photo files on local disk.
//!
//! Files live flat in [`ServerConfig::upload_dir`](crate::config::ServerConfig)
//! under their stored name, which is also the `photos.filename` column.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use friendtrip_core::naming::with_suffix;
use friendtrip_db::repositories::PhotoRepo;
use friendtrip_db::DbPool;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};

/// Highest numeric suffix tried before giving up on a colliding name.
const MAX_NAME_SUFFIX: u32 = 1000;

/// Absolute location of a stored photo.
pub fn photo_path(upload_dir: &Path, filename: &str) -> PathBuf {
    upload_dir.join(filename)
}

/// Remove a stored photo. A file that is already gone yields `Ok(false)`.
pub async fn remove_photo_file(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Write `bytes` to `path` only if nothing exists there yet.
async fn write_new_file(path: &Path, bytes: &[u8]) -> std::io::Result<bool> {
    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(true)
}

/// Store an upload under `base` or, if that name is taken on disk or in the
/// database, under `base` with the first free `_{n}` suffix.
///
/// Returns the name the file was written under.
pub async fn store_unique(
    pool: &DbPool,
    upload_dir: &Path,
    base: &str,
    bytes: &[u8],
) -> AppResult<String> {
    for n in 0..=MAX_NAME_SUFFIX {
        let candidate = if n == 0 {
            base.to_string()
        } else {
            with_suffix(base, n)
        };

        if PhotoRepo::filename_exists(pool, &candidate).await? {
            continue;
        }

        let written = write_new_file(&photo_path(upload_dir, &candidate), bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to save {candidate}: {e}")))?;
        if written {
            return Ok(candidate);
        }
    }

    Err(AppError::InternalError(format!(
        "No free file name for {base}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_new_file_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");

        assert!(write_new_file(&path, b"first").await.unwrap());
        assert!(!write_new_file(&path, b"second").await.unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn remove_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        assert!(!remove_photo_file(&path).await.unwrap());

        std::fs::write(&path, b"x").unwrap();
        assert!(remove_photo_file(&path).await.unwrap());
        assert!(!path.exists());
    }
}
