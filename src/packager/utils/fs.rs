//! File system utilities for packaging.
//!
//! All removals are idempotent: a path that is already absent is not an
//! error.

use crate::packager::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all directories of `path`. Succeeds if it already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
///
/// Returns whether anything was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
///
/// Returns whether anything was removed.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Checks whether `path` exists, following symlinks.
pub async fn exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .fs_context("checking existence of", path)
}
