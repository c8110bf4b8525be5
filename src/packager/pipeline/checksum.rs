//! Artifact checksum calculation.
//!
//! SHA-256 for the produced disk image, and for directory trees such as
//! `.app` bundles when comparing a staged copy with its source.

use crate::{
    bail,
    packager::Result,
    packager::error::ErrorExt,
};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of a file or directory tree.
///
/// Directory trees hash each regular file's relative path and content, both
/// length-prefixed, in sorted path order, so two trees with the same layout and
/// bytes hash identically regardless of where they live.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read or is neither file nor directory
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata", path)?;

    if metadata.is_file() {
        let mut hasher = Sha256::new();
        hash_file(path, &mut hasher).await?;
        Ok(format!("{:x}", hasher.finalize()))
    } else if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }
}

async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let len = entry.metadata()?.len();
            entries.push((entry.into_path(), len));
        }
    }
    entries.sort();

    let mut hasher = Sha256::new();
    for (path, len) in entries {
        if let Ok(rel_path) = path.strip_prefix(dir_path) {
            let rel_path = rel_path.to_string_lossy();
            hasher.update((rel_path.len() as u64).to_le_bytes());
            hasher.update(rel_path.as_bytes());
        }
        hasher.update(len.to_le_bytes());
        hash_file(&path, &mut hasher).await?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Feeds a file into `hasher` in 8KB chunks.
async fn hash_file(path: &Path, hasher: &mut Sha256) -> Result<()> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            return Ok(());
        }
        hasher.update(&buffer[..n]);
    }
}
