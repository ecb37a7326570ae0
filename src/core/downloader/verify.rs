// ─── File Verification ───
// Single-pass SHA-1 + SHA-512 check of a file on disk.

use std::path::Path;

use sha1::{Digest, Sha1};
use sha2::Sha512;
use tokio::io::AsyncReadExt;

use crate::core::error::{UpdaterError, UpdaterResult};

/// Read buffer used while hashing.
const BUFFER_SIZE: usize = 64 * 1024;

/// What a file is expected to look like. Any field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIdentifiers {
    pub sha1: Option<String>,
    pub sha512: Option<String>,
    pub size: Option<u64>,
}

impl FileIdentifiers {
    pub fn is_empty(&self) -> bool {
        self.sha1.is_none() && self.sha512.is_none() && self.size.is_none()
    }
}

/// Check a file against every identifier that is known.
///
/// A size mismatch rejects without reading the file. Both digests are
/// computed in one streaming pass; SHA-1 is compared before SHA-512.
pub async fn matches_identifiers(path: &Path, expected: &FileIdentifiers) -> UpdaterResult<bool> {
    if expected.is_empty() {
        return Err(UpdaterError::NoFileIdentifiers);
    }

    if let Some(size) = expected.size {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| UpdaterError::io(path, e))?;
        if metadata.len() != size {
            return Ok(false);
        }
    }

    if expected.sha1.is_none() && expected.sha512.is_none() {
        return Ok(true);
    }

    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| UpdaterError::io(path, e))?;
    let mut sha1 = Sha1::new();
    let mut sha512 = Sha512::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .await
            .map_err(|e| UpdaterError::io(path, e))?;
        if read == 0 {
            break;
        }
        sha1.update(&buffer[..read]);
        sha512.update(&buffer[..read]);
    }

    if let Some(expected_sha1) = &expected.sha1 {
        if !hex::encode(sha1.finalize()).eq_ignore_ascii_case(expected_sha1) {
            return Ok(false);
        }
    }

    if let Some(expected_sha512) = &expected.sha512 {
        return Ok(hex::encode(sha512.finalize()).eq_ignore_ascii_case(expected_sha512));
    }

    Ok(true)
}
