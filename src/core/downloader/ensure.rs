use std::path::Path;

use tracing::debug;

use super::client::FileFetcher;
use super::verify::{matches_identifiers, FileIdentifiers};
use crate::core::error::{DownloadError, UpdaterError, UpdaterResult};

/// Result of making sure a verified copy of a file exists at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A file with the expected identifiers was already there; nothing fetched.
    AlreadyPresent,
    /// The file was fetched and verified. `replaced_foreign` is set when a
    /// different file with the same name had to be removed first.
    Downloaded { replaced_foreign: bool },
}

/// Make `dest` hold a file matching `expected`, fetching it from `url` if needed.
///
/// A file that fails verification is never left at `dest`: a stale file is
/// removed before fetching and a corrupt download is removed before the
/// error is returned.
pub async fn ensure_verified_file(
    fetcher: &dyn FileFetcher,
    url: &str,
    dest: &Path,
    expected: &FileIdentifiers,
) -> UpdaterResult<EnsureOutcome> {
    let mut replaced_foreign = false;

    if is_file(dest).await {
        if matches_identifiers(dest, expected).await? {
            debug!("{:?} already matches, skipping download", dest);
            return Ok(EnsureOutcome::AlreadyPresent);
        }
        remove(dest).await?;
        replaced_foreign = true;
    }

    if let Err(e) = fetcher.fetch(url, dest).await {
        discard(dest).await;
        return Err(e);
    }

    if !matches_identifiers(dest, expected).await? {
        remove(dest).await?;
        return Err(DownloadError::IntegrityMismatch {
            path: dest.to_path_buf(),
        }
        .into());
    }

    debug!("Verified {:?}", dest);
    Ok(EnsureOutcome::Downloaded { replaced_foreign })
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn remove(path: &Path) -> UpdaterResult<()> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| UpdaterError::io(path, e))
}

/// Best-effort removal of a partial download; the fetch error is what matters.
async fn discard(path: &Path) {
    if is_file(path).await {
        if let Err(e) = tokio::fs::remove_file(path).await {
            debug!("Could not remove partial download {:?}: {}", path, e);
        }
    }
}
