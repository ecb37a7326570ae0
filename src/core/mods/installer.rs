use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::core::downloader::{ensure_verified_file, EnsureOutcome, FileFetcher};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::modrinth::VersionFile;

/// A file left behind because removing it failed.
#[derive(Debug)]
pub struct CleanupFailure {
    pub filename: String,
    pub error: std::io::Error,
}

#[derive(Debug)]
pub enum InstallOutcome {
    /// The selected file was already present and verified.
    Skipped,
    Installed {
        /// A non-matching file with the target name was removed first.
        replaced_foreign: bool,
        /// Old versions of this mod that were deleted.
        removed: Vec<String>,
        cleanup_failures: Vec<CleanupFailure>,
    },
}

/// Places a selected build's file in a mods folder and prunes older builds.
pub struct ModInstaller<'a> {
    fetcher: &'a dyn FileFetcher,
}

impl<'a> ModInstaller<'a> {
    pub fn new(fetcher: &'a dyn FileFetcher) -> Self {
        Self { fetcher }
    }

    /// Install `selected` into `mods_dir`.
    ///
    /// `known_filenames` are the primary filenames of every build of this
    /// mod; files in `mods_dir` with one of those names are old versions and
    /// are deleted once the new file is verified. Nothing is deleted when the
    /// file was already present, or when the download fails verification.
    pub async fn install(
        &self,
        selected: &VersionFile,
        known_filenames: &[String],
        mods_dir: &Path,
    ) -> UpdaterResult<InstallOutcome> {
        let target = mods_dir.join(&selected.filename);

        // Snapshot before anything is written.
        let installed = list_filenames(mods_dir).await?;
        let known: HashSet<&str> = known_filenames.iter().map(String::as_str).collect();
        let mut old_versions: Vec<String> = installed
            .into_iter()
            .filter(|name| name != &selected.filename && known.contains(name.as_str()))
            .collect();
        old_versions.sort();

        let outcome = ensure_verified_file(
            self.fetcher,
            &selected.url,
            &target,
            &selected.identifiers(),
        )
        .await?;

        let replaced_foreign = match outcome {
            EnsureOutcome::AlreadyPresent => return Ok(InstallOutcome::Skipped),
            EnsureOutcome::Downloaded { replaced_foreign } => replaced_foreign,
        };
        debug!("Installed {}", selected.filename);

        let mut removed = Vec::new();
        let mut cleanup_failures = Vec::new();
        for filename in old_versions {
            match tokio::fs::remove_file(mods_dir.join(&filename)).await {
                Ok(()) => {
                    debug!("Removed old version {}", filename);
                    removed.push(filename);
                }
                Err(error) => cleanup_failures.push(CleanupFailure { filename, error }),
            }
        }

        Ok(InstallOutcome::Installed {
            replaced_foreign,
            removed,
            cleanup_failures,
        })
    }
}

async fn list_filenames(dir: &Path) -> UpdaterResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| UpdaterError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| UpdaterError::io(dir, e))?
    {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}
