use std::path::Path;

use tracing::debug;

use super::installer::{InstallOutcome, ModInstaller};
use super::ladder::{Attempt, SearchLadder, Step};
use super::selector::{select_build, StabilityMode};
use crate::core::config::ModReference;
use crate::core::downloader::FileFetcher;
use crate::core::modrinth::{primary_filenames, ModHost};
use crate::core::report::{english_list, RunSummary};

/// Where and for what a mod is being installed.
#[derive(Debug, Clone, Copy)]
pub struct UpdateTarget<'a> {
    pub game_version: &'a str,
    pub loader: &'a str,
    pub mods_dir: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModStatus {
    /// The chosen build was already installed.
    UpToDate { filename: String },
    Installed { filename: String },
    /// No build down to the base version of the family.
    Unresolved,
    /// The hosting API or the download failed.
    Failed,
}

/// What happened to one mod.
#[derive(Debug, Clone)]
pub struct ModUpdate {
    /// Every (version, stability) combination searched, in order.
    pub attempts: Vec<Attempt>,
    pub status: ModStatus,
}

/// Find the best build of `mod_ref` for `target` and install it.
///
/// Walks the [`SearchLadder`] until a build matches, re-listing the
/// project's builds for each attempt. Every outcome is reported to
/// `summary`; this never fails.
pub async fn update_mod(
    host: &dyn ModHost,
    fetcher: &dyn FileFetcher,
    mod_ref: &ModReference,
    target: UpdateTarget<'_>,
    summary: &mut RunSummary,
) -> ModUpdate {
    let name = mod_ref.display_name.as_str();
    let mut ladder = SearchLadder::new(target.game_version);
    let mut attempts = Vec::new();

    loop {
        let attempt = ladder.current().clone();
        debug!(
            "Searching {} for {} ({:?})",
            name, attempt.game_version, attempt.mode
        );
        attempts.push(attempt.clone());

        let candidates = match host.list_versions(&mod_ref.id).await {
            Ok(candidates) => candidates,
            Err(e) => {
                summary.error(format!("{e}. Could not download {name}."));
                return ModUpdate {
                    attempts,
                    status: ModStatus::Failed,
                };
            }
        };

        let miss = match select_build(
            name,
            &candidates,
            &attempt.game_version,
            target.loader,
            attempt.mode,
        ) {
            Ok(build) => {
                let status = install_build(
                    fetcher,
                    name,
                    build.primary_file(),
                    &primary_filenames(&candidates),
                    &attempt.game_version,
                    target.mods_dir,
                    summary,
                )
                .await;
                return ModUpdate { attempts, status };
            }
            Err(miss) => miss,
        };

        summary.warning(&miss);
        if attempt.mode == StabilityMode::ReleaseOnly && !miss.any_build_existed {
            summary.info_warn(format!(
                "Did not find alpha/beta/prereleases of {name} for {}.",
                attempt.game_version
            ));
        }

        match ladder.advance(miss.any_build_existed) {
            Ok(Step::Prerelease) => summary.info("Checking alpha/beta/prereleases..."),
            Ok(Step::Downstep) => summary.info(format!(
                "Checking for {name} versions compatible with Minecraft {}...",
                ladder.current().game_version
            )),
            Err(exhausted) => {
                summary.error(format!(
                    "Could not find {name} for {}",
                    exhausted.exhausted_label()
                ));
                return ModUpdate {
                    attempts,
                    status: ModStatus::Unresolved,
                };
            }
        }
    }
}

async fn install_build(
    fetcher: &dyn FileFetcher,
    name: &str,
    file: Option<&crate::core::modrinth::VersionFile>,
    known_filenames: &[String],
    game_version: &str,
    mods_dir: &Path,
    summary: &mut RunSummary,
) -> ModStatus {
    // The selector only returns builds that have a file.
    let Some(file) = file else {
        summary.error(format!("The selected build of {name} has no files."));
        return ModStatus::Failed;
    };

    summary.info(format!(
        "Installing {} for {} from Modrinth...",
        file.filename, game_version
    ));

    let outcome = match ModInstaller::new(fetcher)
        .install(file, known_filenames, mods_dir)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            summary.error(format!("{e}. Could not download {name}."));
            return ModStatus::Failed;
        }
    };

    match outcome {
        InstallOutcome::Skipped => {
            summary.info(format!(
                "The latest version of {name} compatible with {game_version} is already present. Skipping download."
            ));
            ModStatus::UpToDate {
                filename: file.filename.clone(),
            }
        }
        InstallOutcome::Installed {
            replaced_foreign,
            removed,
            cleanup_failures,
        } => {
            if replaced_foreign {
                summary.warning(format!(
                    "{} already existed, but was not a valid copy of {name} and was overwritten.",
                    file.filename
                ));
            }
            summary.info("Download complete.");
            if !removed.is_empty() {
                summary.info(format!(
                    "Removed old version{} of {name}: {}.",
                    if removed.len() == 1 { "" } else { "s" },
                    english_list(&removed)
                ));
            }
            for failure in cleanup_failures {
                summary.warning(format!(
                    "{}. Removing old version {} of {name} failed. Inspecting the mods folder is recommended.",
                    failure.error, failure.filename
                ));
            }
            ModStatus::Installed {
                filename: file.filename.clone(),
            }
        }
    }
}
