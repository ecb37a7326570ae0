use std::fmt;

use crate::core::modrinth::ProjectVersion;

/// Which builds are acceptable for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityMode {
    ReleaseOnly,
    /// Alphas, betas and prereleases are accepted alongside releases.
    AllowPrerelease,
}

impl fmt::Display for StabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityMode::ReleaseOnly => f.write_str("among full releases"),
            StabilityMode::AllowPrerelease => {
                f.write_str("including alpha/beta/prereleases")
            }
        }
    }
}

/// No build matched one (version, stability) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub message: String,
    /// Whether any build supported the version and loader before the
    /// stability filter was applied.
    pub any_build_existed: bool,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pick the most recently published build matching `game_version` and `loader`.
///
/// Builds without files are never selected. When several builds share the
/// newest timestamp, the last one in API order wins.
pub fn select_build<'a>(
    display_name: &str,
    candidates: &'a [ProjectVersion],
    game_version: &str,
    loader: &str,
    mode: StabilityMode,
) -> Result<&'a ProjectVersion, NotFound> {
    let compatible: Vec<&ProjectVersion> = candidates
        .iter()
        .filter(|c| c.supports(game_version, loader) && c.primary_file().is_some())
        .collect();
    let any_build_existed = !compatible.is_empty();

    compatible
        .into_iter()
        .filter(|c| mode == StabilityMode::AllowPrerelease || c.is_release())
        .max_by_key(|c| c.date_published)
        .ok_or_else(|| NotFound {
            message: format!("Cannot find {display_name} for {game_version} {mode}"),
            any_build_existed,
        })
}
