use super::selector::StabilityMode;
use crate::core::version::{downstep, DownstepError};

/// One (game version, stability) combination to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub game_version: String,
    pub mode: StabilityMode,
}

/// Retry policy for a mod with no build at the desired version.
///
/// Every version is tried with releases only first. Prereleases are only
/// tried at the same version when the release-only attempt reported that
/// some build existed. Otherwise, and after a prerelease attempt, the
/// version is stepped down and the search starts over with releases only.
#[derive(Debug, Clone)]
pub struct SearchLadder {
    current: Attempt,
}

/// What the ladder does after a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Same version, prereleases allowed.
    Prerelease,
    /// Lower version, releases only.
    Downstep,
}

impl SearchLadder {
    pub fn new(game_version: impl Into<String>) -> Self {
        Self {
            current: Attempt {
                game_version: game_version.into(),
                mode: StabilityMode::ReleaseOnly,
            },
        }
    }

    pub fn current(&self) -> &Attempt {
        &self.current
    }

    /// Move to the next attempt after the current one found nothing.
    ///
    /// Fails when the version can no longer be stepped down; the ladder is
    /// left on its last attempt.
    pub fn advance(&mut self, any_build_existed: bool) -> Result<Step, DownstepError> {
        if self.current.mode == StabilityMode::ReleaseOnly && any_build_existed {
            self.current.mode = StabilityMode::AllowPrerelease;
            return Ok(Step::Prerelease);
        }

        let lower = downstep(&self.current.game_version)?;
        self.current = Attempt {
            game_version: lower,
            mode: StabilityMode::ReleaseOnly,
        };
        Ok(Step::Downstep)
    }
}
