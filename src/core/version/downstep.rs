use thiserror::Error;

/// Why a game version cannot be stepped down any further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownstepError {
    #[error("{0} is a snapshot, prerelease, release candidate, or April Fools' update, and cannot be decremented")]
    NotNumeric(String),

    /// Carries the two-component base (`1.20` for both `1.20` and `1.20.0`).
    #[error("{0} is a base version and cannot be decremented")]
    BaseVersion(String),

    #[error("{0} does not have the major.minor[.patch] shape and cannot be decremented")]
    Unsupported(String),
}

impl DownstepError {
    /// The family of versions that was searched, e.g. `1.20.x`.
    pub fn exhausted_label(&self) -> String {
        match self {
            DownstepError::BaseVersion(base) => format!("{base}.x"),
            DownstepError::NotNumeric(version) | DownstepError::Unsupported(version) => {
                version.clone()
            }
        }
    }
}

/// The next lower patch release of a numeric game version.
///
/// `1.20.4` → `1.20.3`, `1.20.1` → `1.20`. Two-component versions are the
/// bottom of their family.
pub fn downstep(version: &str) -> Result<String, DownstepError> {
    let parts: Vec<&str> = version.split('.').collect();

    if !parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(DownstepError::NotNumeric(version.to_string()));
    }

    match parts.as_slice() {
        [major, minor] => Err(DownstepError::BaseVersion(format!("{major}.{minor}"))),
        [major, minor, patch] => {
            let base = format!("{major}.{minor}");
            let patch: u64 = patch
                .parse()
                .map_err(|_| DownstepError::NotNumeric(version.to_string()))?;
            match patch {
                0 => Err(DownstepError::BaseVersion(base)),
                1 => Ok(base),
                n => Ok(format!("{base}.{}", n - 1)),
            }
        }
        _ => Err(DownstepError::Unsupported(version.to_string())),
    }
}
