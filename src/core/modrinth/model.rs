use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::downloader::FileIdentifiers;

/// Stability classification of a published build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Release,
    Beta,
    Alpha,
    #[serde(other)]
    Unknown,
}

/// One published build of a project, as listed by `GET /project/{id}/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectVersion {
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    pub version_type: VersionType,
    pub date_published: DateTime<Utc>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionFile {
    #[serde(default)]
    pub primary: bool,
    pub filename: String,
    pub url: String,
    pub size: u64,
    #[serde(default)]
    pub hashes: FileHashes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileHashes {
    pub sha1: Option<String>,
    pub sha512: Option<String>,
}

impl ProjectVersion {
    /// The file flagged primary, or the first file when none is flagged.
    pub fn primary_file(&self) -> Option<&VersionFile> {
        self.files
            .iter()
            .find(|f| f.primary)
            .or_else(|| self.files.first())
    }

    pub fn is_release(&self) -> bool {
        self.version_type == VersionType::Release
    }

    pub fn supports(&self, game_version: &str, loader: &str) -> bool {
        self.game_versions.iter().any(|v| v == game_version)
            && self.loaders.iter().any(|l| l.eq_ignore_ascii_case(loader))
    }
}

impl VersionFile {
    pub fn identifiers(&self) -> FileIdentifiers {
        FileIdentifiers {
            sha1: self.hashes.sha1.clone(),
            sha512: self.hashes.sha512.clone(),
            size: Some(self.size),
        }
    }
}

/// Primary filenames of every build, in API order.
pub fn primary_filenames(versions: &[ProjectVersion]) -> Vec<String> {
    versions
        .iter()
        .filter_map(|v| v.primary_file())
        .map(|f| f.filename.clone())
        .collect()
}
