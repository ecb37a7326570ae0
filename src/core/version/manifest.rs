// ─── Version Manifest ───
// Handles fetching and parsing the Mojang version manifest v2.

use serde::Deserialize;
use tracing::debug;

use crate::core::error::UpdaterResult;
use crate::core::http::ensure_success;

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionEntry>,
}

/// Pointers to the newest release and snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
    pub url: String,
    #[serde(default)]
    pub sha1: Option<String>,
}

impl VersionManifest {
    /// Fetch the version manifest using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> UpdaterResult<Self> {
        debug!("Fetching Minecraft version manifest...");

        let manifest: VersionManifest = ensure_success(client.get(url).send().await?)?
            .json()
            .await?;

        debug!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}
