// ─── Version File ───
// The slice of a Mojang version JSON needed to fetch the dedicated server jar.

use serde::Deserialize;

use crate::core::downloader::FileIdentifiers;
use crate::core::error::UpdaterResult;
use crate::core::http::ensure_success;

#[derive(Debug, Deserialize)]
pub struct VersionJson {
    pub id: Option<String>,
    pub downloads: Option<VersionDownloads>,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub client: Option<DownloadArtifact>,
    pub server: Option<DownloadArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

impl DownloadArtifact {
    /// Mojang publishes size and SHA-1 only.
    pub fn identifiers(&self) -> FileIdentifiers {
        FileIdentifiers {
            sha1: Some(self.sha1.clone()),
            sha512: None,
            size: Some(self.size),
        }
    }
}

impl VersionJson {
    /// Fetch and parse a version JSON from the given URL using a shared client.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> UpdaterResult<Self> {
        let raw = ensure_success(client.get(url).send().await?)?
            .text()
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn server_download(&self) -> Option<&DownloadArtifact> {
        self.downloads.as_ref().and_then(|d| d.server.as_ref())
    }
}
