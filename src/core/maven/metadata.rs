use quick_xml::de::from_str;
use serde::Deserialize;

use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::http::ensure_success;

/// Minimal `maven-metadata.xml` model – only the version pointers.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MavenMetadata {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Versioning {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Option<Versions>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Versions {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(xml: &str) -> UpdaterResult<Self> {
        Ok(from_str(xml)?)
    }

    pub async fn fetch(client: &reqwest::Client, url: &str) -> UpdaterResult<Self> {
        let xml = ensure_success(client.get(url).send().await?)?
            .text()
            .await?;
        Self::parse(&xml)
    }

    /// `<latest>`, falling back to `<release>` and then the last listed version.
    pub fn latest_version(&self) -> UpdaterResult<&str> {
        let versioning = self.versioning.as_ref();
        versioning
            .and_then(|v| v.latest.as_deref())
            .or_else(|| versioning.and_then(|v| v.release.as_deref()))
            .or_else(|| {
                versioning
                    .and_then(|v| v.versions.as_ref())
                    .and_then(|v| v.items.last())
                    .map(String::as_str)
            })
            .ok_or_else(|| {
                UpdaterError::Loader(format!(
                    "maven-metadata.xml for {} lists no versions",
                    self.artifact_id.as_deref().unwrap_or("artifact")
                ))
            })
    }
}
