use async_trait::async_trait;
use tracing::debug;

use super::model::ProjectVersion;
use super::ModHost;
use crate::core::error::UpdaterResult;
use crate::core::http::ensure_success;

pub const MODRINTH_API_BASE: &str = "https://api.modrinth.com/v2";

/// Read-only client for the Modrinth v2 API.
pub struct ModrinthClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModrinthClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn versions_url(&self, project_id: &str) -> String {
        format!(
            "{}/project/{}/version",
            self.base_url.trim_end_matches('/'),
            project_id
        )
    }
}

#[async_trait]
impl ModHost for ModrinthClient {
    async fn list_versions(&self, project_id: &str) -> UpdaterResult<Vec<ProjectVersion>> {
        let url = self.versions_url(project_id);
        debug!("GET {}", url);

        let versions: Vec<ProjectVersion> = ensure_success(self.client.get(&url).send().await?)?
            .json()
            .await?;

        debug!("{} lists {} builds", project_id, versions.len());
        Ok(versions)
    }
}
