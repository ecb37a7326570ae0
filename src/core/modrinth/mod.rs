mod client;
mod model;

use async_trait::async_trait;

pub use client::{ModrinthClient, MODRINTH_API_BASE};
pub use model::{primary_filenames, FileHashes, ProjectVersion, VersionFile, VersionType};

use crate::core::error::UpdaterResult;

/// A mod-hosting API that lists the published builds of a project.
#[async_trait]
pub trait ModHost: Send + Sync {
    async fn list_versions(&self, project_id: &str) -> UpdaterResult<Vec<ProjectVersion>>;
}
