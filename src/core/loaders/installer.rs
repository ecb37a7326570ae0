use async_trait::async_trait;

use crate::core::config::LoaderType;
use crate::core::error::UpdaterResult;
use crate::core::mods::CleanupFailure;

use super::{context::InstallContext, fabric::FabricInstaller, server_jar::ServerJar};

/// What a loader install left behind, for the run report.
#[derive(Debug, Default)]
pub struct LoaderInstallResult {
    pub installer_version: Option<String>,
    /// The installer jar ran but could not be deleted afterwards.
    pub installer_cleanup_failure: Option<CleanupFailure>,
    /// Set for server installations.
    pub server_jar: Option<ServerJar>,
}

#[async_trait]
pub trait LoaderInstaller: Send + Sync {
    async fn install(&self, ctx: InstallContext<'_>) -> UpdaterResult<LoaderInstallResult>;
}

/// Loaders that can be installed automatically, dispatched by variant.
pub enum Installer {
    Fabric(FabricInstaller),
}

impl Installer {
    /// `None` for loaders that cannot be installed automatically yet.
    pub fn new(loader: &LoaderType) -> Option<Self> {
        match loader {
            LoaderType::Fabric => Some(Self::Fabric(FabricInstaller::new())),
            LoaderType::Forge | LoaderType::NeoForge | LoaderType::Quilt | LoaderType::Other(_) => {
                None
            }
        }
    }

    pub async fn install(&self, ctx: InstallContext<'_>) -> UpdaterResult<LoaderInstallResult> {
        match self {
            Installer::Fabric(i) => i.install(ctx).await,
        }
    }
}
