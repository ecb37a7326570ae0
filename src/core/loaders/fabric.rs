use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::context::InstallContext;
use super::installer::{LoaderInstallResult, LoaderInstaller};
use super::server_jar::{download_server_jar, write_launcher_properties};
use crate::core::config::Side;
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::java::find_java_binary;
use crate::core::maven::{MavenArtifact, MavenMetadata, FABRIC_INSTALLER};
use crate::core::mods::CleanupFailure;

pub struct FabricInstaller {
    java: PathBuf,
}

impl FabricInstaller {
    pub fn new() -> Self {
        Self::with_java(find_java_binary())
    }

    pub fn with_java(java: impl Into<PathBuf>) -> Self {
        Self { java: java.into() }
    }

    async fn fetch_installer(&self, ctx: &InstallContext<'_>) -> UpdaterResult<(String, PathBuf)> {
        let artifact = MavenArtifact::parse(FABRIC_INSTALLER)?;
        let metadata_url = artifact.metadata_url(&ctx.endpoints.fabric_maven);
        let metadata = MavenMetadata::fetch(ctx.http_client, &metadata_url).await?;
        let version = metadata.latest_version()?.to_string();

        let url = artifact
            .with_version(&version)
            .jar_url(&ctx.endpoints.fabric_maven)
            .ok_or_else(|| UpdaterError::InvalidMavenCoordinate(artifact.to_string()))?;
        let jar = ctx.directory.join(ctx.installer_name);

        debug!("Downloading Fabric installer {}...", version);
        ctx.downloader.download_file(&url, &jar).await?;
        Ok((version, jar))
    }

    async fn run_installer(&self, jar: &Path, ctx: &InstallContext<'_>) -> UpdaterResult<()> {
        let args = installer_args(jar, ctx.side, ctx.minecraft_version, ctx.directory);
        debug!("Running {:?} {:?}", self.java, args);

        let output = tokio::process::Command::new(&self.java)
            .args(&args)
            .current_dir(ctx.directory)
            .output()
            .await
            .map_err(|e| UpdaterError::JavaExecution(format!("{}: {}", self.java.display(), e)))?;

        if !output.status.success() {
            return Err(UpdaterError::Loader(format!(
                "Fabric installer failed (code {:?})\nSTDOUT:\n{}\nSTDERR:\n{}",
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )));
        }
        Ok(())
    }
}

impl Default for FabricInstaller {
    fn default() -> Self {
        Self::new()
    }
}

/// `-jar <jar> <client|server> -mcversion <V> -snapshot -dir <directory>`
pub fn installer_args(jar: &Path, side: Side, minecraft_version: &str, directory: &Path) -> Vec<String> {
    vec![
        "-jar".to_string(),
        jar.display().to_string(),
        side.to_string(),
        "-mcversion".to_string(),
        minecraft_version.to_string(),
        "-snapshot".to_string(),
        "-dir".to_string(),
        directory.display().to_string(),
    ]
}

/// Delete the installer jar once it has run, keeping the error if that fails.
async fn remove_installer(jar: &Path) -> Option<CleanupFailure> {
    let error = tokio::fs::remove_file(jar).await.err()?;
    Some(CleanupFailure {
        filename: jar
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| jar.display().to_string()),
        error,
    })
}

#[async_trait]
impl LoaderInstaller for FabricInstaller {
    async fn install(&self, ctx: InstallContext<'_>) -> UpdaterResult<LoaderInstallResult> {
        debug!(
            "Installing Fabric for Minecraft {} ({})",
            ctx.minecraft_version, ctx.side
        );

        let (installer_version, jar) = self.fetch_installer(&ctx).await?;
        let ran = self.run_installer(&jar, &ctx).await;
        let installer_cleanup_failure = remove_installer(&jar).await;
        ran?;

        let server_jar = match ctx.side {
            Side::Client => None,
            Side::Server => {
                let server_jar = download_server_jar(
                    ctx.http_client,
                    ctx.downloader,
                    &ctx.endpoints.version_manifest,
                    ctx.minecraft_version,
                    ctx.directory,
                )
                .await?;
                write_launcher_properties(ctx.directory, &server_jar.filename).await?;
                Some(server_jar)
            }
        };

        debug!("Fabric installer {} finished", installer_version);
        Ok(LoaderInstallResult {
            installer_version: Some(installer_version),
            installer_cleanup_failure,
            server_jar,
        })
    }
}
