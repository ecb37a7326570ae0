// ─── Version Resolver ───
// Turns "latest" / "latest_snapshot" / explicit tokens into concrete versions.

use std::io::{BufRead, Write};

use tracing::debug;

use super::manifest::{LatestVersions, VersionManifest};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::report::RunSummary;

/// A version as written in config or on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionToken {
    /// `"latest"`, or nothing at all.
    Latest,
    /// `"latest_snapshot"`.
    LatestSnapshot,
    Explicit(String),
}

impl VersionToken {
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "" | "latest" => VersionToken::Latest,
            "latest_snapshot" => VersionToken::LatestSnapshot,
            other => VersionToken::Explicit(other.to_string()),
        }
    }
}

/// Asks the operator for a version when the manifest is unreachable.
pub trait VersionPrompt: Send + Sync {
    fn ask(&self, snapshot: bool) -> UpdaterResult<String>;
}

/// Reads the version from standard input.
pub struct StdinPrompt;

impl VersionPrompt for StdinPrompt {
    fn ask(&self, snapshot: bool) -> UpdaterResult<String> {
        let kind = if snapshot { "snapshot" } else { "release" };
        print!("Please enter the desired {kind} version: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        let version = line.trim();
        if version.is_empty() {
            return Err(UpdaterError::NoVersionEntered);
        }
        Ok(version.to_string())
    }
}

/// Resolves version tokens, fetching the manifest at most once per alias.
pub struct VersionResolver {
    client: reqwest::Client,
    manifest_url: String,
    prompt: Box<dyn VersionPrompt>,
    latest_release: Option<String>,
    latest_snapshot: Option<String>,
}

impl VersionResolver {
    pub fn new(client: reqwest::Client, manifest_url: impl Into<String>) -> Self {
        Self::with_prompt(client, manifest_url, Box::new(StdinPrompt))
    }

    pub fn with_prompt(
        client: reqwest::Client,
        manifest_url: impl Into<String>,
        prompt: Box<dyn VersionPrompt>,
    ) -> Self {
        Self {
            client,
            manifest_url: manifest_url.into(),
            prompt,
            latest_release: None,
            latest_snapshot: None,
        }
    }

    /// Concrete version for `token`.
    ///
    /// Only fails if the manifest is unreachable and the operator gives no
    /// version either.
    pub async fn resolve(
        &mut self,
        token: &VersionToken,
        summary: &mut RunSummary,
    ) -> UpdaterResult<String> {
        match token {
            VersionToken::Explicit(version) => Ok(version.clone()),
            VersionToken::Latest => {
                if let Some(version) = &self.latest_release {
                    return Ok(version.clone());
                }
                let version = self.fetch_latest(false, summary).await?;
                self.latest_release = Some(version.clone());
                Ok(version)
            }
            VersionToken::LatestSnapshot => {
                if let Some(version) = &self.latest_snapshot {
                    return Ok(version.clone());
                }
                let version = self.fetch_latest(true, summary).await?;
                self.latest_snapshot = Some(version.clone());
                Ok(version)
            }
        }
    }

    async fn fetch_latest(&self, snapshot: bool, summary: &mut RunSummary) -> UpdaterResult<String> {
        summary.info(format!(
            "Getting latest Minecraft version ({} snapshots)...",
            if snapshot { "including" } else { "excluding" }
        ));

        match VersionManifest::fetch(&self.client, &self.manifest_url).await {
            Ok(manifest) => {
                let LatestVersions { release, snapshot: latest_snapshot } = manifest.latest;
                let version = if snapshot { latest_snapshot } else { release };
                summary.info(format!("Latest version is {version}."));
                Ok(version)
            }
            Err(e) => {
                summary.error(format!("{e}. Could not retrieve Minecraft versions."));
                let version = self.prompt.ask(snapshot)?;
                debug!("Using manually entered version {}", version);
                Ok(version)
            }
        }
    }
}
