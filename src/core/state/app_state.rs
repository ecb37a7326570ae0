use reqwest::Client;

use crate::core::downloader::Downloader;
use crate::core::http::build_http_client;
use crate::core::maven::FABRIC_MAVEN;
use crate::core::modrinth::{ModrinthClient, MODRINTH_API_BASE};
use crate::core::version::{VersionPrompt, VersionResolver, VERSION_MANIFEST_URL};

/// Base URLs of every upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub modrinth_api: String,
    pub version_manifest: String,
    pub fabric_maven: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            modrinth_api: MODRINTH_API_BASE.to_string(),
            version_manifest: VERSION_MANIFEST_URL.to_string(),
            fabric_maven: FABRIC_MAVEN.to_string(),
        }
    }
}

impl Endpoints {
    /// Every service under one base URL, e.g. a mock server.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            modrinth_api: format!("{base}/v2"),
            version_manifest: format!("{base}/mc/game/version_manifest_v2.json"),
            fabric_maven: format!("{base}/maven"),
        }
    }
}

/// Clients and caches shared by one run.
pub struct AppState {
    pub endpoints: Endpoints,
    pub http_client: Client,
    pub downloader: Downloader,
    pub modrinth: ModrinthClient,
    pub resolver: VersionResolver,
}

impl AppState {
    pub fn new(endpoints: Endpoints) -> Result<Self, reqwest::Error> {
        let http_client = build_http_client()?;
        let resolver = VersionResolver::new(http_client.clone(), &endpoints.version_manifest);
        Ok(Self::assemble(endpoints, http_client, resolver))
    }

    pub fn with_prompt(
        endpoints: Endpoints,
        prompt: Box<dyn VersionPrompt>,
    ) -> Result<Self, reqwest::Error> {
        let http_client = build_http_client()?;
        let resolver =
            VersionResolver::with_prompt(http_client.clone(), &endpoints.version_manifest, prompt);
        Ok(Self::assemble(endpoints, http_client, resolver))
    }

    fn assemble(endpoints: Endpoints, http_client: Client, resolver: VersionResolver) -> Self {
        Self {
            downloader: Downloader::new(http_client.clone()),
            modrinth: ModrinthClient::new(http_client.clone(), &endpoints.modrinth_api),
            resolver,
            http_client,
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_are_public_services() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.modrinth_api, "https://api.modrinth.com/v2");
        assert!(endpoints.version_manifest.starts_with("https://piston-meta.mojang.com/"));
        assert_eq!(endpoints.fabric_maven, "https://maven.fabricmc.net");
    }

    #[test]
    fn rooted_endpoints_share_a_base() {
        let endpoints = Endpoints::rooted_at("http://127.0.0.1:9000/");
        assert_eq!(endpoints.modrinth_api, "http://127.0.0.1:9000/v2");
        assert_eq!(endpoints.fabric_maven, "http://127.0.0.1:9000/maven");
    }
}
