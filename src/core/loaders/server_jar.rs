// ─── Dedicated Server Jar ───
// Fetches minecraft_server.<version>.jar and points Fabric's launcher at it.

use std::path::Path;

use chrono::Local;
use tracing::debug;

use crate::core::downloader::{ensure_verified_file, EnsureOutcome, FileFetcher};
use crate::core::error::{UpdaterError, UpdaterResult};
use crate::core::mods::CleanupFailure;
use crate::core::version::{VersionJson, VersionManifest};

const SERVER_JAR_PREFIX: &str = "minecraft_server.";
const SERVER_JAR_SUFFIX: &str = ".jar";
pub const FABRIC_LAUNCHER_PROPERTIES: &str = "fabric-server-launcher.properties";

#[derive(Debug)]
pub struct ServerJar {
    pub filename: String,
    pub outcome: EnsureOutcome,
    /// Server jars of other versions that were deleted.
    pub removed: Vec<String>,
    pub cleanup_failures: Vec<CleanupFailure>,
}

pub fn server_jar_filename(version: &str) -> String {
    format!("{SERVER_JAR_PREFIX}{version}{SERVER_JAR_SUFFIX}")
}

fn is_server_jar(filename: &str) -> bool {
    filename.starts_with(SERVER_JAR_PREFIX) && filename.ends_with(SERVER_JAR_SUFFIX)
}

/// Make `directory` hold the verified server jar for `version`.
///
/// Other `minecraft_server.*.jar` files are removed once the jar is in place.
pub async fn download_server_jar(
    client: &reqwest::Client,
    fetcher: &dyn FileFetcher,
    manifest_url: &str,
    version: &str,
    directory: &Path,
) -> UpdaterResult<ServerJar> {
    debug!("Getting server jar information for {}...", version);
    let manifest = VersionManifest::fetch(client, manifest_url).await?;
    let entry = manifest
        .find_version(version)
        .ok_or_else(|| UpdaterError::UnknownGameVersion(version.to_string()))?;
    let version_json = VersionJson::fetch(client, &entry.url).await?;
    let server = version_json.server_download().ok_or_else(|| {
        UpdaterError::Other(format!("Minecraft {version} has no dedicated server download"))
    })?;

    let filename = server_jar_filename(version);
    let dest = directory.join(&filename);
    let outcome = ensure_verified_file(fetcher, &server.url, &dest, &server.identifiers()).await?;

    let mut removed = Vec::new();
    let mut cleanup_failures = Vec::new();
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(|e| UpdaterError::io(directory, e))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| UpdaterError::io(directory, e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == filename || !is_server_jar(&name) {
            continue;
        }
        match tokio::fs::remove_file(entry.path()).await {
            Ok(()) => {
                debug!("Removed old server jar {}", name);
                removed.push(name);
            }
            Err(error) => cleanup_failures.push(CleanupFailure {
                filename: name,
                error,
            }),
        }
    }
    removed.sort();

    Ok(ServerJar {
        filename,
        outcome,
        removed,
        cleanup_failures,
    })
}

/// Point `fabric-server-launch.jar` at the vanilla server jar.
pub async fn write_launcher_properties(directory: &Path, server_jar: &str) -> UpdaterResult<()> {
    let path = directory.join(FABRIC_LAUNCHER_PROPERTIES);
    let contents = format!(
        "# {}\nserverJar={}\n",
        Local::now().format("%a %d %b %Y %H:%M:%S"),
        server_jar
    );
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| UpdaterError::io(&path, e))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::core::downloader::{identifiers_for, FakeFetcher};

    const SERVER_BYTES: &[u8] = b"vanilla server";

    async fn mojang(server: &MockServer) {
        let ids = identifiers_for(SERVER_BYTES);
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latest": { "release": "1.20.4", "snapshot": "24w03a" },
                "versions": [{
                    "id": "1.20.4",
                    "type": "release",
                    "url": format!("{}/v/1.20.4.json", server.uri())
                }]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v/1.20.4.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1.20.4",
                "downloads": {
                    "server": {
                        "sha1": ids.sha1.unwrap(),
                        "size": SERVER_BYTES.len(),
                        "url": "https://launcher.example/server.jar"
                    }
                }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn server_jar_names() {
        assert_eq!(server_jar_filename("1.20.4"), "minecraft_server.1.20.4.jar");
        assert!(is_server_jar("minecraft_server.1.19.jar"));
        assert!(!is_server_jar("fabric-server-launch.jar"));
        assert!(!is_server_jar("minecraft_server.1.19.jar.bak"));
    }

    #[tokio::test]
    async fn downloads_jar_and_removes_other_versions() {
        let server = MockServer::start().await;
        mojang(&server).await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("minecraft_server.1.20.2.jar"), b"old").unwrap();
        std::fs::write(dir.path().join("server.properties"), b"motd=hi").unwrap();
        let fetcher = FakeFetcher::with("https://launcher.example/server.jar", SERVER_BYTES);

        let jar = download_server_jar(
            &reqwest::Client::new(),
            &fetcher,
            &format!("{}/manifest.json", server.uri()),
            "1.20.4",
            dir.path(),
        )
        .await
        .unwrap();

        assert_eq!(jar.filename, "minecraft_server.1.20.4.jar");
        assert_eq!(
            jar.outcome,
            EnsureOutcome::Downloaded {
                replaced_foreign: false
            }
        );
        assert_eq!(jar.removed, ["minecraft_server.1.20.2.jar"]);
        assert!(dir.path().join("minecraft_server.1.20.4.jar").exists());
        assert!(dir.path().join("server.properties").exists());
    }

    #[tokio::test]
    async fn unknown_version_is_reported() {
        let server = MockServer::start().await;
        mojang(&server).await;
        let dir = tempfile::tempdir().unwrap();

        let err = download_server_jar(
            &reqwest::Client::new(),
            &FakeFetcher::default(),
            &format!("{}/manifest.json", server.uri()),
            "1.7.10",
            dir.path(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UpdaterError::UnknownGameVersion(v) if v == "1.7.10"));
    }

    #[tokio::test]
    async fn launcher_properties_point_at_server_jar() {
        let dir = tempfile::tempdir().unwrap();

        write_launcher_properties(dir.path(), "minecraft_server.1.20.4.jar")
            .await
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join(FABRIC_LAUNCHER_PROPERTIES)).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("# "));
        assert_eq!(lines.next(), Some("serverJar=minecraft_server.1.20.4.jar"));
    }
}
