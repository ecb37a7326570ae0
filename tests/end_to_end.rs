use std::path::Path;

use serde_json::{json, Value};
use sha1::{Digest, Sha1};
use sha2::Sha512;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mod_updater_lib::commands::{run_updater, RunOptions};
use mod_updater_lib::core::config::{parse_installations, Installation, Side};
use mod_updater_lib::core::error::{UpdaterError, UpdaterResult};
use mod_updater_lib::core::state::{AppState, Endpoints};
use mod_updater_lib::core::version::VersionPrompt;

struct NoPrompt;

impl VersionPrompt for NoPrompt {
    fn ask(&self, _snapshot: bool) -> UpdaterResult<String> {
        Err(UpdaterError::NoVersionEntered)
    }
}

fn state(server: &MockServer) -> AppState {
    AppState::with_prompt(Endpoints::rooted_at(&server.uri()), Box::new(NoPrompt)).unwrap()
}

fn client_options() -> RunOptions {
    RunOptions {
        mode: Side::Client,
        version_override: None,
        install_loader: false,
    }
}

fn build(
    server: &MockServer,
    filename: &str,
    game_version: &str,
    loader: &str,
    version_type: &str,
    published: &str,
    body: &[u8],
) -> Value {
    json!({
        "version_number": filename.trim_end_matches(".jar"),
        "game_versions": [game_version],
        "loaders": [loader],
        "version_type": version_type,
        "date_published": published,
        "files": [{
            "primary": true,
            "filename": filename,
            "url": format!("{}/files/{}", server.uri(), filename),
            "size": body.len(),
            "hashes": {
                "sha1": hex::encode(Sha1::digest(body)),
                "sha512": hex::encode(Sha512::digest(body)),
            }
        }]
    })
}

async fn serve_file(server: &MockServer, filename: &str, body: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{filename}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

fn config(dir: &Path, version: &str, mods: Value) -> Vec<Installation> {
    let entries = json!([{
        "enabled": "auto",
        "type": "client",
        "name": "Test client",
        "directory": dir,
        "loader": "fabric",
        "version": version,
        "mods": mods,
    }]);
    parse_installations(&entries.to_string()).unwrap()
}

fn mod_x() -> Value {
    json!([{ "id": "modx", "displayName": "Mod X", "site": "modrinth" }])
}

#[tokio::test]
async fn falls_back_to_base_version_when_desired_version_has_no_build() {
    let server = MockServer::start().await;
    let base = b"mod x for 1.20";
    Mock::given(method("GET"))
        .and(path("/v2/project/modx/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            build(&server, "modX-1.20.jar", "1.20", "fabric", "release", "2023-06-10T00:00:00Z", base),
            build(&server, "modX-1.20.2-beta.jar", "1.20.2", "forge", "beta", "2023-10-01T00:00:00Z", b"beta"),
        ])))
        // 1.20.2, 1.20.1, then 1.20.
        .expect(3)
        .mount(&server)
        .await;
    serve_file(&server, "modX-1.20.jar", base, 1).await;
    serve_file(&server, "modX-1.20.2-beta.jar", b"beta", 0).await;
    let dir = tempfile::tempdir().unwrap();

    let summary = run_updater(
        &mut state(&server),
        &config(dir.path(), "1.20.2", mod_x()),
        &client_options(),
    )
    .await;

    assert_eq!(summary.errors, 0);
    assert_eq!(summary.warnings, 2);
    let installed = dir.path().join("mods").join("modX-1.20.jar");
    assert_eq!(std::fs::read(installed).unwrap(), base);
}

#[tokio::test]
async fn new_build_replaces_old_one_and_second_run_skips() {
    let server = MockServer::start().await;
    let old = b"old build";
    let new = b"new build";
    Mock::given(method("GET"))
        .and(path("/v2/project/modx/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            build(&server, "modX-1.20.jar", "1.20", "fabric", "release", "2023-06-10T00:00:00Z", old),
            build(&server, "modX-1.20.2.jar", "1.20.2", "fabric", "release", "2023-10-01T00:00:00Z", new),
        ])))
        .mount(&server)
        .await;
    serve_file(&server, "modX-1.20.2.jar", new, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let mods = dir.path().join("mods");
    std::fs::create_dir(&mods).unwrap();
    std::fs::write(mods.join("modX-1.20.jar"), old).unwrap();
    std::fs::write(mods.join("notes.txt"), b"keep me").unwrap();
    let installations = config(dir.path(), "1.20.2", mod_x());
    let mut state = state(&server);

    let first = run_updater(&mut state, &installations, &client_options()).await;
    let second = run_updater(&mut state, &installations, &client_options()).await;

    assert!(!first.has_errors());
    assert!(!second.has_errors());
    assert_eq!(std::fs::read(mods.join("modX-1.20.2.jar")).unwrap(), new);
    assert!(!mods.join("modX-1.20.jar").exists());
    assert!(mods.join("notes.txt").exists());
}

#[tokio::test]
async fn latest_override_resolves_once_and_unsupported_site_is_an_error() {
    let server = MockServer::start().await;
    let body = b"mod x latest";
    Mock::given(method("GET"))
        .and(path("/mc/game/version_manifest_v2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latest": { "release": "1.20.2", "snapshot": "23w45a" },
            "versions": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/project/modx/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            build(&server, "modX-1.20.2.jar", "1.20.2", "fabric", "release", "2023-10-01T00:00:00Z", body),
        ])))
        .mount(&server)
        .await;
    serve_file(&server, "modX-1.20.2.jar", body, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let mut installations = config(
        dir.path(),
        "1.19.4",
        json!([
            { "id": "modx", "displayName": "Mod X", "site": "modrinth" },
            { "id": "1234", "displayName": "Other Mod", "site": "curseforge" }
        ]),
    );
    installations.extend(config(&dir.path().join("second"), "", json!([])));
    let options = RunOptions {
        version_override: Some("latest".into()),
        ..client_options()
    };

    let summary = run_updater(&mut state(&server), &installations, &options).await;

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.warnings, 0);
    assert!(dir.path().join("mods").join("modX-1.20.2.jar").exists());
    assert!(dir.path().join("second").join("mods").is_dir());
}
