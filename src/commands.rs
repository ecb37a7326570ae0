// ─── Update Run ───
// Walks every configured installation: version selection, loader install,
// then each mod through the fallback ladder.

use tracing::debug;

use crate::core::config::{EnableMode, HostingSite, Installation, Side};
use crate::core::downloader::EnsureOutcome;
use crate::core::loaders::{InstallContext, Installer, LoaderInstallResult};
use crate::core::mods::{update_mod, UpdateTarget};
use crate::core::report::{english_list, RunSummary};
use crate::core::state::AppState;
use crate::core::version::VersionToken;

/// Command-line choices that apply to every installation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: Side,
    /// `-m`: replaces each installation's configured version.
    pub version_override: Option<String>,
    /// `false` with `-n`.
    pub install_loader: bool,
}

/// Update every installation in order. Problems are counted, never fatal.
pub async fn run_updater(
    state: &mut AppState,
    installations: &[Installation],
    options: &RunOptions,
) -> RunSummary {
    let mut summary = RunSummary::new();
    for installation in installations {
        if should_run(installation, options.mode, &mut summary) {
            update_installation(state, installation, options, &mut summary).await;
        }
    }
    summary
}

fn should_run(installation: &Installation, mode: Side, summary: &mut RunSummary) -> bool {
    let name = &installation.name;
    match installation.enabled {
        EnableMode::False => {
            summary.info(format!("Skipping disabled config {name}."));
            false
        }
        EnableMode::Auto if installation.side != mode => {
            summary.info(format!(
                "Running in {mode} mode, skipping {} config {name}.",
                installation.side
            ));
            false
        }
        EnableMode::True if installation.side != mode => {
            summary.info_warn(format!(
                "Enable override is true for {name}, running despite mode/type mismatch."
            ));
            true
        }
        _ => true,
    }
}

async fn update_installation(
    state: &mut AppState,
    installation: &Installation,
    options: &RunOptions,
    summary: &mut RunSummary,
) {
    let name = &installation.name;
    summary.info(format!("Updating {} {name}...", installation.side));

    let mods_dir = installation.mods_dir();
    if !mods_dir.is_dir() {
        summary.info_warn(format!(
            "No mods folder detected. Creating {}",
            mods_dir.display()
        ));
        if let Err(e) = tokio::fs::create_dir_all(&mods_dir).await {
            summary.error(format!(
                "{e}. Could not create {}. Skipping {name}.",
                mods_dir.display()
            ));
            return;
        }
    }

    let Some(version) = select_version(state, installation, options, summary).await else {
        return;
    };

    if options.install_loader && installation.install_loader {
        install_loader(state, installation, &version, summary).await;
    }

    for mod_ref in &installation.mods {
        match &mod_ref.site {
            HostingSite::Modrinth => {
                let target = UpdateTarget {
                    game_version: &version,
                    loader: installation.loader_for(mod_ref).as_str(),
                    mods_dir: &mods_dir,
                };
                update_mod(
                    &state.modrinth,
                    &state.downloader,
                    mod_ref,
                    target,
                    summary,
                )
                .await;
            }
            HostingSite::Other(site) => summary.error(format!(
                "{} is not currently supported. Skipping {}",
                title_case(site),
                mod_ref.display_name
            )),
        }
    }
}

/// Version for this installation: `-m` first, then the config default,
/// then the latest release.
async fn select_version(
    state: &mut AppState,
    installation: &Installation,
    options: &RunOptions,
    summary: &mut RunSummary,
) -> Option<String> {
    let config_token = installation.default_version();
    let (token, source) = match (&options.version_override, config_token) {
        (Some(cli), Some(_)) => (VersionToken::parse(cli), Source::Override),
        (Some(cli), None) => (VersionToken::parse(cli), Source::NoDefault),
        (None, Some(config)) => (VersionToken::parse(config), Source::ConfigDefault),
        (None, None) => (VersionToken::Latest, Source::NoDefault),
    };

    let version = match state.resolver.resolve(&token, summary).await {
        Ok(version) => version,
        Err(e) => {
            summary.error(format!("{e}. Skipping {}.", installation.name));
            return None;
        }
    };

    let alias = match &token {
        VersionToken::Latest => "latest ",
        VersionToken::LatestSnapshot => "latest_snapshot ",
        VersionToken::Explicit(_) => "",
    };
    match source {
        Source::Override => summary.info_warn(format!(
            "Config version overridden. Using {alias}version {version}."
        )),
        Source::ConfigDefault => summary.info(format!(
            "No version specified. Using config default {alias}version {version}."
        )),
        Source::NoDefault => summary.info(format!(
            "No default version specified by config. Using version {version}."
        )),
    }
    Some(version)
}

enum Source {
    Override,
    ConfigDefault,
    NoDefault,
}

async fn install_loader(
    state: &AppState,
    installation: &Installation,
    version: &str,
    summary: &mut RunSummary,
) {
    let Some(installer) = Installer::new(&installation.loader) else {
        summary.error(format!(
            "Installing modloader {} is not currently supported.",
            installation.loader
        ));
        return;
    };

    summary.info(format!(
        "Installing {} loader for version {version}...",
        installation.loader
    ));
    let result = installer
        .install(InstallContext {
            minecraft_version: version,
            side: installation.side,
            directory: &installation.directory,
            installer_name: &installation.fabric_installer_name,
            downloader: &state.downloader,
            http_client: &state.http_client,
            endpoints: &state.endpoints,
        })
        .await;

    match result {
        Ok(result) => report_loader_install(result, summary),
        Err(e) => summary.error(e),
    }
}

fn report_loader_install(result: LoaderInstallResult, summary: &mut RunSummary) {
    if let Some(version) = &result.installer_version {
        debug!("Loader installer {} completed", version);
    }
    if let Some(failure) = result.installer_cleanup_failure {
        summary.warning(format!(
            "{}. Removing {} failed.",
            failure.error, failure.filename
        ));
    }
    let Some(server_jar) = result.server_jar else {
        return;
    };

    match server_jar.outcome {
        EnsureOutcome::AlreadyPresent => summary.info(format!(
            "{} is already present. Skipping download.",
            server_jar.filename
        )),
        EnsureOutcome::Downloaded { replaced_foreign } => {
            if replaced_foreign {
                summary.warning(format!(
                    "{} already existed, but was not a valid server jar and was overwritten.",
                    server_jar.filename
                ));
            }
            summary.info(format!("Downloaded {}.", server_jar.filename));
        }
    }
    if !server_jar.removed.is_empty() {
        summary.info(format!(
            "Removed old server jars: {}.",
            english_list(&server_jar.removed)
        ));
    }
    for failure in server_jar.cleanup_failures {
        summary.warning(format!(
            "{}. Removing old server jar {} failed.",
            failure.error, failure.filename
        ));
    }
    summary.info("Updated fabric-server-launcher.properties.");
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::core::config::parse_installations;
    use crate::core::error::{UpdaterError, UpdaterResult};
    use crate::core::mods::CleanupFailure;
    use crate::core::state::Endpoints;
    use crate::core::version::VersionPrompt;

    struct NoAnswer(Arc<AtomicUsize>);

    impl VersionPrompt for NoAnswer {
        fn ask(&self, _snapshot: bool) -> UpdaterResult<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(UpdaterError::NoVersionEntered)
        }
    }

    fn state_for(server: &MockServer) -> (AppState, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        let state = AppState::with_prompt(
            Endpoints::rooted_at(&server.uri()),
            Box::new(NoAnswer(asked.clone())),
        )
        .unwrap();
        (state, asked)
    }

    fn installations(dir: &std::path::Path, entries: &str) -> Vec<Installation> {
        let json = entries.replace("DIR", &dir.display().to_string().replace('\\', "/"));
        parse_installations(&json).unwrap()
    }

    fn options(mode: Side) -> RunOptions {
        RunOptions {
            mode,
            version_override: None,
            install_loader: true,
        }
    }

    #[test]
    fn leftover_installer_jar_is_a_counted_warning() {
        let mut summary = RunSummary::new();
        let result = LoaderInstallResult {
            installer_version: Some("1.0.1".into()),
            installer_cleanup_failure: Some(CleanupFailure {
                filename: "fabric-installer.jar".into(),
                error: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
            server_jar: None,
        };

        report_loader_install(result, &mut summary);

        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn site_names_are_title_cased() {
        assert_eq!(title_case("curseforge"), "Curseforge");
        assert_eq!(title_case("GITHUB"), "Github");
        assert_eq!(title_case(""), "");
    }

    #[tokio::test]
    async fn disabled_and_other_side_entries_are_skipped() {
        let server = MockServer::start().await;
        let (mut state, _) = state_for(&server);
        let dir = tempfile::tempdir().unwrap();
        let entries = installations(
            dir.path(),
            r#"[
              {"enabled": "false", "type": "server", "name": "off", "directory": "DIR/off",
               "loader": "fabric", "version": "1.20.1", "mods": []},
              {"enabled": "auto", "type": "client", "name": "client", "directory": "DIR/client",
               "loader": "fabric", "version": "1.20.1", "mods": []}
            ]"#,
        );

        let summary = run_updater(&mut state, &entries, &options(Side::Server)).await;

        assert_eq!(summary, RunSummary::default());
        assert!(!dir.path().join("off").exists());
        assert!(!dir.path().join("client").exists());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn forced_entry_runs_and_reports_unsupported_site_and_loader() {
        let server = MockServer::start().await;
        let (mut state, _) = state_for(&server);
        let dir = tempfile::tempdir().unwrap();
        let entries = installations(
            dir.path(),
            r#"[{"enabled": true, "type": "client", "name": "forced", "directory": "DIR/forced",
                 "loader": "forge", "version": "1.20.1", "install_loader": true,
                 "mods": [{"id": "abc", "displayName": "Thing", "site": "curseforge"}]}]"#,
        );

        let summary = run_updater(&mut state, &entries, &options(Side::Server)).await;

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.warnings, 0);
        assert!(dir.path().join("forced").join("mods").is_dir());
    }

    #[tokio::test]
    async fn noloader_skips_loader_install() {
        let server = MockServer::start().await;
        let (mut state, _) = state_for(&server);
        let dir = tempfile::tempdir().unwrap();
        let entries = installations(
            dir.path(),
            r#"[{"enabled": "auto", "type": "server", "name": "srv", "directory": "DIR/srv",
                 "loader": "quilt", "version": "1.20.1", "install_loader": true, "mods": []}]"#,
        );
        let mut opts = options(Side::Server);
        opts.install_loader = false;

        let summary = run_updater(&mut state, &entries, &opts).await;

        assert!(!summary.has_errors());
    }

    #[tokio::test]
    async fn unresolvable_version_skips_installation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mc/game/version_manifest_v2.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let (mut state, asked) = state_for(&server);
        let dir = tempfile::tempdir().unwrap();
        let entries = installations(
            dir.path(),
            r#"[{"enabled": "auto", "type": "client", "name": "c", "directory": "DIR/c",
                 "loader": "fabric", "version": "latest",
                 "mods": [{"id": "abc", "displayName": "Thing", "site": "modrinth"}]}]"#,
        );

        let summary = run_updater(&mut state, &entries, &options(Side::Client)).await;

        // Manifest failure, then the empty answer.
        assert_eq!(summary.errors, 2);
        assert_eq!(asked.load(Ordering::SeqCst), 1);
        let requests = server.received_requests().await.unwrap();
        assert!(requests.iter().all(|r| !r.url.path().starts_with("/v2/")));
    }
}
