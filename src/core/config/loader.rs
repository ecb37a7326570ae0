use std::path::Path;

use tracing::debug;

use super::model::Installation;
use crate::core::error::{UpdaterError, UpdaterResult};

/// Read the ordered list of installations from a JSON config file.
pub async fn load_installations(path: &Path) -> UpdaterResult<Vec<Installation>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| UpdaterError::io(path, e))?;

    let installations = parse_installations(&json).map_err(|source| UpdaterError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Loaded {} installation(s) from {:?}",
        installations.len(),
        path
    );
    Ok(installations)
}

pub fn parse_installations(json: &str) -> Result<Vec<Installation>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{EnableMode, HostingSite, LoaderType, Side};

    const CONFIG: &str = r#"[
        {
            "enabled": "Auto",
            "type": "server",
            "name": "Survival",
            "directory": "/srv/minecraft",
            "mods_folder": "mods",
            "loader": "Fabric",
            "version": "latest",
            "install_loader": true,
            "mods": [
                { "id": "P7dR8mSH", "displayName": "Fabric API", "site": "modrinth" },
                { "id": "sodium", "displayName": "Sodium", "site": "modrinth", "loader": "quilt" },
                { "id": "12345", "displayName": "JEI", "site": "curseforge" }
            ]
        },
        {
            "enabled": false,
            "type": "client",
            "name": "Creative",
            "directory": "C:/Games/.minecraft",
            "loader": "paper",
            "version": ""
        }
    ]"#;

    #[test]
    fn parses_installations() {
        let installations = parse_installations(CONFIG).unwrap();
        assert_eq!(installations.len(), 2);

        let survival = &installations[0];
        assert_eq!(survival.enabled, EnableMode::Auto);
        assert_eq!(survival.side, Side::Server);
        assert_eq!(survival.loader, LoaderType::Fabric);
        assert_eq!(survival.default_version(), Some("latest"));
        assert!(survival.install_loader);
        assert_eq!(survival.fabric_installer_name, "fabric-installer.jar");
        assert_eq!(survival.mods_dir(), Path::new("/srv/minecraft").join("mods"));
        assert_eq!(survival.mods[0].site, HostingSite::Modrinth);
        assert_eq!(survival.loader_for(&survival.mods[0]), &LoaderType::Fabric);
        assert_eq!(survival.loader_for(&survival.mods[1]), &LoaderType::Quilt);
        assert_eq!(
            survival.mods[2].site,
            HostingSite::Other("curseforge".into())
        );

        let creative = &installations[1];
        assert_eq!(creative.enabled, EnableMode::False);
        assert_eq!(creative.loader, LoaderType::Other("paper".into()));
        assert_eq!(creative.default_version(), None);
        assert!(!creative.install_loader);
        assert_eq!(creative.mods_folder, "mods");
        assert!(creative.mods.is_empty());
    }

    #[test]
    fn rejects_unknown_enabled_value() {
        let json = r#"[{ "enabled": "sometimes", "type": "client", "name": "x",
                         "directory": ".", "loader": "fabric" }]"#;
        assert!(parse_installations(json).is_err());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let err = load_installations(&path).await.unwrap_err();

        assert!(matches!(err, UpdaterError::Io { path: p, .. } if p == path));
    }

    #[tokio::test]
    async fn invalid_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_installations(&path).await.unwrap_err();

        assert!(matches!(err, UpdaterError::Config { .. }));
    }
}
