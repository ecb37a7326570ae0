use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Which side an installation is, and which side the updater runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Client => write!(f, "client"),
            Side::Server => write!(f, "server"),
        }
    }
}

/// Whether an installation runs: always, never, or when its side matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "EnabledRepr")]
pub enum EnableMode {
    True,
    False,
    Auto,
}

/// `"true"`/`"false"`/`"auto"` in any case, or a plain JSON bool.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnabledRepr {
    Bool(bool),
    Text(String),
}

impl TryFrom<EnabledRepr> for EnableMode {
    type Error = String;

    fn try_from(value: EnabledRepr) -> Result<Self, Self::Error> {
        match value {
            EnabledRepr::Bool(true) => Ok(EnableMode::True),
            EnabledRepr::Bool(false) => Ok(EnableMode::False),
            EnabledRepr::Text(text) => match text.to_ascii_lowercase().as_str() {
                "true" => Ok(EnableMode::True),
                "false" => Ok(EnableMode::False),
                "auto" => Ok(EnableMode::Auto),
                _ => Err(format!(
                    "invalid enabled value {text:?}, expected true, false or auto"
                )),
            },
        }
    }
}

/// Mod loaders. Any loader name is accepted; it is passed to the hosting
/// API as-is (lowercased).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LoaderType {
    Fabric,
    Forge,
    NeoForge,
    Quilt,
    Other(String),
}

impl From<String> for LoaderType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "fabric" => LoaderType::Fabric,
            "forge" => LoaderType::Forge,
            "neoforge" => LoaderType::NeoForge,
            "quilt" => LoaderType::Quilt,
            other => LoaderType::Other(other.to_string()),
        }
    }
}

impl LoaderType {
    /// Loader identifier used by the hosting API.
    pub fn as_str(&self) -> &str {
        match self {
            LoaderType::Fabric => "fabric",
            LoaderType::Forge => "forge",
            LoaderType::NeoForge => "neoforge",
            LoaderType::Quilt => "quilt",
            LoaderType::Other(name) => name,
        }
    }
}

impl fmt::Display for LoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosting sites a mod can come from. Only Modrinth is implemented.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HostingSite {
    Modrinth,
    Other(String),
}

impl From<String> for HostingSite {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("modrinth") {
            HostingSite::Modrinth
        } else {
            HostingSite::Other(value)
        }
    }
}

impl fmt::Display for HostingSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostingSite::Modrinth => write!(f, "Modrinth"),
            HostingSite::Other(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModReference {
    /// Project ID or slug on the hosting site.
    pub id: String,
    #[serde(rename = "displayName", alias = "display_name")]
    pub display_name: String,
    pub site: HostingSite,
    /// Overrides the installation's loader for this mod.
    #[serde(default)]
    pub loader: Option<LoaderType>,
}

/// One client or server setup to keep up to date.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    pub enabled: EnableMode,
    #[serde(rename = "type")]
    pub side: Side,
    pub name: String,
    pub directory: PathBuf,
    #[serde(default = "default_mods_folder")]
    pub mods_folder: String,
    pub loader: LoaderType,
    /// Version token; `None` or `""` means no default.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub install_loader: bool,
    #[serde(default = "default_fabric_installer_name")]
    pub fabric_installer_name: String,
    #[serde(default)]
    pub mods: Vec<ModReference>,
}

fn default_mods_folder() -> String {
    "mods".to_string()
}

fn default_fabric_installer_name() -> String {
    "fabric-installer.jar".to_string()
}

impl Installation {
    pub fn mods_dir(&self) -> PathBuf {
        self.directory.join(&self.mods_folder)
    }

    /// Configured default version token, if one is set.
    pub fn default_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Loader a mod must declare compatibility with.
    pub fn loader_for<'a>(&'a self, mod_ref: &'a ModReference) -> &'a LoaderType {
        mod_ref.loader.as_ref().unwrap_or(&self.loader)
    }
}
