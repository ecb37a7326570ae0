use std::path::Path;

use crate::core::config::Side;
use crate::core::downloader::Downloader;
use crate::core::state::Endpoints;

/// Everything a loader installer needs for one installation.
pub struct InstallContext<'a> {
    pub minecraft_version: &'a str,
    pub side: Side,
    /// Installation root (not the mods folder).
    pub directory: &'a Path,
    /// File name the installer jar is saved under while it runs.
    pub installer_name: &'a str,
    pub downloader: &'a Downloader,
    pub http_client: &'a reqwest::Client,
    pub endpoints: &'a Endpoints,
}
