pub mod context;
pub mod fabric;
pub mod installer;
pub mod server_jar;

pub use context::InstallContext;
pub use fabric::FabricInstaller;
pub use installer::{Installer, LoaderInstallResult, LoaderInstaller};
pub use server_jar::{download_server_jar, write_launcher_properties, ServerJar};
