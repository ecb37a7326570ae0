mod artifact;
mod metadata;

pub use artifact::MavenArtifact;
pub use metadata::{MavenMetadata, Versioning, Versions};

/// Fabric's Maven repository.
pub const FABRIC_MAVEN: &str = "https://maven.fabricmc.net";

/// Coordinate of the Fabric installer jar.
pub const FABRIC_INSTALLER: &str = "net.fabricmc:fabric-installer";
