pub mod downstep;
pub mod manifest;
pub mod resolver;
pub mod version_file;

pub use downstep::{downstep, DownstepError};
pub use manifest::{LatestVersions, VersionEntry, VersionManifest, VERSION_MANIFEST_URL};
pub use resolver::{StdinPrompt, VersionPrompt, VersionResolver, VersionToken};
pub use version_file::{DownloadArtifact, VersionDownloads, VersionJson};
