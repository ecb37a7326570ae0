use std::fmt;

use crate::core::error::{UpdaterError, UpdaterResult};

/// A parsed `groupId:artifactId[:version]` coordinate.
///
/// The version is optional so the same type can address an artifact's
/// `maven-metadata.xml` before its latest version is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl MavenArtifact {
    /// Parse a Maven coordinate string.
    ///
    /// # Examples
    /// ```
    /// use mod_updater_lib::core::maven::MavenArtifact;
    ///
    /// let a = MavenArtifact::parse("net.fabricmc:fabric-installer").unwrap();
    /// assert_eq!(a.group_id, "net.fabricmc");
    /// assert_eq!(a.version, None);
    /// ```
    pub fn parse(coord: &str) -> UpdaterResult<Self> {
        let parts: Vec<&str> = coord.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(UpdaterError::InvalidMavenCoordinate(coord.to_string()));
        }

        match parts.as_slice() {
            [group, artifact] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: None,
            }),
            [group, artifact, version] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: Some(version.to_string()),
            }),
            _ => Err(UpdaterError::InvalidMavenCoordinate(coord.to_string())),
        }
    }

    pub fn with_version(&self, version: &str) -> Self {
        let mut clone = self.clone();
        clone.version = Some(version.to_string());
        clone
    }

    /// Construct the group path portion (`net/fabricmc`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `<repo>/<group_path>/<artifact_id>/maven-metadata.xml`
    pub fn metadata_url(&self, repo_base: &str) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            repo_base.trim_end_matches('/'),
            self.group_path(),
            self.artifact_id
        )
    }

    /// `artifactId-version.jar`, or `None` without a version.
    pub fn jar_filename(&self) -> Option<String> {
        self.version
            .as_ref()
            .map(|v| format!("{}-{}.jar", self.artifact_id, v))
    }

    /// `<repo>/<group_path>/<artifact_id>/<version>/<filename>`
    pub fn jar_url(&self, repo_base: &str) -> Option<String> {
        let version = self.version.as_ref()?;
        Some(format!(
            "{}/{}/{}/{}/{}",
            repo_base.trim_end_matches('/'),
            self.group_path(),
            self.artifact_id,
            version,
            self.jar_filename()?
        ))
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}
