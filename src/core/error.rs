use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the updater.
/// Every module returns `Result<T, UpdaterError>`.
#[derive(Debug, Error)]
pub enum UpdaterError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Api { url: String, status: u16 },

    #[error(transparent)]
    Download(#[from] DownloadError),

    // ── Integrity ───────────────────────────────────────
    #[error("No file identifiers provided")]
    NoFileIdentifiers,

    // ── Versions ────────────────────────────────────────
    #[error("Minecraft version {0} not found in manifest")]
    UnknownGameVersion(String),

    #[error("No version entered")]
    NoVersionEntered,

    // ── Config ──────────────────────────────────────────
    #[error("Invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Serialization ───────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    // ── Loader ──────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    #[error("Loader error: {0}")]
    Loader(String),

    #[error("Java execution failed: {0}")]
    JavaExecution(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Failures while fetching a file whose integrity is known up front.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download failed for {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Downloaded file {path:?} does not match the published size and hashes")]
    IntegrityMismatch { path: PathBuf },
}

/// Convenience alias used throughout the crate.
pub type UpdaterResult<T> = Result<T, UpdaterError>;

impl From<std::io::Error> for UpdaterError {
    fn from(source: std::io::Error) -> Self {
        UpdaterError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl UpdaterError {
    /// Attach a path to an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdaterError::Io {
            path: path.into(),
            source,
        }
    }
}
