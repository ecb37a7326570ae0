use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{DownloadError, UpdaterError, UpdaterResult};

/// Anything that can place the bytes behind a URL at a local path.
///
/// The mod installer and the server jar step only see this trait, so a
/// test can count or fake network traffic.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> UpdaterResult<u64>;
}

/// Sequential streaming downloader.
#[derive(Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // ── Single file download ────────────────────────────

    /// Download a single file to `dest`, streaming the body to disk.
    ///
    /// Creates parent directories as needed. Drops the file handle
    /// immediately after writing to avoid Windows OS Error 5.
    pub async fn download_file(&self, url: &str, dest: &Path) -> UpdaterResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UpdaterError::io(parent, e))?;
        }

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let mut written = 0u64;
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| UpdaterError::io(dest, e))?;
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| UpdaterError::io(dest, e))?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(|e| UpdaterError::io(dest, e))?;
            // file is dropped here, before any rename or delete on Windows
        }

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}

#[async_trait]
impl FileFetcher for Downloader {
    async fn fetch(&self, url: &str, dest: &Path) -> UpdaterResult<u64> {
        self.download_file(url, dest).await
    }
}
