use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Sha256, Digest};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("File verification failed: expected {expected}, got {actual}")]
    VerificationFailed { expected: String, actual: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type DownloadResult<T> = Result<T, DownloadError>;

pub struct ModelDownloader {
    client: Client,
}

impl Default for ModelDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelDownloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Streams `url` into `destination`. The body is written to a `.part`
    /// sibling first and only renamed into place once the checksum matches.
    pub async fn download_file<P: AsRef<Path>>(
        &self,
        url: &str,
        destination: P,
        expected_sha256: Option<&str>,
    ) -> DownloadResult<()> {
        let destination = destination.as_ref();
        let partial = partial_path(destination);

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DownloadError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string())
            )));
        }

        let total_size = response.content_length().unwrap_or(0);
        let file_name = destination.file_name().unwrap_or_default().to_string_lossy().to_string();

        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
                .progress_chars("#>-"),
        );
        pb.set_message(format!("Downloading {}", file_name));

        let mut file = File::create(&partial).await?;
        let mut hasher = Sha256::new();
        let mut downloaded = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            hasher.update(&chunk);

            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }

        file.flush().await?;
        drop(file);
        pb.finish_with_message(format!("Downloaded {}", file_name));

        let actual_hash = hex::encode(hasher.finalize());
        debug!("{} sha256 {}", file_name, actual_hash);

        if let Some(expected) = expected_sha256 {
            if !actual_hash.eq_ignore_ascii_case(expected) {
                let _ = tokio::fs::remove_file(&partial).await;
                warn!("Checksum mismatch for {}", file_name);
                return Err(DownloadError::VerificationFailed {
                    expected: expected.to_string(),
                    actual: actual_hash,
                });
            }
        }

        tokio::fs::rename(&partial, destination).await?;

        Ok(())
    }

    pub async fn download_files<P: AsRef<Path>>(
        &self,
        downloads: Vec<(&str, P, Option<&str>)>,
    ) -> DownloadResult<()> {
        let tasks = downloads.into_iter().map(|(url, dest, sha256)| {
            let downloader = &self;
            async move { downloader.download_file(url, dest, sha256).await }
        });

        let results = futures_util::future::join_all(tasks).await;

        for result in results {
            result?;
        }

        Ok(())
    }
}

/// Hex SHA-256 of a file already on disk.
pub async fn sha256_file<P: AsRef<Path>>(path: P) -> DownloadResult<String> {
    let data = tokio::fs::read(path).await?;
    Ok(hex::encode(Sha256::digest(&data)))
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    destination.with_file_name(name)
}
