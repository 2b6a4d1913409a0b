use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use super::*;

pub(super) const FETCH_TIMEOUT_SECS: u64 = 2;

#[derive(Debug, Error)]
pub(super) enum FetchError {
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub(super) fn outcome(&self) -> PageOutcome {
        match self {
            Self::Status(status) if *status == StatusCode::NOT_FOUND => PageOutcome::NotFound,
            _ => PageOutcome::Failed,
        }
    }
}

#[async_trait]
pub(super) trait PageFetcher: Send + Sync {
    async fn fetch(&self, task: &DownloadTask, manifest: &ManifestSink) -> PageOutcome;
}

pub(super) struct HttpPageFetcher {
    client: reqwest::Client,
    layout: OutputLayout,
}

impl HttpPageFetcher {
    pub(super) fn new(layout: OutputLayout) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client, layout })
    }

    async fn download(
        &self,
        task: &DownloadTask,
        manifest: &ManifestSink,
    ) -> std::result::Result<PathBuf, FetchError> {
        let response = self.client.get(&task.url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let directory = self.layout.chapter_dir(&task.subject, &task.chapter);
        let path = directory.join(&task.filename);

        let target = path.clone();
        tokio::task::spawn_blocking(move || -> std::result::Result<(), FetchError> {
            let decoded = image::load_from_memory(&body)?;
            std::fs::create_dir_all(&directory)?;
            decoded.save(&target)?;
            Ok(())
        })
        .await??;

        manifest.append(&path).await?;
        Ok(path)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, task: &DownloadTask, manifest: &ManifestSink) -> PageOutcome {
        match self.download(task, manifest).await {
            Ok(path) => {
                info!(
                    image = %task.filename,
                    chapter = %task.chapter,
                    path = %path.display(),
                    "downloaded image"
                );
                PageOutcome::Downloaded
            }
            Err(err) => {
                warn!(
                    image = %task.filename,
                    chapter = %task.chapter,
                    page = task.page,
                    error = %err,
                    "failed downloading image"
                );
                err.outcome()
            }
        }
    }
}
