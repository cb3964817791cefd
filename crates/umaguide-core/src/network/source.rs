//! Dataset sources: where the loader's "network fetch" goes.
//!
//! The site fetches one JSON document. Here that document can come from an
//! HTTP endpoint or from a local checkout of the site; both sit behind
//! [`DatasetSource`] so the loader can be driven by a stub in tests.

use super::client::HttpClient;
use crate::error::{GuideError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A place the raw dataset JSON can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Fetch the raw response body.
    ///
    /// Transport failures and non-2xx responses are errors; the body is not
    /// validated here.
    async fn fetch(&self) -> Result<String>;
}

/// Shared handle to any source.
pub type DynDatasetSource = Arc<dyn DatasetSource>;

/// Fetches the dataset over HTTP(S).
pub struct HttpDatasetSource {
    client: HttpClient,
    url: String,
}

impl HttpDatasetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_timeout(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        self.client.get_text(&self.url).await
    }
}

/// Reads the dataset from the local filesystem.
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GuideError::io_with_path(e, &self.path))?;
        debug!("Read {} bytes from {}", body.len(), self.path.display());
        Ok(body)
    }
}

/// Pick a source for `location`: http(s) and file URLs by scheme, anything
/// else as a filesystem path.
pub fn source_for_location(location: &str, timeout: Duration) -> Result<DynDatasetSource> {
    match url::Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok(Arc::new(HttpDatasetSource::new(location, timeout)?))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url.to_file_path().map_err(|_| GuideError::Config {
                message: format!("Invalid file URL: {}", location),
            })?;
            Ok(Arc::new(FileDatasetSource::new(path)))
        }
        Ok(url) if url.scheme().len() > 1 => Err(GuideError::Config {
            message: format!("Unsupported data location scheme: {}", url.scheme()),
        }),
        // Plain paths, including Windows drive letters parsed as a 1-char scheme.
        _ => Ok(Arc::new(FileDatasetSource::new(location))),
    }
}
