//! Object storage destination (S3 or local filesystem)

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Where exported files are uploaded
#[derive(Debug, Clone)]
pub struct ObjectDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Bucket name or local directory, for logging
    location: String,
    /// Base path prefix within the bucket
    prefix: String,
    /// URL scheme (s3 or file)
    scheme: String,
}

impl ObjectDestination {
    /// Parse a destination and create the matching object store
    ///
    /// Supported formats:
    /// - `my-bucket` - AWS S3 bucket name
    /// - `s3://bucket/path/` - AWS S3 with a key prefix
    /// - `file:///local/path/`, `/local/path/` or `./path/` - Local filesystem
    pub fn parse(destination: &str) -> Result<Self> {
        if let Some(rest) = destination.strip_prefix("s3://") {
            Self::parse_s3(rest)
        } else if destination.starts_with("file://")
            || destination.starts_with('/')
            || destination.starts_with('.')
        {
            Self::parse_local(destination)
        } else if destination.contains("://") {
            Err(Error::config(format!(
                "Unsupported destination scheme: {destination}"
            )))
        } else {
            Self::parse_s3(destination)
        }
    }

    /// Parse `bucket[/prefix]`; credentials and region come from the AWS env
    fn parse_s3(without_scheme: &str) -> Result<Self> {
        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_end_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };
        if bucket.is_empty() {
            return Err(Error::config("S3 destination has an empty bucket name"));
        }

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            location: bucket.to_string(),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            location: path.trim_end_matches('/').to_string(),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Human-readable URL of an object key in this destination
    pub fn url_for(&self, key: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.location, self.object_path(key))
    }

    fn object_path(&self, key: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(key)
        } else {
            ObjectPath::from(format!("{}/{key}", self.prefix))
        }
    }

    /// Write bytes to `key`
    pub async fn write(&self, key: &str, data: Bytes) -> Result<String> {
        let path = self.object_path(key);
        let url = self.url_for(key);

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::upload(&url, e.to_string()))?;

        Ok(url)
    }

    /// Upload a local file to `key`, returning the object URL
    pub async fn upload_file(&self, local_path: &Path, key: &str) -> Result<String> {
        let data = tokio::fs::read(local_path).await.map_err(|e| {
            Error::upload(
                self.url_for(key),
                format!("failed to read {}: {e}", local_path.display()),
            )
        })?;
        debug!("Uploading {} bytes from {}", data.len(), local_path.display());
        self.write(key, Bytes::from(data)).await
    }
}
