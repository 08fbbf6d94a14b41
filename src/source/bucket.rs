//! Object store access for source documents

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;

/// A container of source documents, parsed from a URL
#[derive(Debug, Clone)]
pub struct SourceBucket {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Bucket or container name (for logging)
    container: String,
    /// Key prefix to list under; empty lists the whole container
    prefix: String,
}

impl SourceBucket {
    /// Open the configured source
    ///
    /// Supported formats:
    /// - `gs://bucket/prefix` - Google Cloud Storage
    /// - `s3://bucket/prefix` - AWS S3
    /// - `r2://bucket/prefix` - Cloudflare R2 (S3-compatible)
    /// - `az://container/prefix` - Azure Blob Storage
    /// - `memory://name` - In-memory store (empty)
    /// - `/local/path` or `file:///local/path` - Local filesystem
    pub fn open(config: &SourceConfig) -> Result<Self> {
        let url = config.url.trim();
        if let Some(rest) = url.strip_prefix("gs://") {
            Self::open_gcs(rest, config.service_account_path.as_ref())
        } else if let Some(rest) = url.strip_prefix("s3://") {
            Self::open_s3(rest, false)
        } else if let Some(rest) = url.strip_prefix("r2://") {
            Self::open_s3(rest, true)
        } else if let Some(rest) = url.strip_prefix("az://") {
            Self::open_azure(rest)
        } else if let Some(rest) = url.strip_prefix("memory://") {
            Ok(Self::with_store(Arc::new(InMemory::new()), rest, ""))
        } else {
            Self::open_local(url.strip_prefix("file://").unwrap_or(url))
        }
    }

    /// Wrap an existing object store
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        container: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            container: container.into(),
            prefix: prefix.into(),
        }
    }

    fn open_gcs(rest: &str, service_account: Option<&PathBuf>) -> Result<Self> {
        let (bucket, prefix) = split_bucket(rest);

        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(path) = service_account {
            builder = builder.with_service_account_path(path.to_string_lossy());
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self::with_store(Arc::new(store), bucket, prefix))
    }

    fn open_s3(rest: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = split_bucket(rest);

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self::with_store(Arc::new(store), bucket, prefix))
    }

    fn open_azure(rest: &str) -> Result<Self> {
        let (container, prefix) = split_bucket(rest);

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self::with_store(Arc::new(store), container, prefix))
    }

    fn open_local(path: &str) -> Result<Self> {
        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to open local source {path}: {e}")))?;

        Ok(Self::with_store(Arc::new(store), path, ""))
    }

    /// Bucket or container name
    pub fn container(&self) -> &str {
        &self.container
    }

    /// List every object identifier in the container
    ///
    /// Identifiers are full object keys, sorted lexicographically so that
    /// listing order is the same on every backend.
    pub async fn list_objects(&self) -> Result<Vec<String>> {
        let prefix = (!self.prefix.is_empty()).then(|| ObjectPath::from(self.prefix.as_str()));

        let metas: Vec<_> = self
            .store
            .list(prefix.as_ref())
            .try_collect()
            .await
            .map_err(|e| Error::listing(&self.container, e.to_string()))?;

        let mut names: Vec<String> = metas
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        names.sort();

        tracing::debug!("Listed {} objects in {}", names.len(), self.container);
        Ok(names)
    }

    /// Download one object as text
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub async fn download_text(&self, identifier: &str) -> Result<String> {
        let location = ObjectPath::from(identifier);

        let result = self.store.get(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => Error::ObjectNotFound {
                object: identifier.to_string(),
            },
            other => Error::download(identifier, other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| Error::download(identifier, e.to_string()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Split `bucket/prefix/...` into bucket and prefix
fn split_bucket(rest: &str) -> (&str, String) {
    match rest.find('/') {
        Some(idx) => (&rest[..idx], rest[idx + 1..].trim_end_matches('/').to_string()),
        None => (rest, String::new()),
    }
}
