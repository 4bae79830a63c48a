use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use tokio::{fs, io::AsyncWriteExt};

use crate::{entities::image::StoredImage, errors::StoreError};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Object storage for motif images. Objects are write-once: uploading to a
/// name that is already taken fails with `StoreError::AlreadyExists`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Prepares the bucket; safe to call on every start
    async fn init(&self) -> Result<(), StoreError>;

    async fn upload(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), StoreError>;

    async fn download(&self, name: &str) -> Result<Option<StoredImage>, StoreError>;

    /// Returns whether an object was actually removed
    async fn remove(&self, name: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl<T> BlobStore for Arc<T>
where
    T: BlobStore + ?Sized,
{
    async fn init(&self) -> Result<(), StoreError> {
        (**self).init().await
    }

    async fn upload(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        (**self).upload(name, bytes, content_type).await
    }

    async fn download(&self, name: &str) -> Result<Option<StoredImage>, StoreError> {
        (**self).download(name).await
    }

    async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        (**self).remove(name).await
    }
}

/// Object names are flat: no separators, no parent references.
pub fn validate_object_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn detect_content_type(bytes: &[u8]) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

// ───── Filesystem ────────────────────────────────────────────────────

/// One file per object inside a single directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBlobStore { root: root.into() }
    }

    fn object_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_object_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn init(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.root).await? {
            return Ok(());
        }

        fs::create_dir_all(&self.root).await?;
        tracing::info!("Created image storage directory: {}", self.root.display());
        Ok(())
    }

    async fn upload(
        &self,
        name: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let path = self.object_path(name)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(name.to_string()),
                _ => StoreError::from(e),
            })?;

        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }

    async fn download(&self, name: &str) -> Result<Option<StoredImage>, StoreError> {
        let path = self.object_path(name)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredImage {
                content_type: detect_content_type(&bytes),
                bytes,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.object_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

// ───── In-memory ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<String, StoredImage>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn upload(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        validate_object_name(name)?;

        match self.objects.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(name.to_string())),
            Entry::Vacant(entry) => {
                let content_type = content_type
                    .map(str::to_string)
                    .unwrap_or_else(|| detect_content_type(bytes));
                entry.insert(StoredImage { bytes: bytes.to_vec(), content_type });
                Ok(())
            }
        }
    }

    async fn download(&self, name: &str) -> Result<Option<StoredImage>, StoreError> {
        Ok(self.objects.get(name).map(|object| object.value().clone()))
    }

    async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.objects.remove(name).is_some())
    }
}
