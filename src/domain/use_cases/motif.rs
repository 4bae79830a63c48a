use serde_json::Value;
use tracing::instrument;

use crate::{
    constants::{motif_key, MOTIF_KEY_PREFIX},
    errors::{AppError, StoreError},
    repositories::{blob_store::BlobStore, kv_store::KvStore},
};

/// What happened to the image of a deleted motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCleanup {
    /// The record had no uploaded image.
    NotNeeded,
    Removed,
    /// The blob was already gone.
    Missing,
    /// Removing the blob failed; the record was deleted anyway.
    Failed,
}

/// Record Service for motifs: a thin mapping from requests onto `motif:<id>` keys.
///
/// Bodies are stored as sent. Category membership and required fields are
/// checked by the authoring form, not here.
pub struct MotifHandler<K, B>
where
    K: KvStore,
    B: BlobStore,
{
    pub kv_store: K,
    pub blob_store: B,
}

impl<K, B> MotifHandler<K, B>
where
    K: KvStore,
    B: BlobStore,
{
    pub fn new(kv_store: K, blob_store: B) -> Self {
        MotifHandler { kv_store, blob_store }
    }

    /// Every record under the `motif:` prefix, in store order
    #[instrument(skip(self))]
    pub async fn list_motifs(&self) -> Result<Vec<Value>, AppError> {
        self.kv_store
            .get_by_prefix(MOTIF_KEY_PREFIX)
            .await
            .map_err(storage_failure("Failed to fetch motifs"))
    }

    #[instrument(skip(self))]
    pub async fn get_motif(&self, id: &str) -> Result<Value, AppError> {
        self.kv_store
            .get(&motif_key(id))
            .await
            .map_err(storage_failure("Failed to fetch motif"))?
            .ok_or_else(not_found)
    }

    /// Stores the whole body under `motif:<body.id>`, replacing any previous value
    #[instrument(skip(self, body))]
    pub async fn create_motif(&self, body: Value) -> Result<String, AppError> {
        let id = extract_id(&body)
            .ok_or_else(|| AppError::BadRequest("Motif ID is required".to_string()))?;

        self.kv_store
            .set(&motif_key(&id), &body)
            .await
            .map_err(storage_failure("Failed to create motif"))?;

        tracing::info!(motif_id = %id, "Motif stored");
        Ok(id)
    }

    /// Replaces an existing record wholesale; no field-level merge
    #[instrument(skip(self, body))]
    pub async fn update_motif(&self, id: &str, mut body: Value) -> Result<String, AppError> {
        self.get_motif(id).await?;

        // The stored id always matches the key suffix
        if let Value::Object(fields) = &mut body {
            fields.insert("id".to_string(), Value::String(id.to_string()));
        }

        self.kv_store
            .set(&motif_key(id), &body)
            .await
            .map_err(storage_failure("Failed to update motif"))?;

        tracing::info!(motif_id = %id, "Motif replaced");
        Ok(id.to_string())
    }

    /// Deletes the record, removing its uploaded image first when there is one.
    /// A failed image removal is logged and does not stop the record deletion.
    #[instrument(skip(self))]
    pub async fn delete_motif(&self, id: &str) -> Result<ImageCleanup, AppError> {
        let existing = self.get_motif(id).await?;

        let cleanup = match uploaded_file_name(&existing) {
            None => ImageCleanup::NotNeeded,
            Some(file_name) => match self.blob_store.remove(file_name).await {
                Ok(true) => ImageCleanup::Removed,
                Ok(false) => {
                    tracing::warn!(motif_id = %id, file_name, "Image blob was already missing");
                    ImageCleanup::Missing
                }
                Err(e) => {
                    tracing::warn!(motif_id = %id, file_name, "Failed to remove image blob: {}", e);
                    ImageCleanup::Failed
                }
            },
        };

        self.kv_store
            .delete(&motif_key(id))
            .await
            .map_err(storage_failure("Failed to delete motif"))?;

        tracing::info!(motif_id = %id, ?cleanup, "Motif deleted");
        Ok(cleanup)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Motif not found".to_string())
}

fn storage_failure(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| AppError::storage(context, e)
}

/// Ids may arrive as strings or numbers; empty and missing ids are rejected.
fn extract_id(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn uploaded_file_name(record: &Value) -> Option<&str> {
    record
        .get("fileName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}
