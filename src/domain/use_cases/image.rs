use std::path::Path;

use chrono::Utc;
use tracing::instrument;

use crate::{
    auth::signed_url::UrlSigner,
    entities::image::{ImageUpload, StoredImage, UploadedImage},
    errors::AppError,
    repositories::blob_store::BlobStore,
};

const FALLBACK_FILE_NAME: &str = "image";

/// Upload proxy in front of blob storage, plus signed retrieval.
pub struct ImageHandler<B>
where
    B: BlobStore,
{
    pub blob_store: B,
    pub signer: UrlSigner,
    pub max_upload_bytes: usize,
}

impl<B> ImageHandler<B>
where
    B: BlobStore,
{
    pub fn new(blob_store: B, signer: UrlSigner, max_upload_bytes: usize) -> Self {
        ImageHandler { blob_store, signer, max_upload_bytes }
    }

    /// Stores the file as `<timestamp>-<name>` and returns a long-lived signed URL
    #[instrument(skip(self, upload), fields(original_name = %upload.original_name, size = upload.bytes.len()))]
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, AppError> {
        if upload.bytes.len() > self.max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {} byte limit",
                self.max_upload_bytes
            )));
        }

        let file_name = timestamped_name(Utc::now().timestamp_millis(), &upload.original_name);

        self.blob_store
            .upload(&file_name, &upload.bytes, upload.content_type.as_deref())
            .await
            .map_err(|e| AppError::storage("Failed to upload file", e))?;

        let url = self.signer.signed_url(&file_name).map_err(|e| {
            tracing::error!("Error signing image URL: {}", e);
            AppError::InternalError("Failed to generate URL".to_string())
        })?;

        tracing::info!(file_name = %file_name, "Image uploaded");
        Ok(UploadedImage { file_name, url })
    }

    /// Serves a stored image to holders of a valid signed URL
    #[instrument(skip(self, token))]
    pub async fn open_image(&self, file_name: &str, token: &str) -> Result<StoredImage, AppError> {
        self.signer.verify(file_name, token)?;

        self.blob_store
            .download(file_name)
            .await
            .map_err(|e| AppError::storage("Failed to read image", e))?
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))
    }
}

/// `<millis>-<final path component of the client name>`
pub fn timestamped_name(millis: i64, original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.rsplit('\\').next().unwrap_or(name))
        .filter(|name| !name.is_empty() && *name != "..")
        .unwrap_or(FALLBACK_FILE_NAME);

    format!("{millis}-{base}")
}
