use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::{Deserialize, Serialize};

/// `POST /upload-image` body. The file is optional so a missing part can be
/// answered with a proper 400.
#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(rename = "file", limit = "5MiB")]
    pub file: Option<TempFile>,
}

/// A file read out of the multipart body, ready to hand to blob storage.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SignedImageQuery {
    pub token: String,
}

/// Blob bytes plus the content type they should be served with.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}
