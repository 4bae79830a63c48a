use actix_multipart::form::MultipartForm;
use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::image::{ImageUpload, ImageUploadForm, SignedImageQuery},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, form))]
pub async fn upload_image(
    state: web::Data<AppState>,
    form: MultipartForm<ImageUploadForm>,
) -> Result<impl Responder, AppError> {
    let file = form
        .into_inner()
        .file
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let bytes = tokio::fs::read(file.file.path()).await.map_err(|e| {
        tracing::error!("Failed to read uploaded temp file: {}", e);
        AppError::InternalError("Failed to upload file".to_string())
    })?;

    let upload = ImageUpload {
        original_name: file.file_name.unwrap_or_default(),
        content_type: file.content_type.map(|mime| mime.to_string()),
        bytes,
    };

    let uploaded = state.image_handler.upload_image(upload).await?;
    Ok(HttpResponse::Ok().json(uploaded))
}

#[instrument(skip(file_name, state, query))]
pub async fn serve_image(
    file_name: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<SignedImageQuery>,
) -> Result<impl Responder, AppError> {
    let image = state
        .image_handler
        .open_image(&file_name, &query.token)
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, image.content_type))
        .insert_header((header::CACHE_CONTROL, "private, max-age=3600"))
        .body(image.bytes))
}
