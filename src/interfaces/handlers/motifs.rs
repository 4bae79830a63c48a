use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_motifs(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let motifs = state.motif_handler.list_motifs().await?;
    Ok(HttpResponse::Ok().json(json!({ "motifs": motifs })))
}

#[instrument(skip(motif_id, state))]
pub async fn get_motif(
    motif_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let motif = state.motif_handler.get_motif(&motif_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "motif": motif })))
}

#[instrument(skip(state, body))]
pub async fn create_motif(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let id = state.motif_handler.create_motif(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "id": id })))
}

#[instrument(skip(motif_id, state, body))]
pub async fn update_motif(
    motif_id: web::Path<String>,
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let id = state
        .motif_handler
        .update_motif(&motif_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "id": id })))
}

#[instrument(skip(motif_id, state))]
pub async fn delete_motif(
    motif_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.motif_handler.delete_motif(&motif_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
