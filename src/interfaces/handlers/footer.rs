use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_footer(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let footer = state.footer_handler.get_footer().await?;
    Ok(HttpResponse::Ok().json(json!({ "footer": footer })))
}

#[instrument(skip(state, data))]
pub async fn update_footer(
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    state.footer_handler.update_footer(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
