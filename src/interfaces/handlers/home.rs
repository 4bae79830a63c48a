use actix_web::{get, HttpResponse, Responder};

use crate::constants::API_PREFIX;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the MotifLAB catalog API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "api": API_PREFIX,
        "health": format!("{API_PREFIX}/health")
    }))
}
