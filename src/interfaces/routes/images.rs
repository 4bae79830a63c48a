use actix_web::web;

use crate::handlers::images;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/upload-image")
            .route(web::post().to(images::upload_image))
    );
    cfg.service(
        web::resource("/images/{file_name}")
            .route(web::get().to(images::serve_image))
    );
}
