use actix_web::web;

use crate::handlers::footer;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/footer")
            .route(web::get().to(footer::get_footer))
            .route(web::put().to(footer::update_footer))
    );
}
