use actix_web::web;

use crate::handlers::system;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .service(web::resource("").route(web::get().to(system::health_check)))
            .service(web::resource("/details").route(web::get().to(system::health_details)))
    );
}
