use actix_web::web;

use crate::{constants::API_PREFIX, handlers::home::home};

mod footer;
mod images;
mod json_error;
mod motifs;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(system::config_routes)
            .configure(motifs::config_routes)
            .configure(footer::config_routes)
            .configure(images::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
