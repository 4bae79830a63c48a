use actix_web::web;

use crate::handlers::motifs;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/motifs")
            .service(
                web::resource("")
                    .route(web::get().to(motifs::list_motifs))
                    .route(web::post().to(motifs::create_motif))
            )
            .service(
                web::resource("/{motif_id}")
                    .route(web::get().to(motifs::get_motif))
                    .route(web::put().to(motifs::update_motif))
                    .route(web::delete().to(motifs::delete_motif))
            )
    );
}
