// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/latex/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/latex")
                    .route("/convert", web::get().to(handlers::convert_get))
                    .route("/convert", web::post().to(handlers::convert_post)),
            ),
    );
}
