use actix_web::web;
use crate::handlers::florist_handlers;
use crate::traits::DocumentStore;

pub fn configure<S: DocumentStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/florists")
            .route("", web::get().to(florist_handlers::get_florists::<S>))
            .route("", web::post().to(florist_handlers::create_florist::<S>))
            .route("/{id}", web::get().to(florist_handlers::get_florist::<S>))
            .route("/{id}", web::put().to(florist_handlers::update_florist::<S>))
            .route("/{id}", web::delete().to(florist_handlers::delete_florist::<S>))
    );
}
