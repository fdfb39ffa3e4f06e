use actix_web::web;
use crate::handlers::listing_handlers;
use crate::traits::DocumentStore;

pub fn configure<S: DocumentStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/listings")
            .route("", web::get().to(listing_handlers::get_listings::<S>))
            .route("", web::post().to(listing_handlers::create_listing::<S>))
            .route("/{id}", web::get().to(listing_handlers::get_listing::<S>))
            .route("/{id}", web::put().to(listing_handlers::update_listing::<S>))
            .route("/{id}", web::delete().to(listing_handlers::delete_listing::<S>))
    );
}
