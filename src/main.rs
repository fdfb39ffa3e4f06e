use std::sync::Arc;
use actix_web::{App, HttpServer, web};
use actix_cors::Cors;
use log::{info, error};
use dotenv::dotenv;
mod models;
mod handlers;
mod routes;
mod services;
mod utils;
mod config;
mod traits;
use services::{MongoDBService, ListingService, FloristService};
use config::AppConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let config = AppConfig::load();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.as_str()));
    config.log_summary();

    let mongodb = MongoDBService::init(&config).await.map_err(|e| {
        error!("Failed to initialize MongoDB: {}", e);
        e
    })?;
    let store = Arc::new(mongodb.clone());

    let listing_service = web::Data::new(ListingService::new(store.clone()));
    let florist_service = web::Data::new(FloristService::new(store.clone()));

    info!("Starting server at http://{}", config.bind_address());

    HttpServer::new(move || {
        // Configure CORS middleware
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .app_data(listing_service.clone())
            .app_data(florist_service.clone())
            .configure(routes::configure::<MongoDBService>)
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    info!("Server shutting down");
    drop(store);
    mongodb.shutdown().await;
    Ok(())
}
