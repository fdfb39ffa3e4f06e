use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::models::{ApiError, DeleteListingRequest, ListingQuery, ListingRequest, ListingResponse};
use crate::services::ListingService;
use crate::traits::DocumentStore;

fn log_failure(action: &str, e: &ApiError) {
    match e {
        ApiError::Validation(_)
        | ApiError::InvalidId(_)
        | ApiError::InvalidCredentials(_)
        | ApiError::MalformedQuery(_) => {
            warn!("Rejected {}: {}", action, e)
        }
        ApiError::NotFound(_) => info!("{}: {}", action, e),
        // Internal failures are logged when the response is rendered.
        _ => {}
    }
}

// Search listings
pub async fn get_listings<S: DocumentStore>(
    service: web::Data<ListingService<S>>,
    query: web::Query<ListingQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Searching listings: {:?}", query);

    match service.find_listings(&query).await {
        Ok(listings) => {
            info!("Found {} listings", listings.len());
            let body: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            log_failure("listing search", &e);
            Err(e)
        }
    }
}

// Get a listing by ID
pub async fn get_listing<S: DocumentStore>(
    service: web::Data<ListingService<S>>,
    listing_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    info!("Getting listing with ID: {}", listing_id);

    let listing = service.get_listing(&listing_id).await.map_err(|e| {
        log_failure("listing lookup", &e);
        e
    })?;
    Ok(HttpResponse::Ok().json(ListingResponse::from(listing)))
}

// Create a new listing
pub async fn create_listing<S: DocumentStore>(
    service: web::Data<ListingService<S>>,
    listing_data: web::Json<ListingRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Creating new listing: {:?}", listing_data.name);

    match service.create_listing(&listing_data).await {
        Ok(outcome) => {
            info!("Successfully created listing {}", outcome.inserted_id);
            Ok(HttpResponse::Ok().json(outcome))
        }
        Err(e) => {
            log_failure("listing creation", &e);
            Err(e)
        }
    }
}

// Replace a listing
pub async fn update_listing<S: DocumentStore>(
    service: web::Data<ListingService<S>>,
    listing_id: web::Path<String>,
    listing_data: web::Json<ListingRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Replacing listing with ID: {}", listing_id);

    match service.replace_listing(&listing_id, &listing_data).await {
        Ok(outcome) => {
            info!("Replaced listing {} (modified: {})", listing_id, outcome.modified_count);
            Ok(HttpResponse::Ok().json(outcome))
        }
        Err(e) => {
            log_failure("listing update", &e);
            Err(e)
        }
    }
}

// Delete a listing after checking florist credentials
pub async fn delete_listing<S: DocumentStore>(
    service: web::Data<ListingService<S>>,
    listing_id: web::Path<String>,
    credentials: web::Json<DeleteListingRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Deleting listing with ID: {}", listing_id);

    match service.delete_listing(&listing_id, &credentials).await {
        Ok(outcome) => {
            info!("Successfully deleted listing {}", listing_id);
            Ok(HttpResponse::Ok().json(outcome))
        }
        Err(e) => {
            log_failure("listing deletion", &e);
            Err(e)
        }
    }
}
