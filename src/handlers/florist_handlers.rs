use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::models::{ApiError, FloristQuery, FloristRequest, FloristResponse};
use crate::services::FloristService;
use crate::traits::DocumentStore;

/// Search florists, or log in when both username and login email are given.
pub async fn get_florists<S: DocumentStore>(
    service: web::Data<FloristService<S>>,
    query: web::Query<FloristQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Searching florists (login attempt: {})", query.is_login());

    match service.find_florists(&query).await {
        Ok(florists) => {
            info!("Found {} florists", florists.len());
            let body: Vec<FloristResponse> = florists.into_iter().map(FloristResponse::from).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(ApiError::InvalidCredentials(msg)) => {
            warn!("Florist login failed");
            Err(ApiError::InvalidCredentials(msg))
        }
        Err(e) => Err(e),
    }
}

pub async fn get_florist<S: DocumentStore>(
    service: web::Data<FloristService<S>>,
    florist_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    info!("Getting florist with ID: {}", florist_id);
    let florist = service.get_florist(&florist_id).await?;
    Ok(HttpResponse::Ok().json(FloristResponse::from(florist)))
}

pub async fn create_florist<S: DocumentStore>(
    service: web::Data<FloristService<S>>,
    florist_data: web::Json<FloristRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Creating new florist: {:?}", florist_data.username);

    match service.create_florist(&florist_data).await {
        Ok(outcome) => {
            info!("Successfully created florist {}", outcome.inserted_id);
            Ok(HttpResponse::Ok().json(outcome))
        }
        Err(ApiError::Validation(errors)) => {
            warn!("Rejected florist: {}", errors);
            Err(ApiError::Validation(errors))
        }
        Err(e) => Err(e),
    }
}

pub async fn update_florist<S: DocumentStore>(
    service: web::Data<FloristService<S>>,
    florist_id: web::Path<String>,
    florist_data: web::Json<FloristRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Replacing florist with ID: {}", florist_id);

    match service.replace_florist(&florist_id, &florist_data).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(ApiError::Validation(errors)) => {
            warn!("Rejected florist update: {}", errors);
            Err(ApiError::Validation(errors))
        }
        Err(e) => Err(e),
    }
}

// No ownership check: any caller holding the id may delete the profile.
pub async fn delete_florist<S: DocumentStore>(
    service: web::Data<FloristService<S>>,
    florist_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    info!("Deleting florist with ID: {}", florist_id);
    let outcome = service.delete_florist(&florist_id).await?;
    info!("Successfully deleted florist {}", florist_id);
    Ok(HttpResponse::Ok().json(outcome))
}
