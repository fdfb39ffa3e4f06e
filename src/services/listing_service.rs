use std::sync::Arc;
use log::{info, warn};
use mongodb::bson;

use crate::models::{ApiError, DeleteListingRequest, Filter, Listing, ListingQuery, ListingRequest};
use crate::services::parse_object_id;
use crate::traits::{CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};
use crate::utils::{query_builder, validation};

pub const CREDENTIALS_MISMATCH: &str = "Email or florist ID incorrect.";

pub struct ListingService<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> ListingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn find_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, ApiError> {
        let filter = query_builder::listing_filter(query)?;
        self.store
            .find(CollectionName::Listings, &filter)
            .await?
            .into_iter()
            .map(|doc| bson::from_document(doc).map_err(ApiError::from))
            .collect()
    }

    pub async fn get_listing(&self, id: &str) -> Result<Listing, ApiError> {
        let object_id = parse_object_id(id)?;
        let found = self
            .store
            .find(CollectionName::Listings, &Filter::equals("_id", object_id))
            .await?;
        match found.into_iter().next() {
            Some(doc) => Ok(bson::from_document(doc)?),
            None => Err(ApiError::NotFound(format!("Listing {} not found", id))),
        }
    }

    pub async fn create_listing(&self, request: &ListingRequest) -> Result<InsertOutcome, ApiError> {
        // Nothing reaches the store unless every rule passes.
        let listing = validation::validate_listing(request, chrono::Utc::now())?;
        let document = bson::to_document(&listing)?;
        let id = self.store.insert_one(CollectionName::Listings, document).await?;
        info!("Inserted listing {} ({})", id, listing.name);
        Ok(InsertOutcome { inserted_id: id.to_hex() })
    }

    /// Overwrite the whole listing; fields absent from `request` are dropped.
    pub async fn replace_listing(&self, id: &str, request: &ListingRequest) -> Result<UpdateOutcome, ApiError> {
        let object_id = parse_object_id(id)?;
        let listing = validation::validate_listing(request, chrono::Utc::now())?;
        let document = bson::to_document(&listing)?;
        let outcome = self
            .store
            .replace_one(CollectionName::Listings, &object_id, document)
            .await?;
        if outcome.matched_count == 0 {
            return Err(ApiError::NotFound(format!("Listing {} not found", id)));
        }
        Ok(outcome)
    }

    /// Delete after confirming the florist id and login email belong to one florist.
    pub async fn delete_listing(
        &self,
        id: &str,
        credentials: &DeleteListingRequest,
    ) -> Result<DeleteOutcome, ApiError> {
        let object_id = parse_object_id(id)?;

        let florist_id = match parse_object_id(&credentials.florist_id) {
            Ok(florist_id) => florist_id,
            Err(_) => {
                warn!("Rejected delete of listing {}: malformed florist id", id);
                return Err(ApiError::InvalidCredentials(CREDENTIALS_MISMATCH.to_string()));
            }
        };
        let ownership = Filter::and(vec![
            Filter::equals("_id", florist_id),
            Filter::equals("login_email", credentials.login_email.trim()),
        ]);
        let florists = self.store.find(CollectionName::Florists, &ownership).await?;
        if florists.len() != 1 {
            warn!("Rejected delete of listing {}: {} florist(s) matched", id, florists.len());
            return Err(ApiError::InvalidCredentials(CREDENTIALS_MISMATCH.to_string()));
        }
        info!(
            "Florist {} ({}) deleting listing {}",
            florist_id,
            florists[0].get_str("username").unwrap_or("unknown"),
            id
        );

        let outcome = self.store.delete_one(CollectionName::Listings, &object_id).await?;
        if outcome.deleted_count == 0 {
            return Err(ApiError::NotFound(format!("Listing {} not found", id)));
        }
        Ok(outcome)
    }
}
