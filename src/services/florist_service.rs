use std::sync::Arc;
use log::info;
use mongodb::bson;

use crate::models::{ApiError, Filter, Florist, FloristQuery, FloristRequest};
use crate::services::parse_object_id;
use crate::traits::{CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};
use crate::utils::{query_builder, validation};

pub const LOGIN_MISMATCH: &str = "Username or login email incorrect.";

pub struct FloristService<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> FloristService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Exact-match lookup. Supplying both `username` and `login_email` is a
    /// login attempt, and an empty result is then reported as bad credentials.
    pub async fn find_florists(&self, query: &FloristQuery) -> Result<Vec<Florist>, ApiError> {
        let filter = query_builder::florist_filter(query);
        let florists = self
            .store
            .find(CollectionName::Florists, &filter)
            .await?
            .into_iter()
            .map(|doc| bson::from_document(doc).map_err(ApiError::from))
            .collect::<Result<Vec<Florist>, ApiError>>()?;

        if florists.is_empty() && query.is_login() {
            return Err(ApiError::InvalidCredentials(LOGIN_MISMATCH.to_string()));
        }
        Ok(florists)
    }

    pub async fn get_florist(&self, id: &str) -> Result<Florist, ApiError> {
        let object_id = parse_object_id(id)?;
        let found = self
            .store
            .find(CollectionName::Florists, &Filter::equals("_id", object_id))
            .await?;
        match found.into_iter().next() {
            Some(doc) => Ok(bson::from_document(doc)?),
            None => Err(ApiError::NotFound(format!("Florist {} not found", id))),
        }
    }

    pub async fn create_florist(&self, request: &FloristRequest) -> Result<InsertOutcome, ApiError> {
        let florist = validation::validate_florist(request)?;
        let document = bson::to_document(&florist)?;
        let id = self.store.insert_one(CollectionName::Florists, document).await?;
        info!("Inserted florist {} ({})", id, florist.username);
        Ok(InsertOutcome { inserted_id: id.to_hex() })
    }

    pub async fn replace_florist(&self, id: &str, request: &FloristRequest) -> Result<UpdateOutcome, ApiError> {
        let object_id = parse_object_id(id)?;
        let florist = validation::validate_florist(request)?;
        let document = bson::to_document(&florist)?;
        let outcome = self
            .store
            .replace_one(CollectionName::Florists, &object_id, document)
            .await?;
        if outcome.matched_count == 0 {
            return Err(ApiError::NotFound(format!("Florist {} not found", id)));
        }
        Ok(outcome)
    }

    pub async fn delete_florist(&self, id: &str) -> Result<DeleteOutcome, ApiError> {
        let object_id = parse_object_id(id)?;
        let outcome = self.store.delete_one(CollectionName::Florists, &object_id).await?;
        if outcome.deleted_count == 0 {
            return Err(ApiError::NotFound(format!("Florist {} not found", id)));
        }
        Ok(outcome)
    }
}
