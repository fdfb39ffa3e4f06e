use mongodb::bson::{oid::ObjectId, Document};
use serde::Serialize;

use crate::models::{ApiError, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Listings,
    Florists,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Listings => "listings",
            CollectionName::Florists => "florists",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsertOutcome {
    pub inserted_id: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// The operations the handlers need from a document database.
///
/// Documents passed to `insert_one` and `replace_one` carry no `_id`; the
/// store assigns identities and keeps them across replacements.
#[allow(async_fn_in_trait)]
pub trait DocumentStore: 'static {
    async fn find(&self, collection: CollectionName, filter: &Filter) -> Result<Vec<Document>, ApiError>;

    async fn insert_one(&self, collection: CollectionName, document: Document) -> Result<ObjectId, ApiError>;

    async fn replace_one(
        &self,
        collection: CollectionName,
        id: &ObjectId,
        document: Document,
    ) -> Result<UpdateOutcome, ApiError>;

    async fn delete_one(&self, collection: CollectionName, id: &ObjectId) -> Result<DeleteOutcome, ApiError>;
}
