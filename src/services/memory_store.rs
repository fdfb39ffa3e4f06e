use std::collections::HashMap;

use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use crate::models::{ApiError, Filter};
use crate::traits::{CollectionName, DeleteOutcome, DocumentStore, UpdateOutcome};

/// `DocumentStore` kept in process memory, evaluating filters with
/// [`Filter::matches`]. Insertion order is preserved.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: CollectionName) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

impl DocumentStore for MemoryStore {
    async fn find(&self, collection: CollectionName, filter: &Filter) -> Result<Vec<Document>, ApiError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: CollectionName, mut document: Document) -> Result<ObjectId, ApiError> {
        let id = ObjectId::new();
        document.insert("_id", id);
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn replace_one(
        &self,
        collection: CollectionName,
        id: &ObjectId,
        mut document: Document,
    ) -> Result<UpdateOutcome, ApiError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .entry(collection)
            .or_default()
            .iter_mut()
            .find(|d| d.get_object_id("_id").ok() == Some(*id));
        match existing {
            Some(current) => {
                document.insert("_id", *id);
                let modified = *current != document;
                *current = document;
                Ok(UpdateOutcome { matched_count: 1, modified_count: u64::from(modified) })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete_one(&self, collection: CollectionName, id: &ObjectId) -> Result<DeleteOutcome, ApiError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        match docs.iter().position(|d| d.get_object_id("_id").ok() == Some(*id)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteOutcome { deleted_count: 1 })
            }
            None => Ok(DeleteOutcome::default()),
        }
    }
}

/// `DocumentStore` whose every call fails with `reason`, standing in for an
/// unreachable database.
pub struct FailingStore {
    pub reason: String,
}

impl FailingStore {
    pub fn new(reason: &str) -> Self {
        Self { reason: reason.to_string() }
    }

    fn fail<T>(&self) -> Result<T, ApiError> {
        Err(ApiError::Internal(self.reason.clone()))
    }
}

impl DocumentStore for FailingStore {
    async fn find(&self, _collection: CollectionName, _filter: &Filter) -> Result<Vec<Document>, ApiError> {
        self.fail()
    }

    async fn insert_one(&self, _collection: CollectionName, _document: Document) -> Result<ObjectId, ApiError> {
        self.fail()
    }

    async fn replace_one(
        &self,
        _collection: CollectionName,
        _id: &ObjectId,
        _document: Document,
    ) -> Result<UpdateOutcome, ApiError> {
        self.fail()
    }

    async fn delete_one(&self, _collection: CollectionName, _id: &ObjectId) -> Result<DeleteOutcome, ApiError> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn test_insert_find_replace_delete() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(CollectionName::Listings, doc! { "name": "Lilies", "price": 12.0 })
            .await
            .unwrap();
        store
            .insert_one(CollectionName::Listings, doc! { "name": "Orchids", "price": 80.0 })
            .await
            .unwrap();

        let cheap = Filter::Range { field: "price".into(), greater_than: None, less_than: Some(50.0) };
        let found = store.find(CollectionName::Listings, &cheap).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_object_id("_id").unwrap(), id);

        let outcome = store
            .replace_one(CollectionName::Listings, &id, doc! { "name": "Lilies" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 1 });
        let found = store.find(CollectionName::Listings, &cheap).await.unwrap();
        assert!(found.is_empty(), "replacement dropped the price field");

        assert_eq!(store.delete_one(CollectionName::Listings, &id).await.unwrap().deleted_count, 1);
        assert_eq!(store.delete_one(CollectionName::Listings, &id).await.unwrap().deleted_count, 0);
        assert_eq!(store.count(CollectionName::Listings).await, 1);
        assert_eq!(store.count(CollectionName::Florists).await, 0);
    }

    #[actix_web::test]
    async fn test_replace_missing_document_matches_nothing() {
        let store = MemoryStore::new();
        let outcome = store
            .replace_one(CollectionName::Florists, &ObjectId::new(), doc! { "name": "Ghost" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());
        assert_eq!(store.count(CollectionName::Florists).await, 0);
    }
}
