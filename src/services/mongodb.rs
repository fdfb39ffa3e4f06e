use mongodb::{Client, Collection, Database, IndexModel};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use futures_util::TryStreamExt;
use log::{debug, info};

use crate::config::AppConfig;
use crate::models::{ApiError, Filter};
use crate::traits::{CollectionName, DeleteOutcome, DocumentStore, UpdateOutcome};

#[derive(Clone)]
pub struct MongoDBService {
    client: Client,
    listings: Collection<Document>,
    florists: Collection<Document>,
}

impl MongoDBService {
    pub async fn init(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        // Parse options and configure client
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;

        // Set the server API version to V1
        let server_api = ServerApi::builder()
            .version(ServerApiVersion::V1)
            .build();
        client_options.server_api = Some(server_api);

        client_options.connect_timeout = Some(std::time::Duration::from_secs(10));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("flower-stop-backend".to_string());

        let client = Client::with_options(client_options)?;

        // Test connection
        client
            .database("admin")
            .run_command(doc! {"ping": 1}, None)
            .await?;

        info!("Successfully connected to MongoDB, using database {}", config.database);

        let db = client.database(&config.database);
        Self::create_indexes(&db).await?;

        Ok(Self {
            listings: db.collection(CollectionName::Listings.as_str()),
            florists: db.collection(CollectionName::Florists.as_str()),
            client,
        })
    }

    async fn create_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
        let listings = db.collection::<Document>(CollectionName::Listings.as_str());
        let florists = db.collection::<Document>(CollectionName::Florists.as_str());

        // Range queries on price
        let price_model = IndexModel::builder()
            .keys(doc! { "price": 1 })
            .build();
        listings.create_index(price_model, None).await?;

        // Multikey index for flower_type membership filters
        let flower_type_model = IndexModel::builder()
            .keys(doc! { "flower_type": 1 })
            .build();
        listings.create_index(flower_type_model, None).await?;

        // Login lookups and the listing delete check
        let login_model = IndexModel::builder()
            .keys(doc! { "login_email": 1, "username": 1 })
            .build();
        florists.create_index(login_model, None).await?;

        Ok(())
    }

    /// Close pooled connections. Call once the HTTP server has stopped.
    pub async fn shutdown(self) {
        info!("Closing MongoDB connections");
        self.client.shutdown().await;
    }

    fn collection(&self, name: CollectionName) -> &Collection<Document> {
        match name {
            CollectionName::Listings => &self.listings,
            CollectionName::Florists => &self.florists,
        }
    }
}

impl DocumentStore for MongoDBService {
    async fn find(&self, collection: CollectionName, filter: &Filter) -> Result<Vec<Document>, ApiError> {
        let query = filter.to_document();
        debug!("find in {}: {}", collection.as_str(), query);
        let documents: Vec<Document> = self
            .collection(collection)
            .find(query, None)
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    async fn insert_one(&self, collection: CollectionName, document: Document) -> Result<ObjectId, ApiError> {
        let result = self.collection(collection).insert_one(document, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::Internal(format!("Unexpected inserted id: {}", result.inserted_id)))
    }

    async fn replace_one(
        &self,
        collection: CollectionName,
        id: &ObjectId,
        document: Document,
    ) -> Result<UpdateOutcome, ApiError> {
        let result = self
            .collection(collection)
            .replace_one(doc! { "_id": *id }, document, None)
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: CollectionName, id: &ObjectId) -> Result<DeleteOutcome, ApiError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": *id }, None)
            .await?;
        Ok(DeleteOutcome { deleted_count: result.deleted_count })
    }
}
