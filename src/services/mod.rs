mod mongodb;
pub mod listing_service;
pub mod florist_service;
#[cfg(test)]
pub mod memory_store;

pub use self::mongodb::MongoDBService;
pub use listing_service::ListingService;
pub use florist_service::FloristService;

use ::mongodb::bson::oid::ObjectId;
use crate::models::ApiError;

pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw.trim()).map_err(|e| ApiError::InvalidId(format!("{}: {}", raw, e)))
}
