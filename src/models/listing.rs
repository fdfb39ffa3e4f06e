use serde::{Deserialize, Serialize};
use mongodb::bson::{self, oid::ObjectId};

/// A number that clients may send either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericInput {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Integer(i) => *i as f64,
            NumericInput::Float(f) => *f,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumericInput::Integer(i) => Some(*i),
            NumericInput::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            NumericInput::Float(_) => None,
            NumericInput::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// The value as the client wrote it, for length checks on phone numbers.
    pub fn as_text(&self) -> String {
        match self {
            NumericInput::Integer(i) => i.to_string(),
            NumericInput::Float(f) => f.to_string(),
            NumericInput::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FloristRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub contact_method: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Listing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_listed: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub flower_type: Vec<String>,
    pub price: f64,
    pub occasion: Vec<String>,
    pub quantity: i64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist: Option<FloristRef>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FloristRefResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub contact_method: Vec<String>,
}

/// JSON shape of a listing: hex ids and a `YYYY-MM-DD` date, as clients send them.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListingResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub date_listed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub flower_type: Vec<String>,
    pub price: f64,
    pub occasion: Vec<String>,
    pub quantity: i64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub florist: Option<FloristRefResponse>,
}

impl From<FloristRef> for FloristRefResponse {
    fn from(florist: FloristRef) -> Self {
        Self {
            florist_id: florist.florist_id.map(|id| id.to_hex()),
            florist_name: florist.florist_name,
            contact: florist.contact,
            contact_method: florist.contact_method,
        }
    }
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: listing.name,
            date_listed: listing.date_listed.format("%Y-%m-%d").to_string(),
            description: listing.description,
            flower_type: listing.flower_type,
            price: listing.price,
            occasion: listing.occasion,
            quantity: listing.quantity,
            image: listing.image,
            florist: listing.florist.map(FloristRefResponse::from),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FloristRefRequest {
    pub florist_id: Option<String>,
    pub florist_name: Option<String>,
    pub contact: Option<NumericInput>,
    #[serde(default)]
    pub contact_method: Vec<String>,
}

/// Body of `POST /listings` and `PUT /listings/{id}`. Every field is optional
/// here so that missing fields surface as violations rather than parse errors.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListingRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_listed: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub flower_type: Vec<String>,
    #[serde(default)]
    pub price: Option<NumericInput>,
    #[serde(default)]
    pub occasion: Vec<String>,
    #[serde(default)]
    pub quantity: Option<NumericInput>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub florist: Option<FloristRefRequest>,
}

/// Query string of `GET /listings`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListingQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub flower_type: Option<String>,
    pub occasion: Option<String>,
    pub price: Option<String>,
    pub price_greater: Option<String>,
    pub price_lesser: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeleteListingRequest {
    pub florist_id: String,
    pub login_email: String,
}
