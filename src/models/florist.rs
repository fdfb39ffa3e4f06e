use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;
use crate::models::NumericInput;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethod {
    #[serde(rename = "whatsapp")]
    Whatsapp,
    #[serde(rename = "instagram")]
    Instagram,
    #[serde(rename = "facebook")]
    Facebook,
}

impl std::str::FromStr for ContactMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whatsapp" => Ok(ContactMethod::Whatsapp),
            "instagram" => Ok(ContactMethod::Instagram),
            "facebook" => Ok(ContactMethod::Facebook),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactMethod::Whatsapp => write!(f, "whatsapp"),
            ContactMethod::Instagram => write!(f, "instagram"),
            ContactMethod::Facebook => write!(f, "facebook"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Florist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub username: String,
    pub login_email: String,
    pub contact_method: Vec<ContactMethod>,
    #[serde(default)]
    pub contact: Contact,
}

/// JSON shape of a florist with the id as a hex string.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FloristResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub login_email: String,
    pub contact_method: Vec<ContactMethod>,
    pub contact: Contact,
}

impl From<Florist> for FloristResponse {
    fn from(florist: Florist) -> Self {
        Self {
            id: florist.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: florist.name,
            username: florist.username,
            login_email: florist.login_email,
            contact_method: florist.contact_method,
            contact: florist.contact,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ContactRequest {
    pub number: Option<NumericInput>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
}

/// Body of `POST /florists` and `PUT /florists/{id}`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FloristRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub login_email: Option<String>,
    #[serde(default)]
    pub contact_method: Vec<String>,
    #[serde(default)]
    pub contact: ContactRequest,
}

/// Query string of `GET /florists`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FloristQuery {
    pub username: Option<String>,
    pub login_email: Option<String>,
}

impl FloristQuery {
    /// Both credentials supplied: the caller is trying to log in.
    pub fn is_login(&self) -> bool {
        self.username.as_deref().map_or(false, |u| !u.trim().is_empty())
            && self.login_email.as_deref().map_or(false, |e| !e.trim().is_empty())
    }
}
