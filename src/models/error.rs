use serde::Serialize;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "We have encountered an internal server error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<ViolationResponse>>,
}

#[derive(Debug, Serialize)]
pub struct ViolationResponse {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationKind {
    Required,
    NotANumber,
    NotPositiveNumber,
    NotPositiveInteger,
    InvalidImageExtension,
    InvalidDate,
    InvalidId,
    InvalidEmail,
    TooShort { min: usize },
    UnsupportedContactMethod { value: String },
    MissingDomain { domain: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub label: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: &str, label: &str, kind: ViolationKind) -> Self {
        Self { field: field.to_string(), label: label.to_string(), kind }
    }

    pub fn message(&self) -> String {
        let label = &self.label;
        match &self.kind {
            ViolationKind::Required => format!("{} is required.", label),
            ViolationKind::NotANumber => format!("{} must be a number.", label),
            ViolationKind::NotPositiveNumber => format!("{} must be a number greater than 0.", label),
            ViolationKind::NotPositiveInteger => format!("{} must be a whole number greater than 0.", label),
            ViolationKind::InvalidImageExtension => format!("{} must end with .jpg, .jpeg or .png.", label),
            ViolationKind::InvalidDate => format!("{} must be a date in YYYY-MM-DD format.", label),
            ViolationKind::InvalidId => format!("{} is not a valid identifier.", label),
            ViolationKind::InvalidEmail => format!("{} must contain '@' and '.'.", label),
            ViolationKind::TooShort { min } => format!("{} must be at least {} characters long.", label, min),
            ViolationKind::UnsupportedContactMethod { value } => {
                format!("{} '{}' is not one of whatsapp, instagram or facebook.", label, value)
            }
            ViolationKind::MissingDomain { domain } => format!("{} must contain {}.", label, domain),
        }
    }
}

/// Every rule that failed for one request body or query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn push(&mut self, field: &str, label: &str, kind: ViolationKind) {
        self.0.push(Violation::new(field, label, kind));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn has(&self, field: &str, kind: &ViolationKind) -> bool {
        self.0.iter().any(|v| v.field == field && &v.kind == kind)
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ApiError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(Violation::message).collect();
        write!(f, "{}", messages.join(" "))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::bson::ser::Error> for ApiError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ApiError {
    fn from(e: mongodb::bson::de::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidId(_)
            | ApiError::InvalidCredentials(_)
            | ApiError::MalformedBody(_)
            | ApiError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Serialization(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: errors.to_string(),
                violations: Some(
                    errors
                        .0
                        .iter()
                        .map(|v| ViolationResponse {
                            field: v.field.clone(),
                            kind: v.kind.clone(),
                            message: v.message(),
                        })
                        .collect(),
                ),
            },
            ApiError::InvalidId(_) => ErrorResponse {
                code: "INVALID_ID".to_string(),
                message: self.to_string(),
                violations: None,
            },
            ApiError::InvalidCredentials(msg) => ErrorResponse {
                code: "INVALID_CREDENTIALS".to_string(),
                message: msg.clone(),
                violations: None,
            },
            ApiError::MalformedBody(_) => ErrorResponse {
                code: "MALFORMED_BODY".to_string(),
                message: self.to_string(),
                violations: None,
            },
            ApiError::MalformedQuery(_) => ErrorResponse {
                code: "MALFORMED_QUERY".to_string(),
                message: self.to_string(),
                violations: None,
            },
            ApiError::NotFound(_) => ErrorResponse {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
                violations: None,
            },
            ApiError::Database(_) | ApiError::Serialization(_) | ApiError::Internal(_) => {
                // Details stay in the operator log.
                log::error!("{}", self);
                ErrorResponse {
                    code: "INTERNAL_ERROR".to_string(),
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                    violations: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
