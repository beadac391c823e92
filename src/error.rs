// src/error.rs
//! Application error types with structured error handling.
//!
//! Failures that establish a record set (query execution, record mapping,
//! schema reads) propagate through [`AppError`]. Failures while enriching a
//! single block never reach this type; see `content::preview::PreviewError`.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => Self::ObjectNotFound,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid query criteria: {0}")]
    InvalidCriteria(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Record {record} has a malformed '{property}' property: {reason}")]
    MalformedRecord {
        record: String,
        property: String,
        reason: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Content store unavailable: {0}")]
    StoreUnavailable(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Builds a [`AppError::MalformedRecord`] for the given record and property.
    pub fn malformed_record(
        record: impl fmt::Display,
        property: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            record: record.to_string(),
            property: property.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the store reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::NotionService { code, .. } => code.is_not_found(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}
