// src/api/parser.rs
//! Turns raw HTTP responses into typed results or typed errors.

use super::client::ApiResponse;
use super::responses::NotionError;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};

/// Parse any Notion API response, mapping error bodies onto [`AppError::NotionService`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status.as_u16(), &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(body: &str, status: u16, url: &str) -> AppError {
    match serde_json::from_str::<NotionError>(body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: error.status,
        },
        // Proxies and gateways answer with bodies Notion never wrote.
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status),
            message: format!("HTTP {} from {}: {}", status, url, preview(body)),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
