// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! Handles authentication and request/response plumbing; parsing lives in
//! `parser`, and nothing here knows about posts or portfolios.

use super::filter::QueryRequest;
use super::parser::parse_api_response;
use super::responses::{PaginatedResponse, RawBlock, RawDatabase, RawPage};
use super::ContentStore;
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::AppError;
use crate::types::{ApiKey, BlockId, Cursor, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against another API root, e.g. a local mock server.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let mut root = base_url.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base_url = Url::parse(&root).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::MalformedResponse(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = self.endpoint(path)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;
        log::trace!("GET {} -> {}", path, response.status());
        Ok(response)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, AppError> {
        let url = self.endpoint(path)?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "POST {} {}",
                url,
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }

        let response = self.client.post(url).json(body).send().await?;
        log::trace!("POST {} -> {}", path, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ContentStore for NotionHttpClient {
    async fn query_database(
        &self,
        database: &DatabaseId,
        request: &QueryRequest,
    ) -> Result<PaginatedResponse<RawPage>, AppError> {
        let path = format!("databases/{}/query", database.to_dashed());
        let response = self.post(&path, request).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn retrieve_page(&self, id: &PageId) -> Result<RawPage, AppError> {
        let path = format!("pages/{}", id.to_dashed());
        let response = self.get(&path, &[]).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn retrieve_database(&self, id: &DatabaseId) -> Result<RawDatabase, AppError> {
        let path = format!("databases/{}", id.to_dashed());
        let response = self.get(&path, &[]).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&Cursor>,
    ) -> Result<PaginatedResponse<RawBlock>, AppError> {
        let path = format!("blocks/{}/children", parent.to_dashed());
        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor.as_str().to_string()));
        }
        let response = self.get(&path, &query).await?;
        parse_api_response(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
