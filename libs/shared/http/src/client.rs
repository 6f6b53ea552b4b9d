use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Http { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of an error body, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// JSON client for the consultations REST API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending without credentials"),
            }
        }

        headers
    }

    fn builder(&self, method: Method, path: &str, auth_token: Option<&str>) -> (String, RequestBuilder) {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let req = self.client.request(method, &url)
            .headers(self.get_headers(auth_token));

        (url, req)
    }

    pub async fn get<T>(&self, path: &str, auth_token: Option<&str>,
                        query: &[(&str, &str)]) -> Result<T, ApiError>
    where T: DeserializeOwned {
        let (url, mut req) = self.builder(Method::GET, path, auth_token);

        if !query.is_empty() {
            req = req.query(query);
        }

        self.execute(&url, req).await
    }

    pub async fn post<B, T>(&self, path: &str, auth_token: Option<&str>,
                            body: &B) -> Result<T, ApiError>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        let (url, req) = self.builder(Method::POST, path, auth_token);
        self.execute(&url, req.json(body)).await
    }

    async fn execute<T>(&self, url: &str, req: RequestBuilder) -> Result<T, ApiError>
    where T: DeserializeOwned {
        let response = req.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("API error ({}) from {}: {}", status, url, body);

            return Err(ApiError::Http {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        serde_json::from_str::<T>(&body)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pulls a non-blank `message` string out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    value.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
