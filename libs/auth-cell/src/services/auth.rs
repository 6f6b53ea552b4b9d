use serde_json::Value;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_http::{ApiClient, ApiError};
use shared_models::auth::{LoginRequest, LoginResponse, RegisterRequest};

use crate::models::{AuthError, LOGIN_FAILED, REGISTRATION_FAILED};

/// Client for the public `/auth` routes. Performs no local validation.
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Exchanges credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.api
            .post("/auth/login", None, &request)
            .await
            .map_err(|e| map_api_error(e, LOGIN_FAILED, AuthError::Login))?;

        match response.token.filter(|token| !token.is_empty()) {
            Some(token) => {
                info!("Login succeeded for {}", username);
                Ok(token)
            }
            None => {
                warn!("Login response for {} carried no token", username);
                Err(AuthError::Unexpected(LOGIN_FAILED.to_string()))
            }
        }
    }

    /// Registers a new account. Password confirmation is forwarded and
    /// checked by the server.
    pub async fn register(&self, username: &str, password: &str,
                          confirm_password: &str) -> Result<Value, AuthError> {
        debug!("Registering {}", username);

        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };

        let payload: Value = self.api
            .post("/auth/register", None, &request)
            .await
            .map_err(|e| map_api_error(e, REGISTRATION_FAILED, AuthError::Registration))?;

        info!("Registered {}", username);
        Ok(payload)
    }
}

fn map_api_error(err: ApiError, fallback: &str, remote: fn(String) -> AuthError) -> AuthError {
    match &err {
        ApiError::Http { .. } => remote(err.message_or(fallback)),
        other => {
            warn!("Auth request failed before a response: {}", other);
            AuthError::Unexpected(fallback.to_string())
        }
    }
}
