use serde_json::Value;
use tracing::{error, warn};

use shared_config::AppConfig;
use shared_session::SessionContext;

use crate::models::{AuthError, SignUpForm, SESSION_NOT_SAVED};
use crate::services::auth::AuthClient;

/// Auth flows as the app runs them: the client call plus the local
/// validation and session bookkeeping around it.
pub struct AuthService {
    client: AuthClient,
    session: SessionContext,
}

impl AuthService {
    pub fn new(config: &AppConfig, session: SessionContext) -> Self {
        Self {
            client: AuthClient::new(config),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Logs in and stores the token and username for later requests.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let token = self.client.login(username, password).await?;

        self.session.start(&token, username).await.map_err(|e| {
            error!("Failed to persist session: {}", e);
            AuthError::Session(SESSION_NOT_SAVED.to_string())
        })
    }

    /// Validates the form locally, then registers. Invalid forms never
    /// reach the server.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Value, AuthError> {
        if let Err(e) = form.validate() {
            warn!("Sign-up rejected locally: {}", e);
            return Err(e);
        }

        self.client
            .register(&form.username, &form.password, &form.confirm_password)
            .await
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear().await.map_err(|e| {
            error!("Failed to clear session: {}", e);
            AuthError::Session(e.to_string())
        })
    }
}
