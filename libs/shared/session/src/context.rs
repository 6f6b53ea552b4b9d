use std::sync::Arc;

use tracing::{info, warn};

use crate::store::{SessionError, SessionStore};
use crate::{TOKEN_KEY, USERNAME_KEY};

/// Handle on the current session, shared by the clients that need it.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await
    }

    pub async fn username(&self) -> Option<String> {
        self.read(USERNAME_KEY).await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some() && self.username().await.is_some()
    }

    /// Records a freshly issued token for `username`.
    pub async fn start(&self, token: &str, username: &str) -> Result<(), SessionError> {
        self.store.set_item(TOKEN_KEY, token).await?;
        self.store.set_item(USERNAME_KEY, username).await?;

        info!("Session started for {}", username);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), SessionError> {
        self.store.remove_items(&[TOKEN_KEY, USERNAME_KEY]).await?;

        info!("Session cleared");
        Ok(())
    }

    // Unreadable storage is treated as an absent value.
    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get_item(key).await {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read {} from session storage: {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
