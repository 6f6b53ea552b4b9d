use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

pub const LOGIN_FAILED: &str = "Erro ao realizar login";
pub const REGISTRATION_FAILED: &str = "Erro ao registrar usuário";
pub const MISSING_FIELDS: &str = "Todos os campos são obrigatórios.";
pub const PASSWORD_MISMATCH: &str = "As senhas não coincidem.";
pub const SESSION_NOT_SAVED: &str = "Não foi possível salvar a sessão";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Login(String),

    #[error("{0}")]
    Registration(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Session(String),

    #[error("{0}")]
    Unexpected(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Login(msg) | AuthError::Registration(msg) => AppError::Request(msg),
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::Session(msg) | AuthError::Unexpected(msg) => AppError::Unexpected(msg),
        }
    }
}

/// Fields of the sign-up form, checked locally before registering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>,
               confirm_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(AuthError::Validation(MISSING_FIELDS.to_string()));
        }

        if self.password != self.confirm_password {
            return Err(AuthError::Validation(PASSWORD_MISMATCH.to_string()));
        }

        Ok(())
    }
}
