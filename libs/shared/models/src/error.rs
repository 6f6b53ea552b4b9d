use thiserror::Error;

/// Client-side error taxonomy. `Display` is the message shown to the user,
/// with no prefix, so a server-supplied message surfaces verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Local validation failed; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// No local session; nothing was sent.
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    NotFound(String),

    /// Non-2xx response from the API.
    #[error("{0}")]
    Request(String),

    /// Transport or decoding failure.
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthenticated(msg)
            | AppError::NotFound(msg)
            | AppError::Request(msg)
            | AppError::Unexpected(msg) => msg,
        }
    }

    /// True for errors raised before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Unauthenticated(_))
    }

    pub fn requires_login(&self) -> bool {
        matches!(self, AppError::Unauthenticated(_))
    }

    pub fn log(&self) {
        if self.is_local() {
            tracing::warn!("Rejected locally: {}", self);
        } else {
            tracing::error!("Error: {}", self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let err = AppError::Request("invalid credentials".to_string());
        assert_eq!(err.to_string(), "invalid credentials");
        assert_eq!(err.message(), "invalid credentials");
    }

    #[test]
    fn test_local_classification() {
        assert!(AppError::Validation("x".into()).is_local());
        assert!(AppError::Unauthenticated("x".into()).requires_login());
        assert!(!AppError::Request("x".into()).is_local());
        assert!(!AppError::Unexpected("x".into()).requires_login());
    }
}
