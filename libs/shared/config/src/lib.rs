use std::env;
use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_WINDOW_DAYS: i64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub window_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_url: env::var("MINHA_CONSULTA_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("MINHA_CONSULTA_API_URL not set, using default");
                    DEFAULT_API_URL.to_string()
                }),
            session_file: env::var("MINHA_CONSULTA_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
            catalog_file: env::var("MINHA_CONSULTA_CATALOG_FILE")
                .ok()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            window_days: match env::var("MINHA_CONSULTA_WINDOW_DAYS") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("MINHA_CONSULTA_WINDOW_DAYS is not a number ({}), using default", raw);
                    DEFAULT_WINDOW_DAYS
                }),
                Err(_) => DEFAULT_WINDOW_DAYS,
            },
        };

        if !config.is_configured() {
            warn!("Client not fully configured - check MINHA_CONSULTA_* variables");
        }

        config
    }

    /// Config pointing at an explicit API base URL, everything else defaulted.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            session_file: default_session_file(),
            catalog_file: None,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && self.window_days > 0
    }
}

fn default_session_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".minha-consulta")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_api_url_defaults() {
        let config = AppConfig::with_api_url("http://example.test/api");

        assert_eq!(config.api_url, "http://example.test/api");
        assert_eq!(config.window_days, 60);
        assert!(config.catalog_file.is_none());
        assert!(config.session_file.ends_with("session.json"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_not_configured_without_window() {
        let mut config = AppConfig::with_api_url(DEFAULT_API_URL);
        config.window_days = 0;
        assert!(!config.is_configured());
    }
}
