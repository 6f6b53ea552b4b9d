use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use serde_json::json;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_session::{MemorySessionStore, SessionContext};

static NEXT_USER_ID: AtomicI64 = AtomicI64::new(1);

pub struct TestConfig {
    pub api_url: String,
    pub window_days: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            window_days: 60,
        }
    }
}

impl TestConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        let mut config = AppConfig::with_api_url(self.api_url.clone());
        config.window_days = self.window_days;
        config
    }
}

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub token: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("paciente")
    }
}

impl TestUser {
    pub fn new(username: &str) -> Self {
        let id = NEXT_USER_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            username: username.to_string(),
            password: format!("{}-senha", username),
            token: format!("token-{}-{}", username, id),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

pub struct TestSession;

impl TestSession {
    pub fn empty() -> SessionContext {
        SessionContext::new(Arc::new(MemorySessionStore::new()))
    }

    pub async fn logged_in(user: &TestUser) -> SessionContext {
        let session = Self::empty();
        session
            .start(&user.token, &user.username)
            .await
            .expect("memory session store never fails");
        session
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn login_response(token: &str) -> serde_json::Value {
        json!({ "token": token })
    }

    pub fn register_response(username: &str) -> serde_json::Value {
        json!({
            "message": "Usuário registrado com sucesso",
            "user": { "username": username }
        })
    }

    pub fn user_response(user: &TestUser) -> serde_json::Value {
        json!({
            "id": user.id,
            "username": user.username
        })
    }

    pub fn consultation_response(id: i64, user: &TestUser, date: &str, doctor: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "userId": user.id,
            "date": date,
            "doctor": doctor,
            "specialty": specialty,
            "status": "Agendada",
            "username": user.username
        })
    }

    pub fn consultations_response(consultations: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "consultations": consultations })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({ "message": message })
    }
}
