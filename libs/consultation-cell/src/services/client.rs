// libs/consultation-cell/src/services/client.rs
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_http::{ApiClient, ApiError};
use shared_models::auth::{GetUserRequest, User};
use shared_session::SessionContext;

use crate::models::{
    Consultation, ConsultationError, ConsultationsResponse, NewConsultation,
    CREATE_FAILED, LIST_FAILED, USER_LOOKUP_FAILED,
};

/// Client for the protected consultation routes. The session token, when
/// present, is attached as a bearer credential to every request; without
/// one the request still goes out and the server decides.
pub struct ConsultationClient {
    api: ApiClient,
    session: SessionContext,
}

impl ConsultationClient {
    pub fn new(config: &AppConfig, session: SessionContext) -> Self {
        Self {
            api: ApiClient::new(config),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Resolves a username to its user record (needed for the numeric id).
    pub async fn get_user_data(&self, username: &str) -> Result<User, ConsultationError> {
        debug!("Fetching user data for {}", username);

        let token = self.session.token().await;
        let request = GetUserRequest { username: username.to_string() };

        let user: User = self.api
            .post("/auth/get-user", token.as_deref(), &request)
            .await
            .map_err(|e| match e.status() {
                Some(404) => ConsultationError::NotFound(e.message_or(USER_LOOKUP_FAILED)),
                _ => map_api_error(e, USER_LOOKUP_FAILED),
            })?;

        Ok(user)
    }

    pub async fn create_consultation(&self, consultation: &NewConsultation) -> Result<Consultation, ConsultationError> {
        debug!("Creating consultation with {} ({}) for user {}",
               consultation.doctor(), consultation.specialty(), consultation.user_id());

        let token = self.session.token().await;

        let created: Consultation = self.api
            .post("/consultations", token.as_deref(), consultation)
            .await
            .map_err(|e| map_api_error(e, CREATE_FAILED))?;

        info!("Consultation {} created", created.id);
        Ok(created)
    }

    /// Consultations of the logged-in user, in server order. Fails locally
    /// when no username is stored.
    pub async fn get_consultations(&self) -> Result<Vec<Consultation>, ConsultationError> {
        let username = match self.session.username().await {
            Some(username) => username,
            None => {
                warn!("Listing consultations without a stored username");
                return Err(ConsultationError::unauthenticated());
            }
        };

        self.get_consultations_for(&username).await
    }

    pub async fn get_consultations_for(&self, username: &str) -> Result<Vec<Consultation>, ConsultationError> {
        debug!("Fetching consultations for {}", username);

        let token = self.session.token().await;

        let response: ConsultationsResponse = self.api
            .get("/consultations", token.as_deref(), &[("username", username)])
            .await
            .map_err(|e| map_api_error(e, LIST_FAILED))?;

        info!("Fetched {} consultations for {}", response.consultations.len(), username);
        Ok(response.consultations)
    }
}

fn map_api_error(err: ApiError, fallback: &str) -> ConsultationError {
    match &err {
        ApiError::Http { .. } => ConsultationError::Request(err.message_or(fallback)),
        other => {
            warn!("Consultation request failed before a usable response: {}", other);
            ConsultationError::Unexpected(fallback.to_string())
        }
    }
}
