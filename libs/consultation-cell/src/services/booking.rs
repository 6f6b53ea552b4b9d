use tracing::{error, info, warn};

use shared_config::AppConfig;
use shared_session::SessionContext;

use crate::models::{
    BookingConfirmation, Consultation, ConsultationError, ConsultationSummary, NewConsultation,
    SCHEDULING_FAILED,
};
use crate::services::client::ConsultationClient;
use crate::services::form::ScheduleForm;

/// Runs a schedule form submission end to end.
pub struct BookingService {
    client: ConsultationClient,
}

impl BookingService {
    pub fn new(config: &AppConfig, session: SessionContext) -> Self {
        Self::with_client(ConsultationClient::new(config, session))
    }

    pub fn with_client(client: ConsultationClient) -> Self {
        Self { client }
    }

    /// Local checks first (complete form, stored username), then user
    /// lookup and creation. Nothing is sent if a local check fails.
    pub async fn submit(&self, form: &ScheduleForm) -> Result<BookingConfirmation, ConsultationError> {
        let request = form.to_request().map_err(|e| {
            warn!("Submission refused: form incomplete");
            e
        })?;

        let username = self.client.session().username().await.ok_or_else(|| {
            warn!("Submission refused: no user in session");
            ConsultationError::unauthenticated()
        })?;

        let result: Result<Consultation, ConsultationError> = async {
            let user = self.client.get_user_data(&username).await?;
            let payload = NewConsultation::new(user.id, request.date, &request.doctor, &request.specialty)?;
            self.client.create_consultation(&payload).await
        }
        .await;

        match result {
            Ok(consultation) => {
                info!("Booked consultation {} for {}", consultation.id, username);
                Ok(BookingConfirmation {
                    consultation,
                    summary: ConsultationSummary::new(request.day, &request.doctor, &request.specialty),
                })
            }
            Err(e) => {
                error!("Booking failed for {}: {}", username, e);
                Err(most_specific(e))
            }
        }
    }
}

fn most_specific(err: ConsultationError) -> ConsultationError {
    if err.to_string().trim().is_empty() {
        ConsultationError::Unexpected(SCHEDULING_FAILED.to_string())
    } else {
        err
    }
}
