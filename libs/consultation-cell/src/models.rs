// libs/consultation-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use shared_models::error::AppError;
use shared_utils::dates::{format_short_pt_br, to_iso_millis};

pub const SCHEDULED_STATUS: &str = "Agendada";

pub const USER_NOT_AUTHENTICATED: &str = "Usuário não autenticado";
pub const USER_LOOKUP_FAILED: &str = "Erro ao buscar dados do usuário";
pub const CREATE_FAILED: &str = "Erro ao criar consulta";
pub const LIST_FAILED: &str = "Erro ao buscar consultas";
pub const FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos";
pub const SCHEDULING_FAILED: &str = "Ocorreu um erro ao agendar a consulta. Tente novamente.";

// ==============================================================================
// CORE CONSULTATION MODELS
// ==============================================================================

/// Consultation record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,
    pub doctor: String,
    pub specialty: String,
    pub status: ConsultationStatus,
    #[serde(default)]
    pub username: Option<String>,
}

impl Consultation {
    /// Calendar day of the appointment in the device's local time zone.
    pub fn local_day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    pub fn summary(&self) -> ConsultationSummary {
        ConsultationSummary::new(self.local_day(), &self.doctor, &self.specialty)
    }
}

/// Status as the server reports it. Only "Agendada" is set by this client;
/// every other value is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsultationStatus {
    Scheduled,
    Other(String),
}

impl From<String> for ConsultationStatus {
    fn from(raw: String) -> Self {
        if raw == SCHEDULED_STATUS {
            ConsultationStatus::Scheduled
        } else {
            ConsultationStatus::Other(raw)
        }
    }
}

impl From<ConsultationStatus> for String {
    fn from(status: ConsultationStatus) -> Self {
        match status {
            ConsultationStatus::Scheduled => SCHEDULED_STATUS.to_string(),
            ConsultationStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationStatus::Scheduled => write!(f, "{}", SCHEDULED_STATUS),
            ConsultationStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Payload for `POST /consultations`. Fields are private so a value can only
/// exist once `new` has validated it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsultation {
    user_id: i64,
    #[serde(serialize_with = "serialize_iso_millis")]
    date: DateTime<Utc>,
    doctor: String,
    specialty: String,
    status: ConsultationStatus,
}

impl NewConsultation {
    pub fn new(
        user_id: i64,
        date: DateTime<Utc>,
        doctor: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Result<Self, ConsultationError> {
        let doctor = doctor.into();
        let specialty = specialty.into();

        if user_id <= 0 {
            return Err(ConsultationError::Validation(format!("Identificador de usuário inválido: {}", user_id)));
        }
        if doctor.trim().is_empty() || specialty.trim().is_empty() {
            return Err(ConsultationError::IncompleteForm(FILL_ALL_FIELDS.to_string()));
        }

        Ok(Self {
            user_id,
            date,
            doctor,
            specialty,
            status: ConsultationStatus::Scheduled,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn doctor(&self) -> &str {
        &self.doctor
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn status(&self) -> &ConsultationStatus {
        &self.status
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationsResponse {
    #[serde(default)]
    pub consultations: Vec<Consultation>,
}

/// Human-readable confirmation of a booked consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSummary {
    pub date: String,
    pub doctor: String,
    pub specialty: String,
}

impl ConsultationSummary {
    pub fn new(day: NaiveDate, doctor: &str, specialty: &str) -> Self {
        Self {
            date: format_short_pt_br(day),
            doctor: doctor.to_string(),
            specialty: specialty.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub consultation: Consultation,
    pub summary: ConsultationSummary,
}

fn serialize_iso_millis<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso_millis(date))
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Every variant displays as the bare user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsultationError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Request(String),

    #[error("{0}")]
    InvalidDate(String),

    #[error("{0}")]
    IncompleteForm(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ConsultationError {
    pub fn unauthenticated() -> Self {
        ConsultationError::Unauthenticated(USER_NOT_AUTHENTICATED.to_string())
    }

    pub fn incomplete_form() -> Self {
        ConsultationError::IncompleteForm(FILL_ALL_FIELDS.to_string())
    }

    /// The caller should send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, ConsultationError::Unauthenticated(_))
    }
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::Unauthenticated(msg) => AppError::Unauthenticated(msg),
            ConsultationError::NotFound(msg) => AppError::NotFound(msg),
            ConsultationError::Request(msg) => AppError::Request(msg),
            ConsultationError::InvalidDate(msg)
            | ConsultationError::IncompleteForm(msg)
            | ConsultationError::Validation(msg) => AppError::Validation(msg),
            ConsultationError::Unexpected(msg) => AppError::Unexpected(msg),
        }
    }
}
