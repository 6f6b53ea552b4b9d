// libs/consultation-cell/src/lib.rs
//! # Consultation Cell
//!
//! Listing and booking medical consultations against the consultations API.
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------+
//! |                 Consultation Cell                    |
//! +------------------------------------------------------+
//! |  models.rs       |  Records, payloads, errors        |
//! |  services/       |                                   |
//! |    client.rs     |  REST client (bearer from session)|
//! |    catalog.rs    |  Specialty -> doctors lookup      |
//! |    scheduling.rs |  Allowed booking date window      |
//! |    form.rs       |  Schedule form state              |
//! |    booking.rs    |  Submission workflow              |
//! +------------------------------------------------------+
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use consultation_cell::{BookingService, DateWindow, DoctorCatalog, ScheduleForm, SchedulingConfig};
//! use shared_config::AppConfig;
//! use shared_session::{MemorySessionStore, SessionContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env();
//! let session = SessionContext::new(Arc::new(MemorySessionStore::new()));
//!
//! let window = DateWindow::current(&SchedulingConfig::from_app_config(&config));
//! let mut form = ScheduleForm::new(Arc::new(DoctorCatalog::default()), window);
//! form.select_specialty("Cardiologia")?;
//! form.select_doctor("Dr. João Silva")?;
//! form.select_calendar_day(window.min_day())?;
//!
//! let booking = BookingService::new(&config, session);
//! let confirmation = booking.submit(&form).await?;
//! println!("{} - {}", confirmation.summary.date, confirmation.summary.doctor);
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::{
    Consultation, ConsultationError, ConsultationStatus, ConsultationSummary,
    NewConsultation, BookingConfirmation,
};

pub use services::{
    BookingService, ConsultationClient, DateWindow, DoctorCatalog, ScheduleForm,
    SchedulingConfig,
};
