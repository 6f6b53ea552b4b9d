pub mod booking;
pub mod catalog;
pub mod client;
pub mod form;
pub mod scheduling;

pub use booking::BookingService;
pub use catalog::{DoctorCatalog, SpecialtyEntry};
pub use client::ConsultationClient;
pub use form::{ScheduleForm, ScheduleRequest};
pub use scheduling::{DateWindow, SchedulingConfig};
