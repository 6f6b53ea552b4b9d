use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::models::ConsultationError;
use crate::services::catalog::DoctorCatalog;
use crate::services::scheduling::DateWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectedDate {
    instant: DateTime<Utc>,
    day: NaiveDate,
}

/// A complete, validated selection ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub specialty: String,
    pub doctor: String,
    pub date: DateTime<Utc>,
    /// Calendar day the user picked, used for display.
    pub day: NaiveDate,
}

/// State of the schedule form, independent of how it is rendered.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    catalog: Arc<DoctorCatalog>,
    window: DateWindow,
    specialty: Option<String>,
    doctor: Option<String>,
    date: Option<SelectedDate>,
}

impl ScheduleForm {
    pub fn new(catalog: Arc<DoctorCatalog>, window: DateWindow) -> Self {
        Self {
            catalog,
            window,
            specialty: None,
            doctor: None,
            date: None,
        }
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    pub fn doctor(&self) -> Option<&str> {
        self.doctor.as_deref()
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date.map(|selected| selected.instant)
    }

    /// Doctors selectable for the current specialty; empty until one is chosen.
    pub fn available_doctors(&self) -> &[String] {
        self.specialty
            .as_deref()
            .and_then(|specialty| self.catalog.doctors_for(specialty))
            .unwrap_or(&[])
    }

    /// Choosing a specialty always clears the doctor, since the doctor list
    /// depends on it.
    pub fn select_specialty(&mut self, specialty: &str) -> Result<(), ConsultationError> {
        if !self.catalog.has_specialty(specialty) {
            warn!("Unknown specialty selected: {}", specialty);
            return Err(ConsultationError::Validation(format!("Especialidade desconhecida: {}", specialty)));
        }

        debug!("Specialty set to {}", specialty);
        self.specialty = Some(specialty.to_string());
        self.doctor = None;
        Ok(())
    }

    pub fn select_doctor(&mut self, doctor: &str) -> Result<(), ConsultationError> {
        let specialty = self.specialty.as_deref().ok_or_else(|| {
            ConsultationError::Validation("Selecione a especialidade antes do médico".to_string())
        })?;

        if !self.catalog.offers(specialty, doctor) {
            warn!("Doctor {} is not listed under {}", doctor, specialty);
            return Err(ConsultationError::Validation(format!("{} não atende {}", doctor, specialty)));
        }

        self.doctor = Some(doctor.to_string());
        Ok(())
    }

    /// Accepts `candidate` only inside the window; otherwise the current
    /// selection is kept and `InvalidDate` is returned.
    pub fn select_date(&mut self, candidate: DateTime<Utc>) -> Result<(), ConsultationError> {
        let instant = self.window.validate(candidate)?;

        self.date = Some(SelectedDate {
            instant,
            day: self.window.day_of(&instant),
        });
        Ok(())
    }

    pub fn select_calendar_day(&mut self, day: NaiveDate) -> Result<(), ConsultationError> {
        let instant = self.window.validate(self.window.calendar_day(day))?;

        self.date = Some(SelectedDate { instant, day });
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.specialty.is_some() && self.doctor.is_some() && self.date.is_some()
    }

    pub fn to_request(&self) -> Result<ScheduleRequest, ConsultationError> {
        match (&self.specialty, &self.doctor, self.date) {
            (Some(specialty), Some(doctor), Some(selected)) => Ok(ScheduleRequest {
                specialty: specialty.clone(),
                doctor: doctor.clone(),
                date: selected.instant,
                day: selected.day,
            }),
            _ => Err(ConsultationError::incomplete_form()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduling::SchedulingConfig;
    use assert_matches::assert_matches;
    use chrono::{Duration, FixedOffset, TimeZone};

    fn form() -> ScheduleForm {
        let now = FixedOffset::west_opt(3 * 3600).unwrap()
            .with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let window = DateWindow::anchored_at(&now, &SchedulingConfig::default());
        ScheduleForm::new(Arc::new(DoctorCatalog::default()), window)
    }

    #[test]
    fn test_specialty_change_clears_doctor() {
        let mut form = form();
        form.select_specialty("Cardiologia").unwrap();
        form.select_doctor("Dr. João Silva").unwrap();
        assert_eq!(form.doctor(), Some("Dr. João Silva"));

        form.select_specialty("Dermatologia").unwrap();
        assert_eq!(form.specialty(), Some("Dermatologia"));
        assert_eq!(form.doctor(), None);
        assert_eq!(form.available_doctors(), &["Dra. Ana Lima".to_string(), "Dr. Pedro Costa".to_string()]);
    }

    #[test]
    fn test_doctor_must_match_specialty() {
        let mut form = form();
        assert_matches!(form.select_doctor("Dr. João Silva"), Err(ConsultationError::Validation(_)));

        form.select_specialty("Ortopedia").unwrap();
        assert_matches!(form.select_doctor("Dr. João Silva"), Err(ConsultationError::Validation(_)));
        assert_eq!(form.doctor(), None);
    }

    #[test]
    fn test_unknown_specialty_keeps_state() {
        let mut form = form();
        form.select_specialty("Pediatria").unwrap();
        form.select_doctor("Dr. Roberto Alves").unwrap();

        assert_matches!(form.select_specialty("Neurologia"), Err(ConsultationError::Validation(_)));
        assert_eq!(form.specialty(), Some("Pediatria"));
        assert_eq!(form.doctor(), Some("Dr. Roberto Alves"));
    }

    #[test]
    fn test_rejected_date_keeps_previous() {
        let mut form = form();
        let inside = form.window().min_date() + Duration::days(3);
        form.select_date(inside).unwrap();

        let outside = form.window().max_date() + Duration::seconds(1);
        assert_matches!(form.select_date(outside), Err(ConsultationError::InvalidDate(_)));
        assert_eq!(form.date(), Some(inside));
    }

    #[test]
    fn test_date_day_follows_window_offset() {
        let mut form = form();
        form.select_specialty("Cardiologia").unwrap();
        form.select_doctor("Dr. João Silva").unwrap();

        // 2025-03-05 01:30 UTC is 2025-03-04 22:30 at -03:00
        form.select_date(Utc.with_ymd_and_hms(2025, 3, 5, 1, 30, 0).unwrap()).unwrap();
        assert_eq!(form.to_request().unwrap().day, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    }

    #[test]
    fn test_missing_doctor_is_incomplete() {
        let mut form = form();
        form.select_specialty("Cardiologia").unwrap();
        let today = form.window().min_day();
        form.select_calendar_day(today).unwrap();

        assert!(!form.is_complete());
        assert_eq!(form.to_request(), Err(ConsultationError::incomplete_form()));

        form.select_doctor("Dr. João Silva").unwrap();
        form.select_specialty("Dermatologia").unwrap();
        assert_eq!(form.to_request(), Err(ConsultationError::incomplete_form()));
    }

    #[test]
    fn test_calendar_day_selection() {
        let mut form = form();
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        form.select_calendar_day(day).unwrap();

        assert_eq!(form.date(), Some(Utc.with_ymd_and_hms(2025, 3, 20, 3, 0, 0).unwrap()));

        let too_far = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_matches!(form.select_calendar_day(too_far), Err(ConsultationError::InvalidDate(_)));
    }

    #[test]
    fn test_incomplete_form() {
        let mut form = form();
        assert_eq!(form.to_request(), Err(ConsultationError::incomplete_form()));

        form.select_specialty("Cardiologia").unwrap();
        form.select_doctor("Dra. Maria Santos").unwrap();
        assert!(!form.is_complete());
        assert_eq!(form.to_request(), Err(ConsultationError::incomplete_form()));

        let day = form.window().min_day();
        form.select_calendar_day(day).unwrap();
        let request = form.to_request().unwrap();
        assert_eq!(request.doctor, "Dra. Maria Santos");
        assert_eq!(request.day, day);
    }
}
