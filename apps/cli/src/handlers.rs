use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use auth_cell::{AuthService, SignUpForm};
use consultation_cell::{
    BookingService, Consultation, ConsultationClient, DateWindow, DoctorCatalog, ScheduleForm,
    SchedulingConfig,
};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_session::SessionContext;

use crate::commands::Command;

pub async fn run(command: Command, config: &AppConfig, session: SessionContext) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let auth = AuthService::new(config, session);
            auth.sign_in(&username, &password).await.map_err(AppError::from)?;
            println!("Bem-vindo(a), {}!", username);
        }
        Command::Register { username, password, confirm_password } => {
            let auth = AuthService::new(config, session);
            let form = SignUpForm::new(username, password, confirm_password);
            auth.sign_up(&form).await.map_err(AppError::from)?;
            println!("Usuário registrado com sucesso!");
        }
        Command::Logout => {
            AuthService::new(config, session).sign_out().await.map_err(AppError::from)?;
            println!("Sessão encerrada.");
        }
        Command::List => {
            let client = ConsultationClient::new(config, session);
            let consultations = client.get_consultations().await.map_err(AppError::from)?;
            print_consultations(&consultations);
        }
        Command::Specialties => {
            for specialty in load_catalog(config)?.specialties() {
                println!("{}", specialty);
            }
        }
        Command::Doctors { specialty } => {
            let catalog = load_catalog(config)?;
            let doctors = catalog.doctors_for(&specialty).ok_or_else(|| {
                AppError::Validation(format!("Especialidade desconhecida: {}", specialty))
            })?;
            for doctor in doctors {
                println!("{}", doctor);
            }
        }
        Command::Window => {
            println!("{}", current_window(config).hint());
        }
        Command::Schedule { specialty, doctor, date } => {
            let mut form = ScheduleForm::new(Arc::new(load_catalog(config)?), current_window(config));
            form.select_specialty(&specialty).map_err(AppError::from)?;
            form.select_doctor(&doctor).map_err(AppError::from)?;
            form.select_calendar_day(date).map_err(AppError::from)?;

            let booking = BookingService::new(config, session);
            let confirmation = booking.submit(&form).await.map_err(AppError::from)?;

            info!("Consultation {} confirmed", confirmation.consultation.id);
            println!("Consulta agendada com sucesso!");
            println!("Data: {}", confirmation.summary.date);
            println!("Médico: {}", confirmation.summary.doctor);
            println!("Especialidade: {}", confirmation.summary.specialty);
        }
    }

    Ok(())
}

fn load_catalog(config: &AppConfig) -> Result<DoctorCatalog> {
    match &config.catalog_file {
        Some(path) => DoctorCatalog::load(path)
            .map_err(AppError::from)
            .with_context(|| format!("catálogo em {}", path.display())),
        None => Ok(DoctorCatalog::default()),
    }
}

fn current_window(config: &AppConfig) -> DateWindow {
    DateWindow::current(&SchedulingConfig::from_app_config(config))
}

fn print_consultations(consultations: &[Consultation]) {
    if consultations.is_empty() {
        println!("Nenhuma consulta encontrada.");
        return;
    }

    for consultation in consultations {
        if let Some(username) = &consultation.username {
            println!("Paciente: {}", username);
        }
        let summary = consultation.summary();
        println!("Data: {}", summary.date);
        println!("Médico: {}", summary.doctor);
        println!("Especialidade: {}", summary.specialty);
        println!("Status: {}", consultation.status);
        println!();
    }
}
