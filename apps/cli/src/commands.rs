use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "minha-consulta", version, about = "Agendamento de consultas médicas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        username: String,
        #[arg(long, env = "MINHA_CONSULTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// List the logged-in user's consultations
    List,
    /// List the specialties that can be booked
    Specialties,
    /// List the doctors of a specialty
    Doctors {
        specialty: String,
    },
    /// Show the range of dates that can be booked
    Window,
    /// Book a consultation
    Schedule {
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        doctor: String,
        /// Calendar day, YYYY-MM-DD
        #[arg(long, value_parser = parse_day)]
        date: NaiveDate,
    },
}

pub fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Data inválida: '{}'. Use o formato AAAA-MM-DD.", raw))
}
