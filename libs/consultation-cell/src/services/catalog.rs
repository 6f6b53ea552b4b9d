use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::ConsultationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyEntry {
    pub name: String,
    pub doctors: Vec<String>,
}

impl SpecialtyEntry {
    pub fn new(name: &str, doctors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            doctors: doctors.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Ordered specialty -> doctors lookup the schedule form offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCatalog {
    specialties: Vec<SpecialtyEntry>,
}

impl Default for DoctorCatalog {
    fn default() -> Self {
        Self {
            specialties: vec![
                SpecialtyEntry::new("Cardiologia", &["Dr. João Silva", "Dra. Maria Santos"]),
                SpecialtyEntry::new("Dermatologia", &["Dra. Ana Lima", "Dr. Pedro Costa"]),
                SpecialtyEntry::new("Ortopedia", &["Dr. Carlos Oliveira", "Dra. Paula Souza"]),
                SpecialtyEntry::new("Pediatria", &["Dra. Juliana Martins", "Dr. Roberto Alves"]),
                SpecialtyEntry::new("Clínico Geral", &["Dr. Fernando Pereira", "Dra. Camila Costa"]),
                SpecialtyEntry::new("Ginecologia", &["Dra. Beatriz Santos", "Dra. Luciana Lima"]),
                SpecialtyEntry::new("Oftalmologia", &["Dr. Marcos Silva", "Dra. Patricia Oliveira"]),
                SpecialtyEntry::new("Psiquiatria", &["Dr. Ricardo Souza", "Dra. Amanda Costa"]),
            ],
        }
    }
}

impl DoctorCatalog {
    pub fn new(specialties: Vec<SpecialtyEntry>) -> Result<Self, ConsultationError> {
        let mut seen = HashSet::new();

        for entry in &specialties {
            if entry.name.trim().is_empty() {
                return Err(ConsultationError::Validation("Especialidade sem nome no catálogo".to_string()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConsultationError::Validation(format!(
                    "Especialidade duplicada no catálogo: {}", entry.name
                )));
            }
            if entry.doctors.iter().any(|d| d.trim().is_empty()) {
                return Err(ConsultationError::Validation(format!(
                    "Médico sem nome em {}", entry.name
                )));
            }
        }

        Ok(Self { specialties })
    }

    /// Parses a JSON array of `{ "name": ..., "doctors": [...] }` entries.
    pub fn from_json(raw: &str) -> Result<Self, ConsultationError> {
        let entries: Vec<SpecialtyEntry> = serde_json::from_str(raw)
            .map_err(|e| ConsultationError::Validation(format!("Catálogo inválido: {}", e)))?;

        Self::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self, ConsultationError> {
        debug!("Loading doctor catalog from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConsultationError::Validation(format!("Não foi possível ler {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&raw)?;

        info!("Loaded {} specialties from {}", catalog.specialties.len(), path.display());
        Ok(catalog)
    }

    pub fn specialties(&self) -> impl Iterator<Item = &str> {
        self.specialties.iter().map(|entry| entry.name.as_str())
    }

    pub fn doctors_for(&self, specialty: &str) -> Option<&[String]> {
        self.specialties
            .iter()
            .find(|entry| entry.name == specialty)
            .map(|entry| entry.doctors.as_slice())
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.doctors_for(specialty).is_some()
    }

    pub fn offers(&self, specialty: &str, doctor: &str) -> bool {
        self.doctors_for(specialty)
            .map(|doctors| doctors.iter().any(|d| d == doctor))
            .unwrap_or(false)
    }
}
