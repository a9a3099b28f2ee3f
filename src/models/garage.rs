//! Modelo de Garage

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub open: String,
    pub close: String,
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Taller registrado en la plataforma
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garage {
    pub id: Uuid,
    pub name: String,
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub rating: f64,
    pub services: Vec<String>,
    pub specializations: Vec<String>,
    pub daily_capacity: u32,
    pub working_hours: WorkingHours,
    pub location: Option<GeoPoint>,
    /// Pendiente de aprobación por un admin mientras sea `false`
    pub verified: bool,
    pub owner_id: Uuid,
}

/// Filtro de verificación usado en la gestión de talleres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationFilter {
    #[default]
    All,
    Verified,
    Pending,
}

impl VerificationFilter {
    pub fn matches(&self, garage: &Garage) -> bool {
        match self {
            VerificationFilter::All => true,
            VerificationFilter::Verified => garage.verified,
            VerificationFilter::Pending => !garage.verified,
        }
    }
}
