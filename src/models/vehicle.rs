//! Modelo de Vehicle
//!
//! Vehículos de un cliente. Exactamente uno por propietario lleva `is_primary`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vehicle principal del cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Datos del vehículo copiados en una solicitud de servicio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
}

impl Vehicle {
    pub fn info(&self) -> VehicleInfo {
        VehicleInfo {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            plate: self.plate.clone(),
        }
    }
}

impl VehicleInfo {
    /// `Toyota Camry 2020 (A-12345)`
    pub fn display_name(&self) -> String {
        format!("{} {} {} ({})", self.make, self.model, self.year, self.plate)
    }
}
