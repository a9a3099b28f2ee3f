//! Modelo de flotas de empresa

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::Priority;
use crate::models::vehicle::VehicleInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetVehicle {
    pub id: Uuid,
    #[serde(flatten)]
    pub info: VehicleInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetDriver {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub assigned_vehicles: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    pub vehicle_id: Uuid,
    pub kind: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub id: Uuid,
    pub company_name: String,
    pub admin_id: Uuid,
    pub vehicles: Vec<FleetVehicle>,
    pub drivers: Vec<FleetDriver>,
    pub alerts: Vec<MaintenanceAlert>,
}

impl Fleet {
    pub fn vehicle(&self, id: Uuid) -> Option<&FleetVehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Conductor asignado a un vehículo, si lo hay
    pub fn driver_for(&self, vehicle_id: Uuid) -> Option<&FleetDriver> {
        self.drivers
            .iter()
            .find(|d| d.assigned_vehicles.contains(&vehicle_id))
    }
}
