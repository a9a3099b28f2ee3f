//! Historial de trabajos completados y mantenimiento predictivo

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedJob {
    pub id: Uuid,
    pub service_request_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub service_name: String,
    pub garage_name: String,
    pub completed_date: NaiveDate,
    pub cost: Decimal,
    /// Sin valorar todavía en trabajos recién cerrados
    pub rating: Option<u8>,
    pub description: String,
    pub warranty_period: Option<String>,
}

/// Ventana temporal del historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobPeriod {
    #[default]
    All,
    ThisMonth,
    Last3Months,
    ThisYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSort {
    #[default]
    Date,
    Cost,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub due_mileage: u32,
    pub priority: Priority,
    pub estimated_cost: Decimal,
    pub ai_confidence: u8,
}
