//! Modelo de Warranty
//!
//! El estado (`active`/`expiring`/`expired`) no se guarda: se deriva al leer,
//! ver `services::warranty_service::warranty_status`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::completion::StoredAttachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyType {
    Manufacturer,
    Extended,
    Service,
}

/// Cobertura declarada por el taller al cerrar un trabajo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarrantyCoverage {
    PartsLabor,
    PartsOnly,
    LaborOnly,
    Manufacturer,
}

impl WarrantyCoverage {
    pub fn label(&self) -> &'static str {
        match self {
            WarrantyCoverage::PartsLabor => "Parts & Labor",
            WarrantyCoverage::PartsOnly => "Parts Only",
            WarrantyCoverage::LaborOnly => "Labor Only",
            WarrantyCoverage::Manufacturer => "Manufacturer Warranty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyStatus {
    Active,
    Expiring,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarrantyClaim {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub status: ClaimStatus,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warranty {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub service_request_id: Option<Uuid>,
    pub warranty_type: WarrantyType,
    pub coverage: Option<WarrantyCoverage>,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub coverage_details: String,
    pub document: Option<StoredAttachment>,
    pub claim_history: Vec<WarrantyClaim>,
}
