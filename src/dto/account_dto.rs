use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::diagnosis::{DiagnosisType, SymptomReport};
use crate::models::fleet::{Fleet, MaintenanceAlert};
use crate::models::job::{JobPeriod, JobSort};
use crate::utils::validation::{validate_date, validate_money, validate_not_blank, validate_time};

#[derive(Debug, Deserialize, Validate)]
pub struct RedeemRewardRequest {
    #[validate(custom = "validate_not_blank")]
    pub reward_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FileClaimRequest {
    #[validate(custom = "validate_not_blank")]
    pub description: String,
    #[validate(custom = "validate_money")]
    pub amount: Decimal,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub period: JobPeriod,
    #[serde(default)]
    pub sort: JobSort,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilterQuery {
    pub vehicle_id: Option<Uuid>,
}

// Request de análisis de síntomas
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, message = "Select at least one symptom"))]
    pub symptoms: Vec<String>,
    pub error_codes: Option<String>,
    pub details: Option<String>,
}

impl From<AnalyzeRequest> for SymptomReport {
    fn from(request: AnalyzeRequest) -> Self {
        Self {
            symptoms: request.symptoms,
            error_codes: request.error_codes,
            details: request.details,
        }
    }
}

// Reserva de diagnóstico (técnico, videollamada o visita)
#[derive(Debug, Deserialize, Validate)]
pub struct BookDiagnosisRequest {
    pub kind: DiagnosisType,
    pub vehicle_id: Uuid,
    #[validate(custom = "validate_date")]
    pub date: String,
    #[validate(custom = "validate_time")]
    pub time: String,
    pub notes: Option<String>,
}

// Resumen de flota de empresa
#[derive(Debug, Serialize)]
pub struct FleetOverview {
    pub fleet: Fleet,
    pub vehicle_count: usize,
    pub driver_count: usize,
    pub unassigned_vehicles: usize,
    pub high_priority_alerts: Vec<MaintenanceAlert>,
}
