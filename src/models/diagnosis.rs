//! Modelos de diagnóstico
//!
//! Informes guardados (técnico, videollamada, visita) y análisis de síntomas asistido.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisType {
    Technician,
    Video,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub kind: DiagnosisType,
    pub status: ReportStatus,
    pub summary: String,
    pub details: String,
}

/// Modalidad de diagnóstico reservable con su precio
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisOption {
    pub kind: DiagnosisType,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub price: Decimal,
}

/// Cita de diagnóstico reservada. Deja un informe `pending` en el vehículo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisBooking {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: DiagnosisType,
    pub price: Decimal,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub report_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptoms: Vec<String>,
    pub error_codes: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub confidence: u8,
    pub primary_issue: String,
    pub severity: Severity,
    pub description: String,
    pub possible_causes: Vec<String>,
    pub recommendations: Vec<String>,
    pub parts_required: Vec<String>,
    pub estimated_cost: CostRange,
    pub urgency: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticJobStatus {
    Analyzing,
    Completed,
    Cancelled,
    Failed,
}

/// Análisis en curso o terminado de un usuario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticJob {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub report: SymptomReport,
    pub status: DiagnosticJobStatus,
    pub result: Option<DiagnosticResult>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
