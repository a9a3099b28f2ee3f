//! Inspección de vehículos
//!
//! Reservas de inspección (a domicilio o en el centro) e informes que el
//! equipo de Repyr redacta y envía al cliente.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::completion::StoredAttachment;
use crate::models::diagnosis::Severity;
use crate::models::vehicle::VehicleInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionMode {
    /// El inspector va a la ubicación del cliente
    VisitMe,
    /// El cliente lleva el coche al centro
    VisitLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionType {
    #[default]
    Comprehensive,
    PrePurchase,
    Insurance,
    Warranty,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionOption {
    pub mode: InspectionMode,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub price: Decimal,
    pub duration: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionBooking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub mode: InspectionMode,
    pub inspection_type: InspectionType,
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub vehicle_details: Option<String>,
    pub special_requests: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionReportStatus {
    Draft,
    Completed,
    Sent,
}

impl InspectionReportStatus {
    /// Solo hacia delante: draft → completed → sent
    pub fn can_transition_to(&self, to: InspectionReportStatus) -> bool {
        matches!(
            (self, to),
            (InspectionReportStatus::Draft, InspectionReportStatus::Completed)
                | (InspectionReportStatus::Completed, InspectionReportStatus::Sent)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub issue: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Informe de inspección redactado por un admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    pub id: Uuid,
    /// Cliente registrado con ese teléfono, si lo hay
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle: VehicleInfo,
    pub technician_name: String,
    pub report_date: NaiveDate,
    pub report_type: InspectionType,
    pub status: InspectionReportStatus,
    pub findings: Vec<Finding>,
    pub photos: Vec<StoredAttachment>,
    pub estimated_cost: Option<Decimal>,
    pub report_file: Option<StoredAttachment>,
    pub created_at: DateTime<Utc>,
}

impl InspectionReport {
    /// Coincidencia sin distinguir mayúsculas en cliente, matrícula o técnico
    pub fn matches(&self, needle: &str) -> bool {
        self.customer_name.to_lowercase().contains(needle)
            || self.vehicle.plate.to_lowercase().contains(needle)
            || self.technician_name.to_lowercase().contains(needle)
    }
}

/// Filtro de estado del listado de informes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatusFilter {
    #[default]
    All,
    Draft,
    Completed,
    Sent,
}

impl ReportStatusFilter {
    pub fn matches(&self, status: InspectionReportStatus) -> bool {
        match self {
            ReportStatusFilter::All => true,
            ReportStatusFilter::Draft => status == InspectionReportStatus::Draft,
            ReportStatusFilter::Completed => status == InspectionReportStatus::Completed,
            ReportStatusFilter::Sent => status == InspectionReportStatus::Sent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_only_moves_forward() {
        use InspectionReportStatus::*;
        assert!(Draft.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Sent));
        assert!(!Draft.can_transition_to(Sent));
        assert!(!Sent.can_transition_to(Draft));
        assert!(!Completed.can_transition_to(Completed));
    }
}
