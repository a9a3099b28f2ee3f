use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::service_request_dto::AttachmentInput;
use crate::models::diagnosis::Severity;
use crate::models::inspection::{
    InspectionMode, InspectionOption, InspectionReportStatus, InspectionType, ReportStatusFilter,
};
use crate::models::vehicle::VehicleInfo;
use crate::utils::validation::{
    validate_date, validate_money, validate_not_blank, validate_phone, validate_plate,
};

#[derive(Debug, Serialize)]
pub struct InspectionOptionsResponse {
    pub options: Vec<InspectionOption>,
    pub time_slots: Vec<&'static str>,
}

// Reserva de inspección
#[derive(Debug, Deserialize, Validate)]
pub struct BookInspectionRequest {
    pub mode: InspectionMode,
    #[serde(default)]
    pub inspection_type: InspectionType,
    #[validate(custom = "validate_date")]
    pub date: String,
    pub time: String,
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    /// Obligatoria para `visit-me`
    pub address: Option<String>,
    pub vehicle_details: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportSearchQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub status: ReportStatusFilter,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportVehicleInput {
    #[validate(custom = "validate_not_blank")]
    pub make: String,
    #[validate(custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,
    #[validate(custom = "validate_plate")]
    pub plate: String,
}

impl From<ReportVehicleInput> for VehicleInfo {
    fn from(input: ReportVehicleInput) -> Self {
        Self {
            make: input.make.trim().to_string(),
            model: input.model.trim().to_string(),
            year: input.year,
            plate: input.plate,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FindingInput {
    #[validate(custom = "validate_not_blank")]
    pub category: String,
    #[validate(custom = "validate_not_blank")]
    pub issue: String,
    pub severity: Severity,
    #[serde(default)]
    pub recommendation: String,
}

/// Subida de un informe de inspección (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UploadReportRequest {
    #[validate(custom = "validate_not_blank")]
    pub customer_name: String,
    #[validate(custom = "validate_phone")]
    pub customer_phone: String,
    #[validate]
    pub vehicle: ReportVehicleInput,
    #[validate(custom = "validate_not_blank")]
    pub technician_name: String,
    #[validate(custom = "validate_date")]
    pub report_date: String,
    #[serde(default)]
    pub report_type: InspectionType,
    /// `draft` o `completed`; se envía después con el endpoint de estado
    pub status: Option<InspectionReportStatus>,
    #[serde(default)]
    #[validate]
    pub findings: Vec<FindingInput>,
    #[serde(default)]
    pub photos: Vec<AttachmentInput>,
    #[validate(custom = "validate_money")]
    pub estimated_cost: Option<Decimal>,
    pub report_file: Option<AttachmentInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReportStatusRequest {
    pub status: InspectionReportStatus,
}

#[derive(Debug, Deserialize)]
pub struct CustomerLookupQuery {
    pub phone: String,
}

/// Cliente encontrado por teléfono, para autocompletar un informe
#[derive(Debug, Serialize)]
pub struct CustomerLookup {
    pub customer_id: Uuid,
    pub name: String,
    pub phone: String,
    pub vehicle: Option<VehicleInfo>,
}
