use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::service_request::{RequestStatus, ServiceRequest, ServiceRequestKind, Urgency};
use crate::models::warranty::WarrantyCoverage;
use crate::utils::validation::{
    validate_date, validate_enum, validate_money, validate_not_blank, validate_plate, validate_time,
};

/// Periodos de garantía ofrecidos al cerrar un trabajo, en meses
pub const WARRANTY_PERIODS: [u32; 5] = [3, 6, 12, 24, 36];

pub fn validate_warranty_period(months: u32) -> Result<(), ValidationError> {
    validate_enum(&months, &WARRANTY_PERIODS)
}

// Vehículo sin registrar indicado en la solicitud
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleInfoInput {
    #[validate(custom = "validate_not_blank")]
    pub make: String,
    #[validate(custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,
    #[validate(custom = "validate_plate")]
    pub plate: String,
}

// Request para crear una solicitud de servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequestRequest {
    pub vehicle_id: Option<Uuid>,
    #[validate]
    pub vehicle: Option<VehicleInfoInput>,
    #[serde(default)]
    pub kind: ServiceRequestKind,
    #[validate(custom = "validate_not_blank")]
    pub service_type: String,
    #[validate(custom = "validate_not_blank")]
    pub description: String,
    pub urgency: Urgency,
    #[validate(custom = "validate_date")]
    pub preferred_date: String,
    #[validate(custom = "validate_time")]
    pub preferred_time: String,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListRequestsQuery {
    /// `all` o un estado
    pub status: Option<String>,
}

impl ListRequestsQuery {
    pub fn status_filter(&self) -> Result<Option<RequestStatus>, ValidationError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(value) => RequestStatus::ALL
                .iter()
                .copied()
                .find(|s| s.as_str() == value)
                .map(Some)
                .ok_or_else(|| {
                    let mut error = ValidationError::new("status");
                    error.add_param("value".into(), &value.to_string());
                    error
                }),
        }
    }
}

// Request para enviar una cotización
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuoteRequest {
    #[validate(custom = "validate_money")]
    pub labor_cost: Decimal,
    #[validate(custom = "validate_money")]
    pub parts_cost: Decimal,
    #[serde(default)]
    pub urgent: bool,
    pub notes: Option<String>,
    pub estimated_time: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AcceptQuoteRequest {
    pub quote_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

// Adjunto en base64
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachmentInput {
    #[validate(custom = "validate_not_blank")]
    pub file_name: String,
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompletionInput {
    #[validate(custom = "validate_not_blank")]
    pub work_performed: String,
    pub parts_used: Option<String>,
    #[validate(custom = "validate_money")]
    pub labor_hours: Decimal,
    #[validate(custom = "validate_money")]
    pub total_cost: Decimal,
    pub customer_notes: Option<String>,
    #[serde(default)]
    #[validate]
    pub photos: Vec<AttachmentInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WarrantyInput {
    pub coverage: WarrantyCoverage,
    /// Uno de `WARRANTY_PERIODS`, comprobado al cerrar el trabajo
    pub period_months: u32,
    #[validate(custom = "validate_not_blank")]
    pub details: String,
    #[validate]
    pub document: Option<AttachmentInput>,
}

// Cierre de trabajo: completion + garantía en una sola request
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteJobRequest {
    #[validate]
    pub completion: CompletionInput,
    #[validate]
    pub warranty: WarrantyInput,
}

// Resumen para listados
#[derive(Debug, Serialize)]
pub struct ServiceRequestSummary {
    pub id: Uuid,
    pub customer_name: String,
    pub vehicle: String,
    pub service_type: String,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub quote_count: usize,
    pub preferred_date: chrono::NaiveDate,
    pub preferred_time: String,
}

impl From<&ServiceRequest> for ServiceRequestSummary {
    fn from(request: &ServiceRequest) -> Self {
        Self {
            id: request.id,
            customer_name: request.customer_name.clone(),
            vehicle: request.vehicle_info.display_name(),
            service_type: request.service_type.clone(),
            urgency: request.urgency,
            status: request.status,
            quote_count: request.quotes.len(),
            preferred_date: request.preferred_date,
            preferred_time: request.preferred_time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter() {
        let query = |s: &str| ListRequestsQuery {
            status: Some(s.to_string()),
        };
        assert_eq!(query("all").status_filter().unwrap(), None);
        assert_eq!(
            query("in-progress").status_filter().unwrap(),
            Some(RequestStatus::InProgress)
        );
        assert!(query("done").status_filter().is_err());
        assert_eq!(ListRequestsQuery::default().status_filter().unwrap(), None);
    }

    #[test]
    fn test_complete_job_validation_collects_nested_errors() {
        let request: CompleteJobRequest = serde_json::from_value(serde_json::json!({
            "completion": {
                "work_performed": " ",
                "labor_hours": "-1",
                "total_cost": "850"
            },
            "warranty": {
                "coverage": "parts-labor",
                "period_months": 7,
                "details": "Brake pads"
            }
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json["completion"].is_object());
        assert!(validate_warranty_period(request.warranty.period_months).is_err());
        assert!(validate_warranty_period(12).is_ok());
    }

    #[test]
    fn test_valid_quote_request() {
        let request: SubmitQuoteRequest = serde_json::from_value(serde_json::json!({
            "labor_cost": 300,
            "parts_cost": 150,
            "urgent": true
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let negative: SubmitQuoteRequest = serde_json::from_value(serde_json::json!({
            "labor_cost": -5,
            "parts_cost": 0
        }))
        .unwrap();
        assert!(negative.validate().is_err());
    }
}
