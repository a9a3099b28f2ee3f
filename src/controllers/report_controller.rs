//! Informes de inspección del panel de administración

use chrono::Utc;
use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::inspection_dto::{
    CustomerLookup, ReportSearchQuery, UpdateReportStatusRequest, UploadReportRequest,
};
use crate::models::inspection::{Finding, InspectionReport, InspectionReportStatus};
use crate::services::attachment_service::{inspect_input, AttachmentKind, MAX_PHOTOS_PER_UPLOAD};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::{normalize_phone, parse_date, FieldErrors};

/// Dígitos mínimos antes de buscar un cliente por teléfono
pub const LOOKUP_MIN_DIGITS: usize = 10;

pub struct ReportController {
    state: AppState,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn list(&self, query: ReportSearchQuery) -> ApiResponse<Vec<InspectionReport>> {
        let reports = self
            .state
            .store
            .inspections
            .search_reports(query.q.as_deref(), query.status)
            .await;
        ApiResponse::success(reports)
    }

    pub async fn upload(
        &self,
        admin_id: Uuid,
        request: UploadReportRequest,
    ) -> AppResult<ApiResponse<InspectionReport>> {
        let max_bytes = self.state.config.max_attachment_bytes;
        let status = request.status.unwrap_or(InspectionReportStatus::Draft);

        let mut errors = FieldErrors::new();
        if status == InspectionReportStatus::Sent {
            errors.add("status", "not_sent", "Upload the report first, then send it");
        }
        if status == InspectionReportStatus::Completed && request.findings.is_empty() {
            errors.add("findings", "required", "A completed report needs at least one finding");
        }
        if request.photos.len() > MAX_PHOTOS_PER_UPLOAD {
            errors.add("photos", "too_many", "A report takes at most 6 photos");
        }
        let mut photos = Vec::with_capacity(request.photos.len());
        for photo in &request.photos {
            match inspect_input(AttachmentKind::Photo, photo, max_bytes) {
                Ok(stored) => photos.push(stored),
                Err(e) => errors.check("photos", Err(e)),
            }
        }
        let report_file = match &request.report_file {
            Some(file) => match inspect_input(AttachmentKind::Document, file, max_bytes) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    errors.check("report_file", Err(e));
                    None
                }
            },
            None => None,
        };
        if !errors.is_empty() {
            tracing::warn!(%admin_id, "⚠️ Inspection report rejected by validation");
        }
        errors.into_result()?;

        let report_date = parse_date(&request.report_date)
            .map_err(|_| validation_error("report_date", "Invalid report date"))?;
        let customer_phone = normalize_phone(&request.customer_phone);
        let customer_id = self
            .state
            .store
            .users
            .find_by_phone(&customer_phone)
            .await
            .map(|u| u.id);

        let report = self
            .state
            .store
            .inspections
            .create_report(InspectionReport {
                id: Uuid::new_v4(),
                customer_id,
                customer_name: request.customer_name.trim().to_string(),
                customer_phone,
                vehicle: request.vehicle.into(),
                technician_name: request.technician_name.trim().to_string(),
                report_date,
                report_type: request.report_type,
                status,
                findings: request
                    .findings
                    .into_iter()
                    .map(|f| Finding {
                        category: f.category.trim().to_string(),
                        issue: f.issue.trim().to_string(),
                        severity: f.severity,
                        recommendation: f.recommendation.trim().to_string(),
                    })
                    .collect(),
                photos,
                estimated_cost: request.estimated_cost,
                report_file,
                created_at: Utc::now(),
            })
            .await;

        tracing::info!(
            %admin_id,
            report_id = %report.id,
            plate = %report.vehicle.plate,
            linked = report.customer_id.is_some(),
            "📋 Inspection report uploaded"
        );
        Ok(ApiResponse::success_with_message(
            report,
            "Report uploaded".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        admin_id: Uuid,
        id: Uuid,
        request: UpdateReportStatusRequest,
    ) -> AppResult<ApiResponse<InspectionReport>> {
        let report = self
            .state
            .store
            .inspections
            .set_report_status(id, request.status)
            .await?;
        tracing::info!(%admin_id, report_id = %id, status = ?report.status, "📋 Inspection report status updated");
        Ok(ApiResponse::success(report))
    }

    /// Busca un cliente por teléfono tras la latencia simulada. Devuelve su
    /// nombre y su vehículo principal para autocompletar el informe.
    pub async fn lookup_customer(&self, phone: &str) -> AppResult<ApiResponse<CustomerLookup>> {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < LOOKUP_MIN_DIGITS {
            return Err(validation_error("phone", "Enter at least 10 digits"));
        }

        tokio::time::sleep(self.state.config.simulated_latency()).await;

        let phone = normalize_phone(phone);
        let customer = self
            .state
            .store
            .users
            .find_by_phone(&phone)
            .await
            .ok_or_else(|| not_found_error("Customer", &phone))?;
        let vehicles = self.state.store.vehicles.find_by_owner(customer.id).await;
        let vehicle = vehicles
            .iter()
            .find(|v| v.is_primary)
            .or_else(|| vehicles.first())
            .map(|v| v.info());

        Ok(ApiResponse::success(CustomerLookup {
            customer_id: customer.id,
            name: customer.name,
            phone: customer.phone,
            vehicle,
        }))
    }
}
