use chrono::Utc;
use uuid::Uuid;

use crate::dto::account_dto::{AnalyzeRequest, BookDiagnosisRequest, VehicleFilterQuery};
use crate::dto::common_dto::ApiResponse;
use crate::models::diagnosis::{
    DiagnosisBooking, DiagnosisOption, DiagnosisReport, DiagnosticJob, ReportStatus,
};
use crate::services::diagnostics_service::{diagnosis_options, DiagnosticsService};
use crate::state::AppState;
use crate::utils::errors::{internal_error, validation_error, AppResult};
use crate::utils::validation::parse_date;

pub struct DiagnosisController {
    service: DiagnosticsService,
    state: AppState,
}

impl DiagnosisController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.diagnostics.clone(),
            state: state.clone(),
        }
    }

    pub async fn reports(
        &self,
        owner_id: Uuid,
        query: VehicleFilterQuery,
    ) -> ApiResponse<Vec<DiagnosisReport>> {
        let reports = self
            .state
            .store
            .diagnosis
            .reports_for(owner_id, query.vehicle_id)
            .await;
        ApiResponse::success(reports)
    }

    pub fn options(&self) -> ApiResponse<Vec<DiagnosisOption>> {
        ApiResponse::success(diagnosis_options())
    }

    /// Reserva una cita de diagnóstico para un vehículo propio. El informe
    /// queda `pending` hasta que el técnico lo complete.
    pub async fn book(
        &self,
        owner_id: Uuid,
        request: BookDiagnosisRequest,
    ) -> AppResult<ApiResponse<DiagnosisBooking>> {
        let vehicle = self
            .state
            .store
            .vehicles
            .find_owned(owner_id, request.vehicle_id)
            .await?;
        let date = parse_date(&request.date)
            .map_err(|_| validation_error("date", "Invalid date"))?;
        if date < self.state.today() {
            return Err(validation_error("date", "Diagnosis date cannot be in the past"));
        }
        let option = diagnosis_options()
            .into_iter()
            .find(|o| o.kind == request.kind)
            .ok_or_else(|| internal_error("diagnosis option missing from catalogue"))?;

        let report = DiagnosisReport {
            id: Uuid::new_v4(),
            owner_id,
            vehicle_id: vehicle.id,
            date,
            kind: request.kind,
            status: ReportStatus::Pending,
            summary: option.title.to_string(),
            details: format!("Scheduled for {} at {}", date, request.time),
        };
        let booking = DiagnosisBooking {
            id: Uuid::new_v4(),
            owner_id,
            vehicle_id: vehicle.id,
            kind: request.kind,
            price: option.price,
            date,
            time: request.time,
            notes: request
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            report_id: report.id,
            created_at: Utc::now(),
        };
        let booking = self.state.store.diagnosis.create_booking(booking, report).await;

        tracing::info!(
            %owner_id,
            booking_id = %booking.id,
            kind = ?booking.kind,
            price = %booking.price,
            "🩺 Diagnosis booked"
        );
        Ok(ApiResponse::success_with_message(
            booking,
            "Diagnosis booked successfully".to_string(),
        ))
    }

    pub async fn bookings(&self, owner_id: Uuid) -> ApiResponse<Vec<DiagnosisBooking>> {
        ApiResponse::success(self.state.store.diagnosis.bookings_for(owner_id).await)
    }

    /// Devuelve el job en estado `analyzing`; el resultado se consulta después
    pub async fn analyze(
        &self,
        owner_id: Uuid,
        request: AnalyzeRequest,
    ) -> AppResult<ApiResponse<DiagnosticJob>> {
        let job = self.service.start(owner_id, request.into()).await?;
        Ok(ApiResponse::success_with_message(
            job,
            "Analysis started".to_string(),
        ))
    }

    pub async fn jobs(&self, owner_id: Uuid) -> ApiResponse<Vec<DiagnosticJob>> {
        let mut jobs = self.state.store.diagnosis.jobs_for(owner_id).await;
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ApiResponse::success(jobs)
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> AppResult<ApiResponse<DiagnosticJob>> {
        Ok(ApiResponse::success(self.service.get(owner_id, id).await?))
    }

    pub async fn cancel(&self, owner_id: Uuid, id: Uuid) -> AppResult<ApiResponse<DiagnosticJob>> {
        let job = self.service.cancel(owner_id, id).await?;
        Ok(ApiResponse::success_with_message(
            job,
            "Analysis cancelled".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::database::seed::*;
    use crate::database::Store;
    use crate::models::diagnosis::DiagnosisType;
    use crate::utils::errors::AppError;
    use rust_decimal::Decimal;

    fn controller() -> DiagnosisController {
        let config = EnvironmentConfig {
            reference_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 20),
            ..EnvironmentConfig::default()
        };
        DiagnosisController::new(&AppState::new(config, Store::seeded()))
    }

    fn request(kind: DiagnosisType, vehicle_id: Uuid, date: &str) -> BookDiagnosisRequest {
        BookDiagnosisRequest {
            kind,
            vehicle_id,
            date: date.to_string(),
            time: "10:30".to_string(),
            notes: Some("Rattle from the dashboard".to_string()),
        }
    }

    #[tokio::test]
    async fn test_booking_charges_option_price_and_adds_pending_report() {
        let controller = controller();
        let before = controller
            .reports(AHMED_ID, VehicleFilterQuery { vehicle_id: Some(CAMRY_ID) })
            .await
            .data
            .unwrap()
            .len();

        let booking = controller
            .book(AHMED_ID, request(DiagnosisType::Video, CAMRY_ID, "2024-01-25"))
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(booking.price, Decimal::new(50, 0));

        let reports = controller
            .reports(AHMED_ID, VehicleFilterQuery { vehicle_id: Some(CAMRY_ID) })
            .await
            .data
            .unwrap();
        assert_eq!(reports.len(), before + 1);
        let pending = reports.iter().find(|r| r.id == booking.report_id).unwrap();
        assert_eq!(pending.status, ReportStatus::Pending);
        assert_eq!(pending.summary, "Video Call");
        assert_eq!(controller.bookings(AHMED_ID).await.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_booking_needs_own_vehicle_and_future_date() {
        let controller = controller();
        let foreign = controller
            .book(SARA_ID, request(DiagnosisType::Technician, CAMRY_ID, "2024-01-25"))
            .await;
        assert!(matches!(foreign, Err(AppError::NotFound(_))));

        let past = controller
            .book(AHMED_ID, request(DiagnosisType::Location, BMW_ID, "2024-01-19"))
            .await;
        assert!(matches!(past, Err(AppError::Validation(_))));
        assert!(controller.bookings(AHMED_ID).await.data.unwrap().is_empty());
    }
}
