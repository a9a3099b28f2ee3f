use chrono::{Duration, Months, Utc};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::dto::common_dto::ApiResponse;
use crate::dto::service_request_dto::{
    validate_warranty_period, CompleteJobRequest, CreateServiceRequestRequest,
    ListRequestsQuery, ServiceRequestSummary, SubmitQuoteRequest,
};
use crate::middleware::auth::Session;
use crate::models::completion::{CompletionRecord, JobCloseOut};
use crate::models::quote::{Quote, QuoteStatus};
use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::models::vehicle::VehicleInfo;
use crate::models::warranty::{Warranty, WarrantyType};
use crate::services::attachment_service::{inspect_input, AttachmentKind, MAX_PHOTOS_PER_UPLOAD};
use crate::services::pricing_service::quote_total;
use crate::state::AppState;
use crate::utils::errors::{
    forbidden_error, internal_error, not_found_error, validation_error, AppError, AppResult,
};
use crate::utils::validation::{parse_date, FieldErrors};

/// Días de validez de una cotización
pub const QUOTE_VALIDITY_DAYS: i64 = 3;

pub struct ServiceRequestController {
    state: AppState,
}

impl ServiceRequestController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn create(
        &self,
        session: &Session,
        request: CreateServiceRequestRequest,
    ) -> AppResult<ApiResponse<ServiceRequest>> {
        let customer_id = session.customer_id()?;
        let customer = self
            .state
            .store
            .users
            .find_by_id(customer_id)
            .await
            .ok_or_else(|| not_found_error("User", &customer_id.to_string()))?;

        let (vehicle_id, vehicle_info) = match (request.vehicle_id, request.vehicle) {
            (Some(id), _) => {
                let vehicle = self.state.store.vehicles.find_owned(customer_id, id).await?;
                (Some(vehicle.id), vehicle.info())
            }
            (None, Some(vehicle)) => (
                None,
                VehicleInfo {
                    make: vehicle.make.trim().to_string(),
                    model: vehicle.model.trim().to_string(),
                    year: vehicle.year,
                    plate: vehicle.plate.trim().to_uppercase(),
                },
            ),
            (None, None) => {
                return Err(validation_error(
                    "vehicle",
                    "A registered vehicle or vehicle details are required",
                ))
            }
        };

        let preferred_date = parse_date(&request.preferred_date).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("preferred_date", e);
            AppError::Validation(errors)
        })?;

        let now = Utc::now();
        let service_request = ServiceRequest {
            id: Uuid::new_v4(),
            customer_id,
            customer_name: customer.name,
            customer_phone: customer.phone,
            vehicle_id,
            vehicle_info,
            kind: request.kind,
            service_type: request.service_type.trim().to_string(),
            description: request.description.trim().to_string(),
            urgency: request.urgency,
            preferred_date,
            preferred_time: request.preferred_time,
            location: request.location,
            status: RequestStatus::Pending,
            quotes: Vec::new(),
            completion: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let service_request = self.state.store.requests.create(service_request).await;

        tracing::info!(
            request_id = %service_request.id,
            %customer_id,
            service_type = %service_request.service_type,
            "📝 Service request created"
        );
        Ok(ApiResponse::success_with_message(
            service_request,
            "Service request submitted".to_string(),
        ))
    }

    /// Clientes ven sus solicitudes; talleres y admins ven todas
    pub async fn list(
        &self,
        session: &Session,
        query: ListRequestsQuery,
    ) -> AppResult<ApiResponse<Vec<ServiceRequestSummary>>> {
        let status = query.status_filter().map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("status", e);
            AppError::Validation(errors)
        })?;
        let customer_id = match session {
            Session::Customer { user_id, .. } => Some(*user_id),
            Session::Garage { .. } | Session::Admin { .. } => None,
        };

        let requests = self.state.store.requests.list(customer_id, status).await;
        Ok(ApiResponse::success(
            requests.iter().map(ServiceRequestSummary::from).collect(),
        ))
    }

    pub async fn get(&self, session: &Session, id: Uuid) -> AppResult<ApiResponse<ServiceRequest>> {
        Ok(ApiResponse::success(self.visible(session, id).await?))
    }

    /// Cotizaciones de la solicitud, de menor a mayor precio
    pub async fn quotes(&self, session: &Session, id: Uuid) -> AppResult<ApiResponse<Vec<Quote>>> {
        let mut quotes = self.visible(session, id).await?.quotes;
        quotes.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(ApiResponse::success(quotes))
    }

    /// Un taller cotiza una solicitud abierta. El estado no cambia.
    pub async fn submit_quote(
        &self,
        session: &Session,
        id: Uuid,
        request: SubmitQuoteRequest,
    ) -> AppResult<ApiResponse<Quote>> {
        let (_, garage_id) = session.garage()?;
        let garage = self
            .state
            .store
            .garages
            .find_by_id(garage_id)
            .await
            .ok_or_else(|| not_found_error("Garage", &garage_id.to_string()))?;
        if !garage.verified {
            return Err(forbidden_error("submit quote", "garage is pending verification"));
        }

        let now = Utc::now();
        let price = quote_total(request.labor_cost, request.parts_cost, request.urgent);
        let quote = self
            .state
            .store
            .requests
            .update(id, |service_request| {
                let quote = Quote {
                    id: Uuid::new_v4(),
                    garage_id,
                    garage_name: garage.name.clone(),
                    rating: garage.rating,
                    labor_cost: request.labor_cost,
                    parts_cost: request.parts_cost,
                    urgent: request.urgent,
                    price,
                    estimated_time: request
                        .estimated_time
                        .clone()
                        .unwrap_or_else(|| "To be confirmed".to_string()),
                    description: format!("{} quote", service_request.service_type),
                    notes: request.notes.clone(),
                    distance_km: None,
                    valid_until: now + Duration::days(QUOTE_VALIDITY_DAYS),
                    status: QuoteStatus::Pending,
                    created_at: now,
                };
                service_request.add_quote(quote.clone())?;
                Ok(quote)
            })
            .await?;

        tracing::info!(
            request_id = %id,
            %garage_id,
            quote_id = %quote.id,
            price = %quote.price,
            urgent = quote.urgent,
            "💰 Quote submitted"
        );
        Ok(ApiResponse::success_with_message(
            quote,
            "Quote submitted successfully".to_string(),
        ))
    }

    /// El cliente acepta una cotización: `quoted -> accepted`
    pub async fn accept_quote(
        &self,
        session: &Session,
        id: Uuid,
        quote_id: Uuid,
    ) -> AppResult<ApiResponse<Quote>> {
        let customer_id = session.customer_id()?;
        let quote = self
            .state
            .store
            .requests
            .update(id, |service_request| {
                if service_request.customer_id != customer_id {
                    return Err(not_found_error("Service request", &id.to_string()));
                }
                service_request.accept_quote(quote_id, customer_id, Utc::now())
            })
            .await?;

        tracing::info!(request_id = %id, %quote_id, garage = %quote.garage_name, "🤝 Quote accepted");
        Ok(ApiResponse::success_with_message(
            quote,
            "Quote accepted".to_string(),
        ))
    }

    /// Transiciones manuales: `quoted`, `in-progress` y `cancelled`
    pub async fn update_status(
        &self,
        session: &Session,
        id: Uuid,
        to: RequestStatus,
    ) -> AppResult<ApiResponse<ServiceRequest>> {
        if !matches!(
            to,
            RequestStatus::Quoted | RequestStatus::InProgress | RequestStatus::Cancelled
        ) {
            return Err(validation_error(
                "status",
                "Use quote acceptance or job completion for this status",
            ));
        }

        let actor = session.user_id();
        let updated = self
            .state
            .store
            .requests
            .update(id, |service_request| {
                authorize_status_change(session, service_request, to)?;
                service_request.transition(to, actor)?;
                Ok(service_request.clone())
            })
            .await?;

        tracing::info!(
            request_id = %id,
            %actor,
            status = %updated.status,
            "🔄 Service request status updated"
        );
        Ok(ApiResponse::success(updated))
    }

    /// Cierre de trabajo: completion y garantía se guardan juntas o ninguna
    pub async fn complete_job(
        &self,
        session: &Session,
        id: Uuid,
        request: CompleteJobRequest,
    ) -> AppResult<ApiResponse<JobCloseOut>> {
        let (user_id, garage_id) = session.garage()?;
        let max_bytes = self.state.config.max_attachment_bytes;

        let mut errors = FieldErrors::new();
        errors.check(
            "period_months",
            validate_warranty_period(request.warranty.period_months),
        );
        if request.completion.photos.len() > MAX_PHOTOS_PER_UPLOAD {
            errors.add("photos", "too_many", "A job close-out takes at most 6 photos");
        }
        let mut photos = Vec::with_capacity(request.completion.photos.len());
        for photo in &request.completion.photos {
            match inspect_input(AttachmentKind::Photo, photo, max_bytes) {
                Ok(stored) => photos.push(stored),
                Err(e) => errors.check("photos", Err(e)),
            }
        }
        let document = match &request.warranty.document {
            Some(document) => match inspect_input(AttachmentKind::Document, document, max_bytes) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    errors.check("document", Err(e));
                    None
                }
            },
            None => None,
        };
        if !errors.is_empty() {
            tracing::warn!(request_id = %id, %garage_id, "⚠️ Job close-out rejected by validation");
        }
        errors.into_result()?;

        let service_request = self.state.store.requests.find_by_id(id).await?;
        let garage_name = self
            .state
            .store
            .garages
            .find_by_id(garage_id)
            .await
            .map(|g| g.name)
            .ok_or_else(|| not_found_error("Garage", &garage_id.to_string()))?;

        let now = Utc::now();
        let start_date = self.state.today();
        let end_date = start_date
            .checked_add_months(Months::new(request.warranty.period_months))
            .ok_or_else(|| internal_error("warranty end date out of range"))?;

        let completion = CompletionRecord {
            id: Uuid::new_v4(),
            service_request_id: id,
            garage_id,
            work_performed: request.completion.work_performed.trim().to_string(),
            parts_used: request.completion.parts_used,
            labor_hours: request.completion.labor_hours,
            total_cost: request.completion.total_cost,
            customer_notes: request.completion.customer_notes,
            photos,
            completed_at: now,
        };
        let warranty = Warranty {
            id: Uuid::new_v4(),
            customer_id: service_request.customer_id,
            vehicle_id: service_request.vehicle_id,
            service_request_id: Some(id),
            warranty_type: WarrantyType::Service,
            coverage: Some(request.warranty.coverage),
            provider: garage_name,
            start_date,
            end_date,
            coverage_details: format!(
                "{}: {}",
                request.warranty.coverage.label(),
                request.warranty.details.trim()
            ),
            document,
            claim_history: Vec::new(),
        };

        let close_out = self
            .state
            .store
            .requests
            .close_out(&self.state.store.warranties, garage_id, user_id, completion, warranty)
            .await?;

        tracing::info!(
            request_id = %id,
            %garage_id,
            completion_id = %close_out.completion.id,
            warranty_id = %close_out.warranty.id,
            warranty_end = %close_out.warranty.end_date,
            "✅ Job completed with warranty"
        );
        Ok(ApiResponse::success_with_message(
            close_out,
            "Job completed and warranty issued".to_string(),
        ))
    }

    /// Solicitud visible para la sesión; la de otro cliente es `NotFound`
    async fn visible(&self, session: &Session, id: Uuid) -> AppResult<ServiceRequest> {
        let service_request = self.state.store.requests.find_by_id(id).await?;
        match session {
            Session::Customer { user_id, .. } if service_request.customer_id != *user_id => {
                Err(not_found_error("Service request", &id.to_string()))
            }
            _ => Ok(service_request),
        }
    }
}

/// Quién puede pedir cada transición manual
fn authorize_status_change(
    session: &Session,
    service_request: &ServiceRequest,
    to: RequestStatus,
) -> AppResult<()> {
    let accepted_garage = service_request.accepted_quote().map(|q| q.garage_id);
    let allowed = match (session, to) {
        (Session::Admin { .. }, _) => true,
        (Session::Customer { user_id, .. }, RequestStatus::Cancelled) => {
            service_request.customer_id == *user_id
        }
        (Session::Garage { garage_id, .. }, RequestStatus::Quoted) => service_request
            .quotes
            .iter()
            .any(|q| q.garage_id == *garage_id),
        (Session::Garage { garage_id, .. }, RequestStatus::InProgress | RequestStatus::Cancelled) => {
            accepted_garage == Some(*garage_id)
        }
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(forbidden_error(
            &format!("move request to '{}'", to),
            "not a party to this request",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::database::seed::*;
    use crate::database::Store;
    use crate::dto::service_request_dto::{AttachmentInput, CompletionInput, WarrantyInput};
    use crate::models::service_request::Urgency;
    use crate::models::warranty::WarrantyCoverage;
    use rust_decimal::Decimal;

    fn controller() -> (AppState, ServiceRequestController) {
        let state = AppState::new(EnvironmentConfig::default(), Store::seeded());
        let controller = ServiceRequestController::new(&state);
        (state, controller)
    }

    fn ahmed() -> Session {
        Session::Customer {
            user_id: AHMED_ID,
            name: "Ahmed Al-Rashid".to_string(),
        }
    }

    fn al_futtaim() -> Session {
        Session::Garage {
            user_id: AL_FUTTAIM_OWNER_ID,
            garage_id: AL_FUTTAIM_ID,
            name: "Al Futtaim Motors".to_string(),
        }
    }

    fn quick_fix() -> Session {
        Session::Garage {
            user_id: QUICK_FIX_OWNER_ID,
            garage_id: QUICK_FIX_ID,
            name: "Quick Fix Garage".to_string(),
        }
    }

    fn quote_request(labor: i64, parts: i64, urgent: bool) -> SubmitQuoteRequest {
        SubmitQuoteRequest {
            labor_cost: Decimal::new(labor, 0),
            parts_cost: Decimal::new(parts, 0),
            urgent,
            notes: None,
            estimated_time: Some("2 hours".to_string()),
        }
    }

    fn close_out_request(period_months: u32) -> CompleteJobRequest {
        CompleteJobRequest {
            completion: CompletionInput {
                work_performed: "Replaced front brake pads and discs".to_string(),
                parts_used: Some("Brake pads, discs".to_string()),
                labor_hours: Decimal::new(25, 1),
                total_cost: Decimal::new(450, 0),
                customer_notes: None,
                photos: vec![AttachmentInput {
                    file_name: "after.png".to_string(),
                    content_type: "image/png".to_string(),
                    data_base64: "aGVsbG8=".to_string(),
                }],
            },
            warranty: WarrantyInput {
                coverage: WarrantyCoverage::PartsLabor,
                period_months,
                details: "Pads and discs".to_string(),
                document: None,
            },
        }
    }

    #[tokio::test]
    async fn test_create_requires_a_vehicle() {
        let (_, controller) = controller();
        let request = CreateServiceRequestRequest {
            vehicle_id: None,
            vehicle: None,
            kind: Default::default(),
            service_type: "Oil Change".to_string(),
            description: "Regular oil change".to_string(),
            urgency: Urgency::Low,
            preferred_date: "2024-03-01".to_string(),
            preferred_time: "09:00".to_string(),
            location: None,
        };

        let result = controller.create(&ahmed(), request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_with_registered_vehicle_copies_its_info() {
        let (_, controller) = controller();
        let request = CreateServiceRequestRequest {
            vehicle_id: Some(BMW_ID),
            vehicle: None,
            kind: Default::default(),
            service_type: "AC Repair".to_string(),
            description: "Not cooling".to_string(),
            urgency: Urgency::Medium,
            preferred_date: "2024-03-01".to_string(),
            preferred_time: "14:00".to_string(),
            location: Some("JLT".to_string()),
        };

        let created = controller.create(&ahmed(), request).await.unwrap().data.unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.vehicle_info.make, "BMW");
        assert_eq!(created.customer_phone, AHMED_PHONE);
    }

    #[tokio::test]
    async fn test_submit_quote_computes_total_and_keeps_status() {
        let (state, controller) = controller();

        let quote = controller
            .submit_quote(&al_futtaim(), OIL_REQUEST_ID, quote_request(100, 50, true))
            .await
            .unwrap()
            .data
            .unwrap();

        assert_eq!(quote.price, Decimal::new(170, 0));
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.garage_name, "Al Futtaim Motors");
        let stored = state.store.requests.find_by_id(OIL_REQUEST_ID).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
        assert_eq!(stored.quotes.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_quote_rejected_for_customer_and_unverified_garage() {
        let (_, controller) = controller();
        let unverified = Session::Garage {
            user_id: DUBAI_AUTO_CARE_OWNER_ID,
            garage_id: DUBAI_AUTO_CARE_ID,
            name: "Dubai Auto Care".to_string(),
        };

        let as_customer = controller
            .submit_quote(&ahmed(), OIL_REQUEST_ID, quote_request(100, 0, false))
            .await;
        let as_unverified = controller
            .submit_quote(&unverified, OIL_REQUEST_ID, quote_request(100, 0, false))
            .await;

        assert!(matches!(as_customer, Err(AppError::Forbidden(_))));
        assert!(matches!(as_unverified, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_submit_quote_on_request_in_progress_conflicts() {
        let (_, controller) = controller();
        let result = controller
            .submit_quote(&quick_fix(), BRAKE_REQUEST_ID, quote_request(100, 0, false))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_garage_marks_quoted_then_customer_accepts() {
        let (_, controller) = controller();
        let quote = controller
            .submit_quote(&al_futtaim(), OIL_REQUEST_ID, quote_request(120, 30, false))
            .await
            .unwrap()
            .data
            .unwrap();

        let quoted = controller
            .update_status(&al_futtaim(), OIL_REQUEST_ID, RequestStatus::Quoted)
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(quoted.status, RequestStatus::Quoted);

        let accepted = controller
            .accept_quote(&ahmed(), OIL_REQUEST_ID, quote.id)
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(accepted.status, QuoteStatus::Accepted);
    }

    #[tokio::test]
    async fn test_accept_unknown_quote_is_not_found() {
        let (_, controller) = controller();
        let result = controller
            .accept_quote(&ahmed(), ENGINE_REQUEST_ID, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_other_customer_cannot_see_request() {
        let (_, controller) = controller();
        let omar = Session::Customer {
            user_id: OMAR_ID,
            name: "Omar Hassan".to_string(),
        };
        let result = controller.get(&omar, ENGINE_REQUEST_ID).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_status_endpoint_rejects_completed() {
        let (_, controller) = controller();
        let result = controller
            .update_status(&al_futtaim(), BRAKE_REQUEST_ID, RequestStatus::Completed)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_cancel_completed_request_is_invalid_transition() {
        let (_, controller) = controller();
        controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(12))
            .await
            .unwrap();

        let result = controller
            .update_status(&al_futtaim(), BRAKE_REQUEST_ID, RequestStatus::Cancelled)
            .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidTransition {
                from: RequestStatus::Completed,
                to: RequestStatus::Cancelled
            })
        ));
    }

    #[tokio::test]
    async fn test_complete_job_creates_completion_and_warranty_together() {
        let (state, controller) = controller();
        let before = state.store.warranties.count().await;

        let close_out = controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(12))
            .await
            .unwrap()
            .data
            .unwrap();

        assert_eq!(close_out.warranty.warranty_type, WarrantyType::Service);
        assert_eq!(close_out.warranty.provider, "Al Futtaim Motors");
        assert_eq!(close_out.warranty.customer_id, SARA_ID);
        assert_eq!(
            close_out.warranty.end_date,
            close_out.warranty.start_date + Months::new(12)
        );
        assert_eq!(close_out.completion.photos.len(), 1);
        assert_eq!(state.store.warranties.count().await, before + 1);

        let stored = state.store.requests.find_by_id(BRAKE_REQUEST_ID).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Completed);
        assert!(stored.completion.is_some());
    }

    #[tokio::test]
    async fn test_warranty_starts_on_reference_date() {
        let reference = chrono::NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let config = EnvironmentConfig {
            reference_date: Some(reference),
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(config, Store::seeded());
        let controller = ServiceRequestController::new(&state);

        let close_out = controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(6))
            .await
            .unwrap()
            .data
            .unwrap();

        assert_eq!(close_out.warranty.start_date, state.today());
        assert_eq!(close_out.warranty.start_date, reference);
        assert_eq!(
            close_out.warranty.end_date,
            chrono::NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
        );
    }

    #[tokio::test]
    async fn test_complete_job_with_invalid_period_changes_nothing() {
        let (state, controller) = controller();
        let before = state.store.warranties.count().await;

        let result = controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(7))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.store.warranties.count().await, before);
        let stored = state.store.requests.find_by_id(BRAKE_REQUEST_ID).await.unwrap();
        assert_eq!(stored.status, RequestStatus::InProgress);
        assert!(stored.completion.is_none());
    }

    #[tokio::test]
    async fn test_complete_job_by_other_garage_is_forbidden() {
        let (state, controller) = controller();
        let before = state.store.warranties.count().await;

        let result = controller
            .complete_job(&quick_fix(), BRAKE_REQUEST_ID, close_out_request(6))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(state.store.warranties.count().await, before);
    }

    #[tokio::test]
    async fn test_complete_job_twice_conflicts() {
        let (state, controller) = controller();
        controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(6))
            .await
            .unwrap();
        let after_first = state.store.warranties.count().await;

        let second = controller
            .complete_job(&al_futtaim(), BRAKE_REQUEST_ID, close_out_request(6))
            .await;

        assert!(second.is_err());
        assert_eq!(state.store.warranties.count().await, after_first);
    }
}
