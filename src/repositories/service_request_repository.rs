use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::Table;
use crate::models::checkout::Booking;
use crate::models::completion::{CompletionRecord, JobCloseOut};
use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::models::warranty::Warranty;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::warranty_repository::WarrantyRepository;
use crate::utils::errors::{conflict_error, forbidden_error, not_found_error, AppResult};

#[derive(Clone, Default)]
pub struct ServiceRequestRepository {
    requests: Table<ServiceRequest>,
}

impl ServiceRequestRepository {
    pub fn new(requests: Vec<ServiceRequest>) -> Self {
        Self {
            requests: Table::from_rows(requests.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    pub async fn create(&self, request: ServiceRequest) -> ServiceRequest {
        self.requests.insert(request.id, request.clone()).await;
        request
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<ServiceRequest> {
        self.requests
            .get(id)
            .await
            .ok_or_else(|| not_found_error("Service request", &id.to_string()))
    }

    /// Más recientes primero. `customer_id = None` lista todas.
    pub async fn list(
        &self,
        customer_id: Option<Uuid>,
        status: Option<RequestStatus>,
    ) -> Vec<ServiceRequest> {
        let mut requests = self
            .requests
            .filter(|r| {
                customer_id.map_or(true, |c| r.customer_id == c)
                    && status.map_or(true, |s| r.status == s)
            })
            .await;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    pub async fn all(&self) -> Vec<ServiceRequest> {
        self.requests.all().await
    }

    /// Modificación atómica de una solicitud
    pub async fn update<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut ServiceRequest) -> AppResult<R>,
    {
        self.requests.update(id, "Service request", f).await
    }

    /// Cierra un trabajo: guarda la completion, emite la garantía y pasa la
    /// solicitud a `completed`, todo o nada.
    ///
    /// Orden de locks: solicitudes y después garantías. Ninguna otra
    /// operación toma ambos.
    pub async fn close_out(
        &self,
        warranties: &WarrantyRepository,
        garage_id: Uuid,
        actor: Uuid,
        completion: CompletionRecord,
        warranty: Warranty,
    ) -> AppResult<JobCloseOut> {
        let request_id = completion.service_request_id;
        let mut requests = self.requests.write().await;
        let mut warranty_rows = warranties.write().await;

        let request = requests
            .get_mut(&request_id)
            .ok_or_else(|| not_found_error("Service request", &request_id.to_string()))?;

        let accepted_garage = request.accepted_quote().map(|q| q.garage_id);
        if accepted_garage != Some(garage_id) {
            return Err(forbidden_error(
                "complete job",
                "only the garage of the accepted quote can close this request",
            ));
        }
        if request.completion.is_some() {
            return Err(conflict_error("Completion", "service request", &request_id.to_string()));
        }
        if warranty_rows.contains_key(&warranty.id) {
            return Err(conflict_error("Warranty", "id", &warranty.id.to_string()));
        }

        // La transición valida antes de mutar; a partir de aquí nada falla.
        request.transition(RequestStatus::Completed, actor)?;
        request.completion = Some(completion.clone());
        warranty_rows.insert(warranty.id, warranty.clone());

        Ok(JobCloseOut {
            completion,
            warranty,
        })
    }

    /// Confirma una reserva: acepta la cotización (si no estaba ya aceptada)
    /// y guarda la reserva sin soltar los locks entre ambas escrituras.
    /// Una solicitud admite una sola reserva.
    ///
    /// Orden de locks: solicitudes y después reservas.
    pub async fn book(
        &self,
        bookings: &BookingRepository,
        booking: Booking,
        now: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let request_id = booking.service_request_id;
        let mut requests = self.requests.write().await;
        let mut booking_rows = bookings.write().await;

        if booking_rows.values().any(|b| b.service_request_id == request_id) {
            return Err(conflict_error("Booking", "service request", &request_id.to_string()));
        }
        let request = requests
            .get_mut(&request_id)
            .ok_or_else(|| not_found_error("Service request", &request_id.to_string()))?;

        let already_accepted = request.status == RequestStatus::Accepted
            && request.accepted_quote().map(|q| q.id) == Some(booking.quote_id);
        if !already_accepted {
            request.accept_quote(booking.quote_id, booking.customer_id, now)?;
        }
        booking_rows.insert(booking.id, booking.clone());
        Ok(booking)
    }
}
