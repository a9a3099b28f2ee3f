use chrono::Utc;
use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::inspection_dto::{BookInspectionRequest, InspectionOptionsResponse};
use crate::models::inspection::{InspectionBooking, InspectionMode, InspectionReport};
use crate::services::inspection_service::{
    inspection_options, inspection_price, is_time_slot, INSPECTION_TIME_SLOTS,
};
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{normalize_phone, parse_date, FieldErrors};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct InspectionController {
    state: AppState,
}

impl InspectionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub fn options(&self) -> ApiResponse<InspectionOptionsResponse> {
        ApiResponse::success(InspectionOptionsResponse {
            options: inspection_options(),
            time_slots: INSPECTION_TIME_SLOTS.to_vec(),
        })
    }

    /// Reserva una inspección en una franja libre a partir de hoy
    pub async fn book(
        &self,
        customer_id: Uuid,
        request: BookInspectionRequest,
    ) -> AppResult<ApiResponse<InspectionBooking>> {
        let address = non_blank(request.address);

        let mut errors = FieldErrors::new();
        let date = match parse_date(&request.date) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.check("date", Err(e));
                None
            }
        };
        if date.map_or(false, |d| d < self.state.today()) {
            errors.add("date", "past", "Inspection date cannot be in the past");
        }
        if !is_time_slot(&request.time) {
            errors.add("time", "slot", "Choose one of the available time slots");
        }
        if request.mode == InspectionMode::VisitMe && address.is_none() {
            errors.add("address", "required", "An address is required when the inspector visits you");
        }
        if !errors.is_empty() {
            tracing::warn!(%customer_id, "⚠️ Inspection booking rejected by validation");
        }
        errors.into_result()?;
        let date = date.ok_or_else(|| validation_error("date", "Invalid date"))?;

        let booking = self
            .state
            .store
            .inspections
            .create_booking(InspectionBooking {
                id: Uuid::new_v4(),
                customer_id,
                mode: request.mode,
                inspection_type: request.inspection_type,
                date,
                time: request.time.trim().to_string(),
                name: request.name.trim().to_string(),
                phone: normalize_phone(&request.phone),
                address,
                vehicle_details: non_blank(request.vehicle_details),
                special_requests: non_blank(request.special_requests),
                price: inspection_price(request.mode),
                created_at: Utc::now(),
            })
            .await;

        tracing::info!(
            %customer_id,
            booking_id = %booking.id,
            date = %booking.date,
            time = %booking.time,
            price = %booking.price,
            "🔎 Inspection booked"
        );
        Ok(ApiResponse::success_with_message(
            booking,
            "Inspection booked".to_string(),
        ))
    }

    pub async fn bookings(&self, customer_id: Uuid) -> ApiResponse<Vec<InspectionBooking>> {
        ApiResponse::success(self.state.store.inspections.bookings_for(customer_id).await)
    }

    /// Informes de inspección que el equipo ya envió al cliente
    pub async fn reports(&self, customer_id: Uuid) -> ApiResponse<Vec<InspectionReport>> {
        ApiResponse::success(self.state.store.inspections.sent_to(customer_id).await)
    }
}
