use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::checkout_dto::{
    ApplyFinancingRequest, ApplyFinancingResponse, BookingRequest, CheckoutSummaryRequest,
    CheckoutSummaryResponse, FinancingOptionsResponse,
};
use crate::dto::common_dto::ApiResponse;
use crate::models::checkout::{Booking, CheckoutState, PaymentMethod, ServiceLocation};
use crate::models::quote::{Quote, QuoteStatus};
use crate::services::pricing_service::{
    fewest_interest_free_installments, financing_options, financing_plan, lowest_monthly,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Importe por defecto del simulador de financiación (AED)
pub const DEFAULT_FINANCING_AMOUNT: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);

pub struct CheckoutController {
    state: AppState,
}

impl CheckoutController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn summary(
        &self,
        customer_id: Uuid,
        request: CheckoutSummaryRequest,
    ) -> AppResult<ApiResponse<CheckoutSummaryResponse>> {
        let quote = self
            .selected_quote(customer_id, request.request_id, request.quote_id)
            .await?;
        let checkout = checkout_state(&quote, request.service_location, request.promo_code.as_deref())?;

        Ok(ApiResponse::success(CheckoutSummaryResponse {
            request_id: request.request_id,
            service_location: request.service_location,
            summary: checkout.summary(),
            quote,
        }))
    }

    /// Reserva tras la latencia simulada de procesamiento. La tarea queda
    /// registrada a nombre del cliente: cerrar sesión la cancela sin efectos.
    /// Una segunda reserva de la misma solicitud es `Conflict`.
    pub async fn book(
        &self,
        customer_id: Uuid,
        request: BookingRequest,
    ) -> AppResult<ApiResponse<Booking>> {
        let quote = self
            .selected_quote(customer_id, request.request_id, request.quote_id)
            .await?;
        if let Some(existing) = self.state.store.bookings.find_by_request(request.request_id).await {
            return Err(AppError::Conflict(format!(
                "Service request '{}' is already booked as {}",
                request.request_id, existing.reference
            )));
        }
        let checkout = checkout_state(&quote, request.service_location, request.promo_code.as_deref())?;
        let summary = checkout.summary();

        let pickup_address = request
            .pickup_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        if request.service_location == ServiceLocation::PickupDropoff && pickup_address.is_none() {
            return Err(validation_error(
                "pickup_address",
                "A pickup address is required for pickup & drop-off",
            ));
        }

        let financing_option_id = match request.payment_method {
            PaymentMethod::Financing => {
                let option_id = request.financing_option_id.clone().ok_or_else(|| {
                    validation_error("financing_option_id", "Choose a financing plan")
                })?;
                let approved = financing_options(summary.total)
                    .iter()
                    .any(|o| o.id == option_id && o.approved);
                if !approved {
                    return Err(validation_error(
                        "financing_option_id",
                        "Financing plan is not available",
                    ));
                }
                Some(option_id)
            }
            PaymentMethod::Card | PaymentMethod::Cash => None,
        };

        let booking = Booking {
            id: Uuid::new_v4(),
            reference: booking_reference(),
            customer_id,
            service_request_id: request.request_id,
            quote_id: quote.id,
            garage_name: quote.garage_name.clone(),
            summary,
            service_location: request.service_location,
            payment_method: request.payment_method,
            contact_preference: request.contact_preference,
            pickup_address,
            dropoff_address: request.dropoff_address,
            special_instructions: request.special_instructions,
            financing_option_id,
            created_at: Utc::now(),
        };

        let store = self.state.store.clone();
        let latency = self.state.config.simulated_latency();
        let handle = self
            .state
            .tasks
            .spawn(customer_id, booking.id, async move {
                tokio::time::sleep(latency).await;
                store.requests.book(&store.bookings, booking, Utc::now()).await
            })
            .await;

        let booking = match handle.await {
            Ok(result) => result?,
            Err(e) if e.is_cancelled() => {
                tracing::warn!(%customer_id, request_id = %request.request_id, "🛑 Booking cancelled before confirmation");
                return Err(AppError::Submission("Booking was cancelled".to_string()));
            }
            Err(e) => {
                return Err(AppError::Submission(format!("Booking processing failed: {}", e)));
            }
        };

        tracing::info!(
            %customer_id,
            booking = %booking.reference,
            total = %booking.summary.total,
            "📅 Booking confirmed"
        );
        Ok(ApiResponse::success_with_message(
            booking,
            "Booking confirmed".to_string(),
        ))
    }

    pub async fn bookings(&self, customer_id: Uuid) -> ApiResponse<Vec<Booking>> {
        ApiResponse::success(self.state.store.bookings.find_by_customer(customer_id).await)
    }

    pub fn financing_options(&self, amount: Option<Decimal>) -> AppResult<ApiResponse<FinancingOptionsResponse>> {
        let amount = amount.unwrap_or(DEFAULT_FINANCING_AMOUNT);
        if amount <= Decimal::ZERO {
            return Err(validation_error("amount", "Amount must be greater than zero"));
        }

        let options = financing_options(amount);
        Ok(ApiResponse::success(FinancingOptionsResponse {
            amount,
            lowest_monthly: lowest_monthly(&options),
            fewest_interest_free_installments: fewest_interest_free_installments(&options),
            options,
        }))
    }

    pub fn apply_financing(
        &self,
        customer_id: Uuid,
        request: ApplyFinancingRequest,
    ) -> AppResult<ApiResponse<ApplyFinancingResponse>> {
        let option = financing_options(request.amount)
            .into_iter()
            .find(|o| o.id == request.option_id)
            .ok_or_else(|| not_found_error("Financing option", &request.option_id))?;
        if !option.approved {
            return Err(AppError::Conflict(format!(
                "Financing option '{}' is not approved",
                option.id
            )));
        }

        let plan = financing_plan(option);
        tracing::info!(%customer_id, option = %plan.option.id, total_to_pay = %plan.total_to_pay, "💳 Financing plan applied");
        Ok(ApiResponse::success(plan))
    }

    /// Cotización `quote_id` de una solicitud del cliente, todavía reservable
    async fn selected_quote(&self, customer_id: Uuid, request_id: Uuid, quote_id: Uuid) -> AppResult<Quote> {
        let service_request = self.state.store.requests.find_by_id(request_id).await?;
        if service_request.customer_id != customer_id {
            return Err(not_found_error("Service request", &request_id.to_string()));
        }
        let quote = service_request
            .find_quote(quote_id)
            .cloned()
            .ok_or_else(|| not_found_error("Quote", &quote_id.to_string()))?;
        if quote.status == QuoteStatus::Rejected || quote.status == QuoteStatus::Expired {
            return Err(AppError::Conflict(format!("Quote '{}' is {:?}", quote_id, quote.status)));
        }
        Ok(quote)
    }
}

fn checkout_state(
    quote: &Quote,
    service_location: ServiceLocation,
    promo_code: Option<&str>,
) -> AppResult<CheckoutState> {
    let mut checkout = CheckoutState::new(quote.price, service_location);
    if let Some(code) = promo_code.map(str::trim).filter(|c| !c.is_empty()) {
        if !checkout.apply_promo(code) {
            tracing::warn!(code, "⚠️ Invalid promo code");
            return Err(validation_error("promo_code", "Invalid promo code"));
        }
    }
    Ok(checkout)
}

/// `RPR-` seguido de 6 caracteres alfanuméricos en mayúsculas
fn booking_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("RPR-{}", suffix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::database::seed::*;
    use crate::database::Store;
    use crate::models::checkout::ContactPreference;
    use crate::models::service_request::RequestStatus;

    fn controller() -> (AppState, CheckoutController) {
        let config = EnvironmentConfig {
            simulated_latency_ms: 0,
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(config, Store::seeded());
        let controller = CheckoutController::new(&state);
        (state, controller)
    }

    fn summary_request(promo_code: Option<&str>) -> CheckoutSummaryRequest {
        CheckoutSummaryRequest {
            request_id: ENGINE_REQUEST_ID,
            quote_id: AL_FUTTAIM_ENGINE_QUOTE_ID,
            service_location: ServiceLocation::PickupDropoff,
            promo_code: promo_code.map(str::to_string),
        }
    }

    fn booking_request(payment_method: PaymentMethod, financing_option_id: Option<&str>) -> BookingRequest {
        BookingRequest {
            request_id: ENGINE_REQUEST_ID,
            quote_id: AL_FUTTAIM_ENGINE_QUOTE_ID,
            service_location: ServiceLocation::PickupDropoff,
            promo_code: None,
            payment_method,
            contact_preference: ContactPreference::Whatsapp,
            special_instructions: None,
            pickup_address: Some("Dubai Marina, Tower 3".to_string()),
            dropoff_address: None,
            financing_option_id: financing_option_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_summary_for_al_futtaim_quote() {
        let (_, controller) = controller();

        let plain = controller.summary(AHMED_ID, summary_request(None)).await.unwrap().data.unwrap();
        let promo = controller
            .summary(AHMED_ID, summary_request(Some("SAVE10")))
            .await
            .unwrap()
            .data
            .unwrap();

        assert_eq!(plain.summary.total, Decimal::new(573, 0));
        assert_eq!(promo.summary.discount, Decimal::new(45, 0));
        assert_eq!(promo.summary.total, Decimal::new(528, 0));
    }

    #[tokio::test]
    async fn test_invalid_promo_is_a_field_error() {
        let (_, controller) = controller();
        let result = controller.summary(AHMED_ID, summary_request(Some("free50"))).await;
        match result {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("promo_code"))
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.data)),
        }
    }

    #[tokio::test]
    async fn test_summary_of_someone_elses_request_is_not_found() {
        let (_, controller) = controller();
        let result = controller.summary(SARA_ID, summary_request(None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_book_accepts_quote_and_stores_booking() {
        let (state, controller) = controller();

        let booking = controller
            .book(AHMED_ID, booking_request(PaymentMethod::Card, None))
            .await
            .unwrap()
            .data
            .unwrap();

        assert!(booking.reference.starts_with("RPR-"));
        assert_eq!(booking.reference.len(), 10);
        assert_eq!(booking.summary.total, Decimal::new(573, 0));
        let request = state.store.requests.find_by_id(ENGINE_REQUEST_ID).await.unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);
        assert_eq!(
            request.accepted_quote().map(|q| q.id),
            Some(AL_FUTTAIM_ENGINE_QUOTE_ID)
        );
        assert_eq!(state.store.bookings.find_by_customer(AHMED_ID).await.len(), 1);
    }

    #[tokio::test]
    async fn test_book_with_rejected_quote_conflicts() {
        let (_, controller) = controller();
        controller
            .book(AHMED_ID, booking_request(PaymentMethod::Cash, None))
            .await
            .unwrap();

        let mut other = booking_request(PaymentMethod::Cash, None);
        other.quote_id = QUICK_FIX_ENGINE_QUOTE_ID;
        let result = controller.book(AHMED_ID, other).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_pickup_requires_address() {
        let (_, controller) = controller();
        let mut request = booking_request(PaymentMethod::Card, None);
        request.pickup_address = Some("  ".to_string());
        let result = controller.book(AHMED_ID, request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_financing_payment_needs_approved_plan() {
        let (_, controller) = controller();
        let result = controller
            .book(AHMED_ID, booking_request(PaymentMethod::Financing, Some("postpay-4")))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let booking = controller
            .book(AHMED_ID, booking_request(PaymentMethod::Financing, Some("tabby-4")))
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(booking.financing_option_id.as_deref(), Some("tabby-4"));
    }

    #[tokio::test]
    async fn test_cancelled_booking_leaves_request_untouched() {
        let config = EnvironmentConfig {
            simulated_latency_ms: 5_000,
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(config, Store::seeded());
        let controller = CheckoutController::new(&state);

        let pending = tokio::spawn(async move {
            controller
                .book(AHMED_ID, booking_request(PaymentMethod::Card, None))
                .await
                .map(|r| r.data)
        });
        while state.tasks.pending_for(AHMED_ID).await == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(state.tasks.cancel_all(AHMED_ID).await.len(), 1);

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(AppError::Submission(_))));
        let request = state.store.requests.find_by_id(ENGINE_REQUEST_ID).await.unwrap();
        assert_eq!(request.status, RequestStatus::Quoted);
        assert!(state.store.bookings.find_by_customer(AHMED_ID).await.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_during_commit_leaves_no_partial_booking() {
        let config = EnvironmentConfig {
            simulated_latency_ms: 50,
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(config, Store::seeded());

        let booking_state = state.clone();
        let pending = tokio::spawn(async move {
            CheckoutController::new(&booking_state)
                .book(AHMED_ID, booking_request(PaymentMethod::Card, None))
                .await
                .map(|r| r.data)
        });
        while state.tasks.pending_for(AHMED_ID).await == 0 {
            tokio::task::yield_now().await;
        }
        // Tras la latencia la tarea entra al commit y espera el lock de reservas
        let bookings_lock = state.store.bookings.write().await;
        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
        assert_eq!(state.tasks.cancel_all(AHMED_ID).await.len(), 1);
        drop(bookings_lock);

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(AppError::Submission(_))));
        let request = state.store.requests.find_by_id(ENGINE_REQUEST_ID).await.unwrap();
        assert_eq!(request.status, RequestStatus::Quoted);
        assert!(request.quotes.iter().all(|q| q.status == QuoteStatus::Pending));
        assert!(state.store.bookings.find_by_customer(AHMED_ID).await.is_empty());
    }

    #[tokio::test]
    async fn test_second_booking_of_same_request_conflicts() {
        let (state, controller) = controller();
        controller
            .book(AHMED_ID, booking_request(PaymentMethod::Card, None))
            .await
            .unwrap();

        let result = controller
            .book(AHMED_ID, booking_request(PaymentMethod::Card, None))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(state.store.bookings.find_by_customer(AHMED_ID).await.len(), 1);
    }

    #[tokio::test]
    async fn test_booking_commit_refuses_duplicates() {
        let (state, controller) = controller();
        let first = controller
            .book(AHMED_ID, booking_request(PaymentMethod::Cash, None))
            .await
            .unwrap()
            .data
            .unwrap();

        let duplicate = Booking {
            id: Uuid::new_v4(),
            reference: booking_reference(),
            ..first
        };
        let result = state
            .store
            .requests
            .book(&state.store.bookings, duplicate, Utc::now())
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_financing_options_default_amount() {
        let (_, controller) = controller();
        let response = controller.financing_options(None).unwrap().data.unwrap();
        assert_eq!(response.amount, Decimal::new(1200, 0));
        assert_eq!(response.options.len(), 4);
        assert_eq!(response.lowest_monthly, Some(Decimal::new(200, 0)));
        assert_eq!(response.fewest_interest_free_installments, Some(3));
        assert!(controller.financing_options(Some(Decimal::ZERO)).is_err());
    }

    #[test]
    fn test_apply_financing() {
        let (_, controller) = controller();
        let plan = controller
            .apply_financing(
                AHMED_ID,
                ApplyFinancingRequest {
                    option_id: "tabby-6".to_string(),
                    amount: Decimal::new(1200, 0),
                },
            )
            .unwrap()
            .data
            .unwrap();
        assert_eq!(plan.interest, Decimal::new(30, 0));
        assert_eq!(plan.total_to_pay, Decimal::new(1230, 0));

        let declined = controller.apply_financing(
            AHMED_ID,
            ApplyFinancingRequest {
                option_id: "postpay-4".to_string(),
                amount: Decimal::new(1200, 0),
            },
        );
        assert!(matches!(declined, Err(AppError::Conflict(_))));

        let unknown = controller.apply_financing(
            AHMED_ID,
            ApplyFinancingRequest {
                option_id: "klarna-3".to_string(),
                amount: Decimal::new(1200, 0),
            },
        );
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
    }
}
