use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::checkout::{CheckoutSummary, ContactPreference, PaymentMethod, ServiceLocation};
use crate::models::financing::{FinancingOption, FinancingPlan};
use crate::models::quote::Quote;
use crate::utils::validation::validate_positive_money;

// Request para calcular el resumen del checkout
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutSummaryRequest {
    pub request_id: Uuid,
    pub quote_id: Uuid,
    #[serde(default)]
    pub service_location: ServiceLocation,
    pub promo_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSummaryResponse {
    pub request_id: Uuid,
    pub quote: Quote,
    pub service_location: ServiceLocation,
    pub summary: CheckoutSummary,
}

// Request de reserva
#[derive(Debug, Deserialize, Validate)]
pub struct BookingRequest {
    pub request_id: Uuid,
    pub quote_id: Uuid,
    #[serde(default)]
    pub service_location: ServiceLocation,
    pub promo_code: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub contact_preference: ContactPreference,
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
    pub financing_option_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FinancingQuery {
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct FinancingOptionsResponse {
    pub amount: Decimal,
    pub options: Vec<FinancingOption>,
    pub lowest_monthly: Option<Decimal>,
    pub fewest_interest_free_installments: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyFinancingRequest {
    pub option_id: String,
    #[validate(custom = "validate_positive_money")]
    pub amount: Decimal,
}

pub type ApplyFinancingResponse = FinancingPlan;
