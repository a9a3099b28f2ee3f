//! Modelo de checkout y reservas

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::pricing_service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceLocation {
    #[default]
    PickupDropoff,
    RepyrFacility,
    SelectedGarage,
}

impl ServiceLocation {
    pub fn fee(&self) -> Decimal {
        match self {
            ServiceLocation::PickupDropoff => Decimal::new(100, 0),
            ServiceLocation::RepyrFacility | ServiceLocation::SelectedGarage => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    Financing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    Call,
    #[default]
    Whatsapp,
    Sms,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub pickup_fee: Decimal,
    pub platform_fee: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub promo_applied: bool,
}

/// Estado del carrito para una cotización seleccionada
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutState {
    pub subtotal: Decimal,
    pub service_location: ServiceLocation,
    pub promo_applied: bool,
}

impl CheckoutState {
    pub fn new(subtotal: Decimal, service_location: ServiceLocation) -> Self {
        Self {
            subtotal,
            service_location,
            promo_applied: false,
        }
    }

    /// Aplica un código promocional. Repetirlo no acumula descuentos.
    pub fn apply_promo(&mut self, code: &str) -> bool {
        if pricing_service::is_valid_promo(code) {
            self.promo_applied = true;
            true
        } else {
            false
        }
    }

    pub fn summary(&self) -> CheckoutSummary {
        pricing_service::checkout_summary(self.subtotal, self.service_location, self.promo_applied)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub customer_id: Uuid,
    pub service_request_id: Uuid,
    pub quote_id: Uuid,
    pub garage_name: String,
    pub summary: CheckoutSummary,
    pub service_location: ServiceLocation,
    pub payment_method: PaymentMethod,
    pub contact_preference: ContactPreference,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
    pub special_instructions: Option<String>,
    pub financing_option_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_is_idempotent() {
        let mut state = CheckoutState::new(Decimal::new(450, 0), ServiceLocation::PickupDropoff);
        assert_eq!(state.summary().total, Decimal::new(573, 0));

        assert!(state.apply_promo("SAVE10"));
        let once = state.summary();
        assert!(state.apply_promo("first10"));
        assert_eq!(state.summary(), once);
        assert_eq!(once.discount, Decimal::new(45, 0));
        assert_eq!(once.total, Decimal::new(528, 0));
    }

    #[test]
    fn test_invalid_promo_keeps_state() {
        let mut state = CheckoutState::new(Decimal::new(450, 0), ServiceLocation::SelectedGarage);
        assert!(!state.apply_promo("HALFOFF"));
        let summary = state.summary();
        assert!(!summary.promo_applied);
        assert_eq!(summary.pickup_fee, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::new(473, 0));
    }
}
