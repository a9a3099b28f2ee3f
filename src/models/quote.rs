//! Modelo de Quote
//!
//! Oferta con precio de un taller sobre una solicitud de servicio.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub garage_id: Uuid,
    pub garage_name: String,
    pub rating: f64,
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,
    pub urgent: bool,
    /// labor + parts + recargo urgente
    pub price: Decimal,
    pub estimated_time: String,
    pub description: String,
    pub notes: Option<String>,
    pub distance_km: Option<f64>,
    pub valid_until: DateTime<Utc>,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == QuoteStatus::Expired || now > self.valid_until
    }
}
