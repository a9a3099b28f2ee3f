//! Reseñas de talleres

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub text: String,
    pub date: NaiveDate,
}

/// Reseña de un cliente sobre un servicio del taller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarageReview {
    pub id: Uuid,
    pub garage_id: Uuid,
    pub customer_name: String,
    /// 1 a 5 estrellas
    pub rating: u8,
    pub date: NaiveDate,
    pub service: String,
    pub comment: String,
    pub helpful: u32,
    pub response: Option<ReviewResponse>,
}

/// Media y reparto de estrellas, de 5 a 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub total_reviews: usize,
    pub distribution: [usize; 5],
}
