use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::garage::{Garage, GeoPoint, WorkingHours};
use crate::models::review::{GarageReview, RatingSummary};
use crate::services::garage_profile_service::GarageStats;
use crate::utils::validation::{validate_not_blank, validate_phone};

// Cambios parciales del perfil; los campos ausentes no se tocan
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGarageProfileRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub address: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Select at least one service"))]
    pub services: Option<Vec<String>>,
    #[validate(length(min = 1, message = "Select at least one specialization"))]
    pub specializations: Option<Vec<String>>,
    #[validate(range(min = 1, message = "Daily capacity must be at least 1"))]
    pub daily_capacity: Option<u32>,
    pub working_hours: Option<WorkingHours>,
    pub location: Option<GeoPoint>,
}

// Búsqueda de talleres desde la app del cliente
#[derive(Debug, Default, Deserialize)]
pub struct NearbyGarageQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl NearbyGarageQuery {
    pub fn origin(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}

// Perfil visto por el propio taller
#[derive(Debug, Serialize)]
pub struct GarageProfile {
    pub garage: Garage,
    pub stats: GarageStats,
    pub rating: RatingSummary,
}

// Tarjeta del listado de talleres
#[derive(Debug, Serialize)]
pub struct GarageSummary {
    pub garage: Garage,
    pub total_reviews: usize,
    pub distance_km: Option<f64>,
}

// Ficha del taller con sus reseñas
#[derive(Debug, Serialize)]
pub struct GarageDetails {
    pub garage: Garage,
    pub rating: RatingSummary,
    pub completed_jobs: usize,
    pub average_response_minutes: Option<i64>,
    pub distance_km: Option<f64>,
    pub reviews: Vec<GarageReview>,
}
