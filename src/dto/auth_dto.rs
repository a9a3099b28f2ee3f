use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::auth::Session;
use crate::models::garage::{GeoPoint, WorkingHours};
use crate::models::user::{AuthUser, RoleTab, UserRole};
use crate::utils::validation::{validate_not_blank, validate_otp, validate_phone};

// Datos de taller en el alta
#[derive(Debug, Deserialize, Validate)]
pub struct GarageSignup {
    #[validate(custom = "validate_not_blank")]
    pub garage_name: String,
    #[validate(custom = "validate_not_blank")]
    pub owner_name: String,
    #[validate(custom = "validate_not_blank")]
    pub address: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Select at least one specialization"))]
    pub specializations: Vec<String>,
    #[validate(length(min = 1, message = "Select at least one service"))]
    pub services: Vec<String>,
    #[validate(range(min = 1, message = "Daily capacity must be at least 1"))]
    pub daily_capacity: u32,
    pub working_hours: Option<WorkingHours>,
    pub location: Option<GeoPoint>,
}

// Alta por teléfono + OTP
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    pub role: UserRole,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(custom = "validate_otp")]
    pub otp: String,
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate]
    pub garage: Option<GarageSignup>,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(custom = "validate_otp")]
    pub otp: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: AuthUser,
    pub tabs: &'static [RoleTab],
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Session,
    pub tabs: &'static [RoleTab],
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub cancelled_tasks: usize,
}
