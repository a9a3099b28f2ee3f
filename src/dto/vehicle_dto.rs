use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_plate};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank")]
    pub make: String,
    #[validate(custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,
    #[validate(custom = "validate_plate")]
    pub plate: String,
}
