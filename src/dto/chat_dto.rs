use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(custom = "validate_not_blank")]
    pub message: String,
}
