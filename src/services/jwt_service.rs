use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::user::{AuthUser, UserRole};
use crate::utils::errors::AppError;

/// Claims del token de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    pub name: String,
    pub role: UserRole,
    pub garage_id: Option<Uuid>,
    pub permissions: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Servicio JWT
pub struct JwtService {
    algorithm: Algorithm,
    token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            token_duration: Duration::seconds(config.jwt_expiration as i64),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
        }
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user.id,
            name: user.name.clone(),
            role: user.role,
            garage_id: user.garage_id,
            permissions: user.permissions.clone(),
            exp: (now + self.token_duration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating access token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    pub fn expires_in(&self) -> i64 {
        self.token_duration.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            name: "Al Futtaim Motors".to_string(),
            phone: "+97142345678".to_string(),
            email: None,
            role,
            garage_id: Some(Uuid::new_v4()),
            permissions: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new(&EnvironmentConfig::default());
        let garage = user(UserRole::Garage);

        let token = jwt_service.generate_access_token(&garage).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, garage.id);
        assert_eq!(claims.role, UserRole::Garage);
        assert_eq!(claims.garage_id, garage.garage_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtService::new(&EnvironmentConfig::default());
        let other = JwtService::new(&EnvironmentConfig {
            jwt_secret: "another-secret".to_string(),
            ..EnvironmentConfig::default()
        });

        let token = issuer.generate_access_token(&user(UserRole::Customer)).unwrap();
        assert!(matches!(other.validate_token(&token), Err(AppError::Unauthorized(_))));
        assert!(issuer.validate_token("not-a-token").is_err());
    }
}
