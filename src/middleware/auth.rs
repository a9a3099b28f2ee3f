//! Middleware de autenticación JWT
//!
//! El token se decodifica una sola vez en `Session`, una variante por rol.
//! Los handlers trabajan con la variante, no comparan cadenas de rol.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use serde::Serialize;
use uuid::Uuid;

use crate::models::user::{RoleTab, UserRole};
use crate::services::jwt_service::JwtClaims;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError, AppResult};

/// Sesión autenticada inyectada en las requests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Session {
    Customer {
        user_id: Uuid,
        name: String,
    },
    Garage {
        user_id: Uuid,
        garage_id: Uuid,
        name: String,
    },
    Admin {
        user_id: Uuid,
        name: String,
        permissions: Vec<String>,
    },
}

impl Session {
    pub fn from_claims(claims: JwtClaims) -> AppResult<Self> {
        match claims.role {
            UserRole::Customer => Ok(Session::Customer {
                user_id: claims.sub,
                name: claims.name,
            }),
            UserRole::Garage => {
                let garage_id = claims.garage_id.ok_or_else(|| {
                    AppError::Unauthorized("Garage token without garage id".to_string())
                })?;
                Ok(Session::Garage {
                    user_id: claims.sub,
                    garage_id,
                    name: claims.name,
                })
            }
            UserRole::Admin => Ok(Session::Admin {
                user_id: claims.sub,
                name: claims.name,
                permissions: claims.permissions,
            }),
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            Session::Customer { user_id, .. }
            | Session::Garage { user_id, .. }
            | Session::Admin { user_id, .. } => *user_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Session::Customer { name, .. }
            | Session::Garage { name, .. }
            | Session::Admin { name, .. } => name,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Session::Customer { .. } => UserRole::Customer,
            Session::Garage { .. } => UserRole::Garage,
            Session::Admin { .. } => UserRole::Admin,
        }
    }

    pub fn tabs(&self) -> &'static [RoleTab] {
        self.role().tabs()
    }

    /// Id del cliente, o `Forbidden` para otros roles
    pub fn customer_id(&self) -> AppResult<Uuid> {
        match self {
            Session::Customer { user_id, .. } => Ok(*user_id),
            _ => Err(forbidden_error("access customer resources", "customer role required")),
        }
    }

    /// `(user_id, garage_id)`, o `Forbidden` para otros roles
    pub fn garage(&self) -> AppResult<(Uuid, Uuid)> {
        match self {
            Session::Garage {
                user_id, garage_id, ..
            } => Ok((*user_id, *garage_id)),
            _ => Err(forbidden_error("access garage resources", "garage role required")),
        }
    }

    pub fn admin_id(&self) -> AppResult<Uuid> {
        match self {
            Session::Admin { user_id, .. } => Ok(*user_id),
            _ => Err(forbidden_error("access admin resources", "admin role required")),
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    let session = Session::from_claims(claims)?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Solo clientes
pub async fn customer_only_middleware(
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    session.customer_id()?;
    Ok(next.run(request).await)
}

/// Solo talleres
pub async fn garage_only_middleware(
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    session.garage()?;
    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    session.admin_id()?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole, garage_id: Option<Uuid>) -> JwtClaims {
        JwtClaims {
            sub: Uuid::from_u128(7),
            name: "Sara Mohammed".to_string(),
            role,
            garage_id,
            permissions: vec![],
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_session_variant_follows_role() {
        let customer = Session::from_claims(claims(UserRole::Customer, None)).unwrap();
        assert_eq!(customer.customer_id().unwrap(), Uuid::from_u128(7));
        assert!(customer.garage().is_err());
        assert_eq!(customer.tabs().len(), 4);

        let garage_id = Uuid::from_u128(101);
        let garage = Session::from_claims(claims(UserRole::Garage, Some(garage_id))).unwrap();
        assert_eq!(garage.garage().unwrap().1, garage_id);
        assert!(matches!(garage.admin_id(), Err(AppError::Forbidden(_))));
        assert_eq!(garage.tabs()[1].id, "requests");
    }

    #[test]
    fn test_garage_claims_need_garage_id() {
        assert!(matches!(
            Session::from_claims(claims(UserRole::Garage, None)),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_session_serializes_with_role_tag() {
        let session = Session::from_claims(claims(UserRole::Customer, None)).unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["name"], "Sara Mohammed");
    }
}
