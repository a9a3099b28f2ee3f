use chrono::Utc;
use uuid::Uuid;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, LogoutResponse, SessionResponse, SignupRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::Session;
use crate::models::garage::{Garage, WorkingHours};
use crate::models::user::{AuthUser, UserRole};
use crate::state::AppState;
use crate::utils::errors::{conflict_error, forbidden_error, not_found_error, validation_error, AppResult};
use crate::utils::validation::{normalize_phone, validate_not_blank, FieldErrors};

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Alta de cliente o taller. Los talleres nacen sin verificar.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<ApiResponse<AuthResponse>> {
        let phone = normalize_phone(&request.phone);
        let user_id = Uuid::new_v4();
        if self.state.store.users.find_by_phone(&phone).await.is_some() {
            return Err(conflict_error("User", "phone", &phone));
        }

        let (name, garage_id) = match request.role {
            UserRole::Customer => {
                let name = request.name.unwrap_or_default();
                let mut errors = FieldErrors::new();
                errors.check("name", validate_not_blank(&name));
                errors.into_result()?;
                (name.trim().to_string(), None)
            }
            UserRole::Garage => {
                let garage = request
                    .garage
                    .ok_or_else(|| validation_error("garage", "Garage details are required"))?;
                let garage = Garage {
                    id: Uuid::new_v4(),
                    name: garage.garage_name.trim().to_string(),
                    owner_name: garage.owner_name.trim().to_string(),
                    address: garage.address.trim().to_string(),
                    phone: phone.clone(),
                    email: garage.email.clone(),
                    rating: 0.0,
                    services: garage.services,
                    specializations: garage.specializations,
                    daily_capacity: garage.daily_capacity,
                    working_hours: garage.working_hours.unwrap_or_else(|| WorkingHours {
                        open: "08:00".to_string(),
                        close: "18:00".to_string(),
                        days: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                            .iter()
                            .map(|d| d.to_string())
                            .collect(),
                    }),
                    location: garage.location,
                    verified: false,
                    owner_id: user_id,
                };
                let garage = self.state.store.garages.create(garage).await;
                tracing::info!(garage_id = %garage.id, "🏪 Garage registered, pending verification");
                (garage.name, Some(garage.id))
            }
            UserRole::Admin => {
                return Err(forbidden_error("sign up", "admin accounts are provisioned internally"));
            }
        };

        let created = self
            .state
            .store
            .users
            .create(AuthUser {
                id: user_id,
                name,
                phone,
                email: request.email,
                role: request.role,
                garage_id,
                permissions: Vec::new(),
                created_at: Utc::now(),
            })
            .await;
        let user = match created {
            Ok(user) => user,
            Err(e) => {
                // alta concurrente con el mismo teléfono: no dejar el taller huérfano
                if let Some(garage_id) = garage_id {
                    self.state.store.garages.reject(garage_id).await.ok();
                }
                return Err(e);
            }
        };

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "👤 User signed up");
        let response = self.issue(user)?;
        Ok(ApiResponse::success_with_message(
            response,
            "Account created successfully".to_string(),
        ))
    }

    /// Login por teléfono. El OTP solo se comprueba en formato.
    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<AuthResponse>> {
        let phone = normalize_phone(&request.phone);
        let user = self
            .state
            .store
            .users
            .find_by_phone(&phone)
            .await
            .ok_or_else(|| not_found_error("User", &phone))?;

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "🔐 User logged in");
        Ok(ApiResponse::success(self.issue(user)?))
    }

    /// Cierra la sesión cancelando las tareas pendientes del usuario
    pub async fn logout(&self, session: &Session) -> AppResult<ApiResponse<LogoutResponse>> {
        let owner = session.user_id();
        let cancelled = self.state.tasks.cancel_all(owner).await;
        let diagnostics = self.state.diagnostics.mark_all_cancelled(&cancelled).await;

        tracing::info!(
            user_id = %owner,
            cancelled = cancelled.len(),
            diagnostics,
            "👋 User logged out"
        );
        Ok(ApiResponse::success(LogoutResponse {
            cancelled_tasks: cancelled.len(),
        }))
    }

    pub fn session(&self, session: Session) -> ApiResponse<SessionResponse> {
        ApiResponse::success(SessionResponse {
            tabs: session.tabs(),
            session,
        })
    }

    fn issue(&self, user: AuthUser) -> AppResult<AuthResponse> {
        let token = self.state.jwt.generate_access_token(&user)?;
        Ok(AuthResponse {
            token,
            expires_in: self.state.jwt.expires_in(),
            tabs: user.role.tabs(),
            user,
        })
    }
}
