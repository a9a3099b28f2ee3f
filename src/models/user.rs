//! Modelo de usuarios y roles
//!
//! El rol se decide una sola vez al iniciar sesión; ver `middleware::auth::Session`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Garage,
    Admin,
}

/// Pestaña de navegación de un rol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleTab {
    pub id: &'static str,
    pub label: &'static str,
}

const CUSTOMER_TABS: &[RoleTab] = &[
    RoleTab { id: "home", label: "Home" },
    RoleTab { id: "diagnosis", label: "Diagnosis" },
    RoleTab { id: "services", label: "Services" },
    RoleTab { id: "profile", label: "Profile" },
];

const GARAGE_TABS: &[RoleTab] = &[
    RoleTab { id: "dashboard", label: "Dashboard" },
    RoleTab { id: "requests", label: "Requests" },
    RoleTab { id: "profile", label: "Profile" },
];

const ADMIN_TABS: &[RoleTab] = &[
    RoleTab { id: "dashboard", label: "Dashboard" },
    RoleTab { id: "users", label: "Users" },
    RoleTab { id: "garages", label: "Garages" },
    RoleTab { id: "reports", label: "Reports" },
];

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Garage => "garage",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(UserRole::Customer),
            "garage" => Some(UserRole::Garage),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Barra de pestañas que el cliente debe mostrar para este rol
    pub fn tabs(&self) -> &'static [RoleTab] {
        match self {
            UserRole::Customer => CUSTOMER_TABS,
            UserRole::Garage => GARAGE_TABS,
            UserRole::Admin => ADMIN_TABS,
        }
    }
}

/// Usuario registrado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: UserRole,
    /// Solo para usuarios de taller
    pub garage_id: Option<Uuid>,
    /// Solo para administradores
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}
