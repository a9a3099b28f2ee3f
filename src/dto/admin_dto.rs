use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::garage::{Garage, VerificationFilter};
use crate::models::user::UserRole;

#[derive(Debug, Default, Deserialize)]
pub struct UserSearchQuery {
    pub q: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GarageSearchQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub status: VerificationFilter,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub users_by_role: BTreeMap<&'static str, usize>,
    pub garages_verified: usize,
    pub garages_pending: usize,
    pub requests_by_status: BTreeMap<&'static str, usize>,
    pub warranties_issued: usize,
    pub inspection_reports: usize,
}

/// Panel del taller: solicitudes abiertas, trabajos propios e ingresos
#[derive(Debug, Serialize)]
pub struct GarageDashboard {
    pub garage: Garage,
    pub requests_by_status: BTreeMap<&'static str, usize>,
    /// Solicitudes abiertas que el taller aún no ha cotizado
    pub open_requests: usize,
    pub quotes_submitted: usize,
    pub active_jobs: usize,
    pub completed_jobs: usize,
    pub revenue: Decimal,
}
