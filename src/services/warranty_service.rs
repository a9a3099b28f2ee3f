//! Seguimiento de garantías
//!
//! El estado se deriva de la fecha de fin frente a `today`:
//! `< 0` días caducada, `< 30` días por caducar, resto activa.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::warranty::{ClaimStatus, Warranty, WarrantyClaim, WarrantyStatus, WarrantyType};
use crate::repositories::warranty_repository::WarrantyRepository;
use crate::utils::errors::{AppError, AppResult};

pub const EXPIRING_WINDOW_DAYS: i64 = 30;

pub fn warranty_status(end_date: NaiveDate, today: NaiveDate) -> WarrantyStatus {
    let days = (end_date - today).num_days();
    if days < 0 {
        WarrantyStatus::Expired
    } else if days < EXPIRING_WINDOW_DAYS {
        WarrantyStatus::Expiring
    } else {
        WarrantyStatus::Active
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WarrantyView {
    #[serde(flatten)]
    pub warranty: Warranty,
    pub status: WarrantyStatus,
    pub days_remaining: i64,
}

impl WarrantyView {
    pub fn at(warranty: Warranty, today: NaiveDate) -> Self {
        Self {
            status: warranty_status(warranty.end_date, today),
            days_remaining: (warranty.end_date - today).num_days(),
            warranty,
        }
    }
}

/// Reclamación con el contexto de su garantía
#[derive(Debug, Clone, Serialize)]
pub struct ClaimView {
    pub warranty_id: Uuid,
    pub provider: String,
    pub warranty_type: WarrantyType,
    #[serde(flatten)]
    pub claim: WarrantyClaim,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarrantyOverview {
    pub active: Vec<WarrantyView>,
    pub expired: Vec<WarrantyView>,
    pub claims: Vec<ClaimView>,
}

/// Separa activas (incluidas las que caducan pronto) de caducadas
pub fn split(warranties: Vec<Warranty>, today: NaiveDate) -> WarrantyOverview {
    let claims = flatten_claims(&warranties);
    let (expired, active): (Vec<_>, Vec<_>) = warranties
        .into_iter()
        .map(|w| WarrantyView::at(w, today))
        .partition(|v| v.status == WarrantyStatus::Expired);

    WarrantyOverview {
        active,
        expired,
        claims,
    }
}

/// Reclamaciones de todas las garantías, las más recientes primero
pub fn flatten_claims(warranties: &[Warranty]) -> Vec<ClaimView> {
    let mut claims: Vec<ClaimView> = warranties
        .iter()
        .flat_map(|w| {
            w.claim_history.iter().map(move |claim| ClaimView {
                warranty_id: w.id,
                provider: w.provider.clone(),
                warranty_type: w.warranty_type,
                claim: claim.clone(),
            })
        })
        .collect();
    claims.sort_by(|a, b| b.claim.date.cmp(&a.claim.date));
    claims
}

#[derive(Clone)]
pub struct WarrantyService {
    repository: WarrantyRepository,
}

impl WarrantyService {
    pub fn new(repository: WarrantyRepository) -> Self {
        Self { repository }
    }

    pub async fn overview(&self, customer_id: Uuid, today: NaiveDate) -> WarrantyOverview {
        split(self.repository.find_by_customer(customer_id).await, today)
    }

    pub async fn get(&self, customer_id: Uuid, id: Uuid, today: NaiveDate) -> AppResult<WarrantyView> {
        let warranty = self.repository.find_owned(customer_id, id).await?;
        Ok(WarrantyView::at(warranty, today))
    }

    /// Abre una reclamación `pending` sobre una garantía no caducada
    pub async fn file_claim(
        &self,
        customer_id: Uuid,
        warranty_id: Uuid,
        description: String,
        amount: Decimal,
        today: NaiveDate,
    ) -> AppResult<WarrantyClaim> {
        self.repository.find_owned(customer_id, warranty_id).await?;

        let claim = self
            .repository
            .update(warranty_id, |warranty| {
                if warranty_status(warranty.end_date, today) == WarrantyStatus::Expired {
                    return Err(AppError::Conflict(format!(
                        "Warranty from '{}' expired on {}",
                        warranty.provider, warranty.end_date
                    )));
                }
                let claim = WarrantyClaim {
                    id: Uuid::new_v4(),
                    date: today,
                    description,
                    status: ClaimStatus::Pending,
                    amount,
                };
                warranty.claim_history.push(claim.clone());
                Ok(claim)
            })
            .await?;

        tracing::info!(%warranty_id, claim_id = %claim.id, "📄 Warranty claim filed");
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn warranty(end_in_days: i64) -> Warranty {
        Warranty {
            id: Uuid::new_v4(),
            customer_id: Uuid::from_u128(1),
            vehicle_id: None,
            service_request_id: None,
            warranty_type: WarrantyType::Service,
            coverage: None,
            provider: "Premium Auto Care".to_string(),
            start_date: today() - Duration::days(365),
            end_date: today() + Duration::days(end_in_days),
            coverage_details: "Regular maintenance".to_string(),
            document: None,
            claim_history: vec![],
        }
    }

    #[test]
    fn test_expiring_boundary() {
        let t = today();
        assert_eq!(warranty_status(t + Duration::days(29), t), WarrantyStatus::Expiring);
        assert_eq!(warranty_status(t + Duration::days(30), t), WarrantyStatus::Active);
        assert_eq!(warranty_status(t + Duration::days(31), t), WarrantyStatus::Active);
        assert_eq!(warranty_status(t, t), WarrantyStatus::Expiring);
        assert_eq!(warranty_status(t - Duration::days(1), t), WarrantyStatus::Expired);
    }

    #[test]
    fn test_split_keeps_expiring_with_active() {
        let overview = split(vec![warranty(400), warranty(10), warranty(-5)], today());
        assert_eq!(overview.active.len(), 2);
        assert_eq!(overview.expired.len(), 1);
        assert!(overview
            .active
            .iter()
            .any(|v| v.status == WarrantyStatus::Expiring));
    }

    #[tokio::test]
    async fn test_claim_on_expired_warranty_is_rejected() {
        let live = warranty(100);
        let dead = warranty(-1);
        let customer = live.customer_id;
        let service = WarrantyService::new(WarrantyRepository::new(vec![live.clone(), dead.clone()]));

        let claim = service
            .file_claim(customer, live.id, "Brake noise".into(), Decimal::new(200, 0), today())
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);

        let rejected = service
            .file_claim(customer, dead.id, "Too late".into(), Decimal::ZERO, today())
            .await;
        assert!(matches!(rejected, Err(AppError::Conflict(_))));

        let overview = service.overview(customer, today()).await;
        assert_eq!(overview.claims.len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_warranty_is_not_found() {
        let w = warranty(100);
        let service = WarrantyService::new(WarrantyRepository::new(vec![w.clone()]));
        let result = service
            .file_claim(Uuid::from_u128(99), w.id, "x".into(), Decimal::ZERO, today())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
