//! Programa de fidelidad: niveles, progreso y canje de recompensas

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::loyalty::{EarningRule, LoyaltyAccount, LoyaltyActivity, LoyaltyTier, Reward};
use crate::repositories::loyalty_repository::LoyaltyRepository;
use crate::utils::errors::{AppError, AppResult};

pub const EARNING_RULES: &[EarningRule] = &[
    EarningRule { action: "Complete a service", points: "100-200" },
    EarningRule { action: "Write a review", points: "50" },
    EarningRule { action: "Refer a friend", points: "200" },
    EarningRule { action: "Book a diagnosis", points: "75" },
];

/// Primer nivel (de mayor a menor) cuyo umbral alcanza `points`
pub fn tier_for(points: u32) -> LoyaltyTier {
    LoyaltyTier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| tier.min_points() <= points)
        .unwrap_or(LoyaltyTier::Bronze)
}

pub fn next_tier(tier: LoyaltyTier) -> Option<LoyaltyTier> {
    LoyaltyTier::ALL.iter().copied().find(|t| *t > tier)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProgress {
    pub tier: LoyaltyTier,
    pub next_tier: Option<LoyaltyTier>,
    pub points_to_next: Option<u32>,
    /// Porcentaje dentro de la franja del nivel actual; 100 en el último nivel
    pub progress_percent: f64,
}

pub fn tier_progress(points: u32) -> TierProgress {
    let tier = tier_for(points);
    match next_tier(tier) {
        Some(next) => {
            let band = (next.min_points() - tier.min_points()) as f64;
            let done = (points - tier.min_points()) as f64;
            TierProgress {
                tier,
                next_tier: Some(next),
                points_to_next: Some(next.min_points() - points),
                progress_percent: (done / band * 100.0).min(100.0),
            }
        }
        None => TierProgress {
            tier,
            next_tier: None,
            points_to_next: None,
            progress_percent: 100.0,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardView {
    #[serde(flatten)]
    pub reward: Reward,
    pub can_redeem: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoyaltyOverview {
    pub account: LoyaltyAccount,
    pub progress: TierProgress,
    pub rewards: Vec<RewardView>,
    pub earning_rules: &'static [EarningRule],
}

#[derive(Debug, Clone, Serialize)]
pub struct Redemption {
    pub reward: Reward,
    pub remaining_points: u32,
    pub progress: TierProgress,
}

#[derive(Clone)]
pub struct LoyaltyService {
    repository: LoyaltyRepository,
}

impl LoyaltyService {
    pub fn new(repository: LoyaltyRepository) -> Self {
        Self { repository }
    }

    pub async fn overview(&self, user_id: Uuid) -> LoyaltyOverview {
        let account = self.repository.account(user_id).await;
        let rewards = self
            .repository
            .rewards()
            .iter()
            .map(|reward| RewardView {
                can_redeem: reward.available && account.points >= reward.points,
                reward: reward.clone(),
            })
            .collect();

        LoyaltyOverview {
            progress: tier_progress(account.points),
            account,
            rewards,
            earning_rules: EARNING_RULES,
        }
    }

    /// Canjea una recompensa: descuenta puntos y registra la actividad
    pub async fn redeem(&self, user_id: Uuid, reward_id: &str, today: NaiveDate) -> AppResult<Redemption> {
        let reward = self.repository.find_reward(reward_id)?;
        if !reward.available {
            return Err(AppError::Conflict(format!(
                "Reward '{}' is not available",
                reward.title
            )));
        }

        let remaining = self
            .repository
            .update(user_id, |account| {
                if account.points < reward.points {
                    return Err(AppError::Conflict(format!(
                        "Not enough points: {} required, {} available",
                        reward.points, account.points
                    )));
                }
                account.points -= reward.points;
                account.activity.insert(
                    0,
                    LoyaltyActivity {
                        date: today,
                        action: "Reward Redeemed".to_string(),
                        points: -(reward.points as i64),
                        description: reward.title.clone(),
                    },
                );
                Ok(account.points)
            })
            .await?;

        tracing::info!(%user_id, reward = %reward.id, remaining, "🎁 Reward redeemed");

        Ok(Redemption {
            progress: tier_progress(remaining),
            remaining_points: remaining,
            reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let cases = [
            (0, LoyaltyTier::Bronze),
            (999, LoyaltyTier::Bronze),
            (1000, LoyaltyTier::Silver),
            (1999, LoyaltyTier::Silver),
            (2000, LoyaltyTier::Gold),
            (4999, LoyaltyTier::Gold),
            (5000, LoyaltyTier::Platinum),
        ];
        for (points, tier) in cases {
            assert_eq!(tier_for(points), tier, "points = {}", points);
        }
    }

    #[test]
    fn test_progress_within_band() {
        let progress = tier_progress(2450);
        assert_eq!(progress.tier, LoyaltyTier::Gold);
        assert_eq!(progress.next_tier, Some(LoyaltyTier::Platinum));
        assert_eq!(progress.points_to_next, Some(2550));
        assert!((progress.progress_percent - 15.0).abs() < 1e-9);

        let top = tier_progress(7000);
        assert_eq!(top.next_tier, None);
        assert_eq!(top.progress_percent, 100.0);
    }

    fn service() -> LoyaltyService {
        let reward = |id: &str, points, available| Reward {
            id: id.to_string(),
            title: format!("Reward {}", id),
            points,
            description: String::new(),
            available,
        };
        let user_id = Uuid::from_u128(1);
        LoyaltyService::new(LoyaltyRepository::new(
            vec![LoyaltyAccount {
                user_id,
                points: 2450,
                total_spent: Decimal::new(8500, 0),
                services_completed: 12,
                activity: vec![],
            }],
            vec![reward("1", 500, true), reward("4", 1000, false), reward("5", 3000, true)],
        ))
    }

    #[tokio::test]
    async fn test_redeem_deducts_and_retiers() {
        let loyalty = service();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let user = Uuid::from_u128(1);

        let redemption = loyalty.redeem(user, "1", today).await.unwrap();
        assert_eq!(redemption.remaining_points, 1950);
        assert_eq!(redemption.progress.tier, LoyaltyTier::Silver);

        let overview = loyalty.overview(user).await;
        assert_eq!(overview.account.activity[0].points, -500);
    }

    #[tokio::test]
    async fn test_redeem_rejections() {
        let loyalty = service();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let user = Uuid::from_u128(1);

        assert!(matches!(loyalty.redeem(user, "4", today).await, Err(AppError::Conflict(_))));
        assert!(matches!(loyalty.redeem(user, "5", today).await, Err(AppError::Conflict(_))));
        assert!(matches!(loyalty.redeem(user, "99", today).await, Err(AppError::NotFound(_))));
        assert_eq!(loyalty.overview(user).await.account.points, 2450);
    }

    #[tokio::test]
    async fn test_new_member_starts_at_bronze() {
        let overview = service().overview(Uuid::from_u128(42)).await;
        assert_eq!(overview.account.points, 0);
        assert_eq!(overview.progress.tier, LoyaltyTier::Bronze);
        assert!(overview.rewards.iter().all(|r| !r.can_redeem));
    }
}
