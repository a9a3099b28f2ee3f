use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::Table;
use crate::models::loyalty::{LoyaltyAccount, Reward};
use crate::utils::errors::{not_found_error, AppResult};

/// Cuentas de puntos por usuario y catálogo de recompensas
#[derive(Clone, Default)]
pub struct LoyaltyRepository {
    accounts: Table<LoyaltyAccount>,
    rewards: Arc<Vec<Reward>>,
}

impl LoyaltyRepository {
    pub fn new(accounts: Vec<LoyaltyAccount>, rewards: Vec<Reward>) -> Self {
        Self {
            accounts: Table::from_rows(accounts.into_iter().map(|a| (a.user_id, a)).collect()),
            rewards: Arc::new(rewards),
        }
    }

    /// Cuenta del usuario; se abre a cero la primera vez
    pub async fn account(&self, user_id: Uuid) -> LoyaltyAccount {
        let mut accounts = self.accounts.write().await;
        accounts
            .entry(user_id)
            .or_insert_with(|| LoyaltyAccount {
                user_id,
                points: 0,
                total_spent: Decimal::ZERO,
                services_completed: 0,
                activity: Vec::new(),
            })
            .clone()
    }

    pub async fn update<R, F>(&self, user_id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut LoyaltyAccount) -> AppResult<R>,
    {
        // garantiza que la cuenta exista antes de modificarla
        self.account(user_id).await;
        self.accounts.update(user_id, "Loyalty account", f).await
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn find_reward(&self, reward_id: &str) -> AppResult<Reward> {
        self.rewards
            .iter()
            .find(|r| r.id == reward_id)
            .cloned()
            .ok_or_else(|| not_found_error("Reward", reward_id))
    }
}
