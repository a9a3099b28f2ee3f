//! Modelo del programa de fidelidad

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    /// Ordenados por umbral ascendente
    pub const ALL: [LoyaltyTier; 4] = [
        LoyaltyTier::Bronze,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
    ];

    pub fn min_points(&self) -> u32 {
        match self {
            LoyaltyTier::Bronze => 0,
            LoyaltyTier::Silver => 1000,
            LoyaltyTier::Gold => 2000,
            LoyaltyTier::Platinum => 5000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Platinum => "Platinum",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub points: u32,
    pub description: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyActivity {
    pub date: NaiveDate,
    pub action: String,
    pub points: i64,
    pub description: String,
}

/// Forma de ganar puntos (solo lectura)
#[derive(Debug, Clone, Serialize)]
pub struct EarningRule {
    pub action: &'static str,
    pub points: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    pub user_id: Uuid,
    pub points: u32,
    pub total_spent: Decimal,
    pub services_completed: u32,
    pub activity: Vec<LoyaltyActivity>,
}
