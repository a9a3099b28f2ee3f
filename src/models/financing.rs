//! Modelo de financiación a plazos

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingProvider {
    Tabby,
    Tamara,
    Postpay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingOption {
    pub id: String,
    pub provider: FinancingProvider,
    pub total_amount: Decimal,
    pub installments: u32,
    /// total_amount / installments (sin intereses)
    pub monthly_amount: Decimal,
    /// Porcentaje simple aplicado una vez
    pub interest_rate: Decimal,
    pub approved: bool,
}

/// Plan resultante de solicitar una opción
#[derive(Debug, Clone, Serialize)]
pub struct FinancingPlan {
    pub option: FinancingOption,
    pub interest: Decimal,
    pub total_to_pay: Decimal,
}
