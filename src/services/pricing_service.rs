//! Cálculos de precios
//!
//! Funciones puras sobre `Decimal`. El redondeo a AED enteros es "mitad
//! lejos de cero", igual que `Math.round` para importes no negativos.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::checkout::{CheckoutSummary, ServiceLocation};
use crate::models::financing::{FinancingOption, FinancingPlan, FinancingProvider};

/// Recargo urgente sobre la mano de obra (20%)
const URGENT_SURCHARGE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
/// Comisión de plataforma (5%)
const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Descuento promocional (10%)
const PROMO_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

const PROMO_CODES: [&str; 2] = ["first10", "save10"];

pub fn round_aed(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `labor + parts (+ 20% de labor si es urgente)`
pub fn quote_total(labor_cost: Decimal, parts_cost: Decimal, urgent: bool) -> Decimal {
    let surcharge = if urgent {
        labor_cost * URGENT_SURCHARGE
    } else {
        Decimal::ZERO
    };
    labor_cost + parts_cost + surcharge
}

pub fn is_valid_promo(code: &str) -> bool {
    let code = code.trim().to_lowercase();
    PROMO_CODES.contains(&code.as_str())
}

pub fn platform_fee(subtotal: Decimal) -> Decimal {
    round_aed(subtotal * PLATFORM_FEE_RATE)
}

pub fn promo_discount(subtotal: Decimal) -> Decimal {
    round_aed(subtotal * PROMO_DISCOUNT_RATE)
}

pub fn checkout_summary(
    subtotal: Decimal,
    location: ServiceLocation,
    promo_applied: bool,
) -> CheckoutSummary {
    let pickup_fee = location.fee();
    let platform_fee = platform_fee(subtotal);
    let discount = if promo_applied {
        promo_discount(subtotal)
    } else {
        Decimal::ZERO
    };

    CheckoutSummary {
        subtotal,
        pickup_fee,
        platform_fee,
        discount,
        total: subtotal + pickup_fee + platform_fee - discount,
        promo_applied,
    }
}

/// Planes ofrecidos para un importe
pub fn financing_options(total_amount: Decimal) -> Vec<FinancingOption> {
    let option = |id: &str, provider, installments: u32, rate: Decimal, approved| FinancingOption {
        id: id.to_string(),
        provider,
        total_amount,
        installments,
        monthly_amount: total_amount / Decimal::from(installments),
        interest_rate: rate,
        approved,
    };

    vec![
        option("tabby-4", FinancingProvider::Tabby, 4, Decimal::ZERO, true),
        option("tabby-6", FinancingProvider::Tabby, 6, Decimal::new(25, 1), true),
        option("tamara-3", FinancingProvider::Tamara, 3, Decimal::ZERO, true),
        option("postpay-4", FinancingProvider::Postpay, 4, Decimal::new(15, 1), false),
    ]
}

/// Interés simple aplicado una sola vez
pub fn financing_plan(option: FinancingOption) -> FinancingPlan {
    let interest = option.total_amount * option.interest_rate / Decimal::ONE_HUNDRED;
    FinancingPlan {
        total_to_pay: option.total_amount + interest,
        interest,
        option,
    }
}

pub fn lowest_monthly(options: &[FinancingOption]) -> Option<Decimal> {
    options.iter().map(|o| o.monthly_amount).min()
}

/// Menor número de cuotas entre las opciones sin intereses
pub fn fewest_interest_free_installments(options: &[FinancingOption]) -> Option<u32> {
    options
        .iter()
        .filter(|o| o.interest_rate.is_zero())
        .map(|o| o.installments)
        .min()
}

/// Media de valoraciones; `None` si no hay ninguna
pub fn average_rating<I: IntoIterator<Item = u8>>(ratings: I) -> Option<f64> {
    let (sum, count) = ratings
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), r| (sum + r as u32, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

pub fn total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().sum()
}
