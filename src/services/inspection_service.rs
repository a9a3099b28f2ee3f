//! Catálogo de inspecciones: modalidades, precios y franjas horarias

use rust_decimal::Decimal;

use crate::models::inspection::{InspectionMode, InspectionOption};

/// Franjas reservables (sin la hora de comer)
pub const INSPECTION_TIME_SLOTS: [&str; 8] = [
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00",
];

pub fn inspection_options() -> Vec<InspectionOption> {
    vec![
        InspectionOption {
            mode: InspectionMode::VisitMe,
            title: "Inspector Visits You",
            subtitle: "We come to your location",
            price: Decimal::new(200, 0),
            duration: "45-60 minutes",
            features: &[
                "Comprehensive inspection",
                "Digital report",
                "Photos included",
                "Same-day results",
            ],
        },
        InspectionOption {
            mode: InspectionMode::VisitLocation,
            title: "Visit Our Center",
            subtitle: "Bring your car to us",
            price: Decimal::new(150, 0),
            duration: "30-45 minutes",
            features: &[
                "Professional equipment",
                "Detailed analysis",
                "Immediate results",
                "Expert consultation",
            ],
        },
    ]
}

pub fn inspection_price(mode: InspectionMode) -> Decimal {
    match mode {
        InspectionMode::VisitMe => Decimal::new(200, 0),
        InspectionMode::VisitLocation => Decimal::new(150, 0),
    }
}

pub fn is_time_slot(time: &str) -> bool {
    INSPECTION_TIME_SLOTS.contains(&time.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_match_catalogue() {
        for option in inspection_options() {
            assert_eq!(option.price, inspection_price(option.mode));
            assert_eq!(option.features.len(), 4);
        }
    }

    #[test]
    fn test_lunch_hour_is_not_a_slot() {
        assert!(is_time_slot("09:00"));
        assert!(is_time_slot("17:00"));
        assert!(!is_time_slot("13:00"));
        assert!(!is_time_slot("18:00"));
    }
}
