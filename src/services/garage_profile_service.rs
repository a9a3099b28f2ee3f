//! Perfil de taller: valoraciones, estadísticas y distancia al cliente

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::garage::GeoPoint;
use crate::models::quote::QuoteStatus;
use crate::models::review::{GarageReview, RatingSummary};
use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::services::pricing_service::{average_rating, total};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Cifras del taller calculadas a partir de las solicitudes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarageStats {
    pub completed_jobs: usize,
    pub monthly_revenue: Decimal,
    pub active_customers: usize,
    pub average_response_minutes: Option<i64>,
}

pub fn rating_summary(reviews: &[GarageReview]) -> RatingSummary {
    let mut distribution = [0usize; 5];
    for review in reviews {
        if (1..=5).contains(&review.rating) {
            distribution[5 - review.rating as usize] += 1;
        }
    }
    RatingSummary {
        average: average_rating(reviews.iter().map(|r| r.rating)).map(round_one),
        total_reviews: reviews.len(),
        distribution,
    }
}

/// Trabajos cerrados, ingresos del mes de `today`, clientes con un trabajo
/// aceptado y tiempo medio entre la solicitud y la cotización del taller.
pub fn garage_stats(garage_id: Uuid, requests: &[ServiceRequest], today: NaiveDate) -> GarageStats {
    let closed: Vec<_> = requests
        .iter()
        .filter_map(|r| r.completion.as_ref())
        .filter(|c| c.garage_id == garage_id)
        .collect();
    let monthly_revenue = total(
        closed
            .iter()
            .filter(|c| {
                let day = c.completed_at.date_naive();
                day.year() == today.year() && day.month() == today.month()
            })
            .map(|c| c.total_cost),
    );

    let active_customers: HashSet<Uuid> = requests
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                RequestStatus::Accepted | RequestStatus::InProgress | RequestStatus::Completed
            ) && r
                .quotes
                .iter()
                .any(|q| q.garage_id == garage_id && q.status == QuoteStatus::Accepted)
        })
        .map(|r| r.customer_id)
        .collect();

    let response_minutes: Vec<i64> = requests
        .iter()
        .flat_map(|r| {
            r.quotes
                .iter()
                .filter(|q| q.garage_id == garage_id)
                .map(move |q| (q.created_at - r.created_at).num_minutes().max(0))
        })
        .collect();
    let average_response_minutes = if response_minutes.is_empty() {
        None
    } else {
        Some(response_minutes.iter().sum::<i64>() / response_minutes.len() as i64)
    };

    GarageStats {
        completed_jobs: closed.len(),
        monthly_revenue,
        active_customers: active_customers.len(),
        average_response_minutes,
    }
}

/// Distancia en línea recta (haversine), en km con un decimal
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lat2) = (from.lat.to_radians(), to.lat.to_radians());
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    round_one(2.0 * EARTH_RADIUS_KM * a.sqrt().asin())
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::*;
    use crate::models::completion::CompletionRecord;
    use chrono::{TimeZone, Utc};

    fn review(rating: u8) -> GarageReview {
        GarageReview {
            id: Uuid::new_v4(),
            garage_id: AL_FUTTAIM_ID,
            customer_name: "Test".to_string(),
            rating,
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            service: "Oil Change".to_string(),
            comment: "Fine".to_string(),
            helpful: 0,
            response: None,
        }
    }

    #[test]
    fn test_rating_summary() {
        let summary = rating_summary(&[review(5), review(5), review(4), review(5), review(4)]);
        assert_eq!(summary.average, Some(4.6));
        assert_eq!(summary.total_reviews, 5);
        assert_eq!(summary.distribution, [3, 2, 0, 0, 0]);

        let empty = rating_summary(&[]);
        assert_eq!(empty.average, None);
        assert_eq!(empty.distribution, [0; 5]);
    }

    #[tokio::test]
    async fn test_stats_from_seeded_requests() {
        let requests = fixtures().requests.all().await;
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();

        let stats = garage_stats(AL_FUTTAIM_ID, &requests, today);
        assert_eq!(stats.completed_jobs, 0);
        assert_eq!(stats.monthly_revenue, Decimal::ZERO);
        assert_eq!(stats.active_customers, 1);
        // 19 h, 3 h y 3 h
        assert_eq!(stats.average_response_minutes, Some(500));

        let idle = garage_stats(DUBAI_AUTO_CARE_ID, &requests, today);
        assert_eq!(idle.average_response_minutes, None);
        assert_eq!(idle.active_customers, 0);
    }

    #[tokio::test]
    async fn test_revenue_counts_only_current_month() {
        let mut requests = fixtures().requests.all().await;
        let brake = requests.iter_mut().find(|r| r.id == BRAKE_REQUEST_ID).unwrap();
        brake.status = RequestStatus::Completed;
        brake.completion = Some(CompletionRecord {
            id: Uuid::new_v4(),
            service_request_id: BRAKE_REQUEST_ID,
            garage_id: AL_FUTTAIM_ID,
            work_performed: "Pads and discs".to_string(),
            parts_used: None,
            labor_hours: Decimal::new(2, 0),
            total_cost: Decimal::new(450, 0),
            customer_notes: None,
            photos: Vec::new(),
            completed_at: Utc.with_ymd_and_hms(2024, 2, 14, 15, 0, 0).unwrap(),
        });

        let february = garage_stats(AL_FUTTAIM_ID, &requests, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(february.completed_jobs, 1);
        assert_eq!(february.monthly_revenue, Decimal::new(450, 0));
        assert_eq!(february.active_customers, 1);

        let march = garage_stats(AL_FUTTAIM_ID, &requests, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(march.completed_jobs, 1);
        assert_eq!(march.monthly_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_distance_between_garages() {
        let sheikh_zayed = GeoPoint { lat: 25.2048, lng: 55.2708 };
        let business_bay = GeoPoint { lat: 25.1865, lng: 55.2637 };
        assert_eq!(distance_km(sheikh_zayed, sheikh_zayed), 0.0);
        assert_eq!(distance_km(sheikh_zayed, business_bay), 2.2);
    }
}
