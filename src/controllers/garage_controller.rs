use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::garage_dto::{
    GarageDetails, GarageProfile, NearbyGarageQuery, GarageSummary, UpdateGarageProfileRequest,
};
use crate::models::garage::{Garage, VerificationFilter};
use crate::services::garage_profile_service::{distance_km, garage_stats, rating_summary};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::normalize_phone;

pub struct GarageController {
    state: AppState,
}

impl GarageController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    async fn find(&self, garage_id: Uuid) -> AppResult<Garage> {
        self.state
            .store
            .garages
            .find_by_id(garage_id)
            .await
            .ok_or_else(|| not_found_error("Garage", &garage_id.to_string()))
    }

    pub async fn profile(&self, garage_id: Uuid) -> AppResult<ApiResponse<GarageProfile>> {
        let garage = self.find(garage_id).await?;
        let requests = self.state.store.requests.all().await;
        let reviews = self.state.store.reviews.for_garage(garage_id).await;

        Ok(ApiResponse::success(GarageProfile {
            stats: garage_stats(garage_id, &requests, self.state.today()),
            rating: rating_summary(&reviews),
            garage,
        }))
    }

    /// Aplica solo los campos presentes. El teléfono se guarda normalizado.
    pub async fn update_profile(
        &self,
        garage_id: Uuid,
        request: UpdateGarageProfileRequest,
    ) -> AppResult<ApiResponse<Garage>> {
        let garage = self
            .state
            .store
            .garages
            .update(garage_id, |garage| {
                if let Some(name) = request.name {
                    garage.name = name.trim().to_string();
                }
                if let Some(address) = request.address {
                    garage.address = address.trim().to_string();
                }
                if let Some(phone) = request.phone {
                    garage.phone = normalize_phone(&phone);
                }
                if request.email.is_some() {
                    garage.email = request.email;
                }
                if let Some(services) = request.services {
                    garage.services = services;
                }
                if let Some(specializations) = request.specializations {
                    garage.specializations = specializations;
                }
                if let Some(capacity) = request.daily_capacity {
                    garage.daily_capacity = capacity;
                }
                if let Some(hours) = request.working_hours {
                    garage.working_hours = hours;
                }
                if request.location.is_some() {
                    garage.location = request.location;
                }
                Ok(garage.clone())
            })
            .await?;

        tracing::info!(%garage_id, name = %garage.name, "🏪 Garage profile updated");
        Ok(ApiResponse::success_with_message(
            garage,
            "Profile updated successfully".to_string(),
        ))
    }

    /// Talleres verificados. Con `lat`/`lng` se ordenan por cercanía.
    pub async fn list(&self, query: NearbyGarageQuery) -> ApiResponse<Vec<GarageSummary>> {
        let origin = query.origin();
        let garages = self
            .state
            .store
            .garages
            .search(query.q.as_deref(), VerificationFilter::Verified)
            .await;

        let mut summaries = Vec::with_capacity(garages.len());
        for garage in garages {
            let total_reviews = self.state.store.reviews.for_garage(garage.id).await.len();
            let distance_km = origin.zip(garage.location).map(|(from, to)| distance_km(from, to));
            summaries.push(GarageSummary {
                garage,
                total_reviews,
                distance_km,
            });
        }
        if origin.is_some() {
            summaries.sort_by(|a, b| {
                a.distance_km
                    .unwrap_or(f64::MAX)
                    .total_cmp(&b.distance_km.unwrap_or(f64::MAX))
            });
        }
        ApiResponse::success(summaries)
    }

    /// Ficha pública; un taller sin verificar no existe para el cliente
    pub async fn details(
        &self,
        garage_id: Uuid,
        query: NearbyGarageQuery,
    ) -> AppResult<ApiResponse<GarageDetails>> {
        let garage = self
            .find(garage_id)
            .await
            .ok()
            .filter(|g| g.verified)
            .ok_or_else(|| not_found_error("Garage", &garage_id.to_string()))?;
        let requests = self.state.store.requests.all().await;
        let reviews = self.state.store.reviews.for_garage(garage_id).await;
        let stats = garage_stats(garage_id, &requests, self.state.today());

        Ok(ApiResponse::success(GarageDetails {
            distance_km: query
                .origin()
                .zip(garage.location)
                .map(|(from, to)| distance_km(from, to)),
            rating: rating_summary(&reviews),
            completed_jobs: stats.completed_jobs,
            average_response_minutes: stats.average_response_minutes,
            garage,
            reviews,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::database::seed::*;
    use crate::database::Store;
    use crate::utils::errors::AppError;

    fn controller() -> GarageController {
        let config = EnvironmentConfig {
            reference_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 20),
            ..EnvironmentConfig::default()
        };
        GarageController::new(&AppState::new(config, Store::seeded()))
    }

    #[tokio::test]
    async fn test_profile_includes_reviews_and_stats() {
        let profile = controller().profile(AL_FUTTAIM_ID).await.unwrap().data.unwrap();
        assert_eq!(profile.rating.total_reviews, 5);
        assert_eq!(profile.rating.average, Some(4.6));
        assert_eq!(profile.rating.distribution, [3, 2, 0, 0, 0]);
        assert_eq!(profile.stats.active_customers, 1);
    }

    #[tokio::test]
    async fn test_update_profile_touches_only_given_fields() {
        let controller = controller();
        let before = controller.find(AL_FUTTAIM_ID).await.unwrap();

        let updated = controller
            .update_profile(
                AL_FUTTAIM_ID,
                UpdateGarageProfileRequest {
                    phone: Some("+971 4 123 4567".to_string()),
                    daily_capacity: Some(12),
                    ..UpdateGarageProfileRequest::default()
                },
            )
            .await
            .unwrap()
            .data
            .unwrap();

        assert_eq!(updated.phone, "+97141234567");
        assert_eq!(updated.daily_capacity, 12);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.services, before.services);
    }

    #[tokio::test]
    async fn test_unverified_garage_is_hidden_from_customers() {
        let controller = controller();
        let listed = controller.list(NearbyGarageQuery::default()).await.data.unwrap();
        assert!(listed.iter().all(|s| s.garage.verified));
        assert!(!listed.iter().any(|s| s.garage.id == DUBAI_AUTO_CARE_ID));

        let hidden = controller
            .details(DUBAI_AUTO_CARE_ID, NearbyGarageQuery::default())
            .await;
        assert!(matches!(hidden, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_nearest_garage_first() {
        let near_jumeirah = NearbyGarageQuery {
            q: None,
            lat: Some(25.2285),
            lng: Some(55.2593),
        };
        let listed = controller().list(near_jumeirah).await.data.unwrap();
        assert_eq!(listed[0].garage.id, QUICK_FIX_ID);
        assert_eq!(listed[0].distance_km, Some(0.0));
    }

    #[tokio::test]
    async fn test_details_lists_reviews_newest_first() {
        let details = controller()
            .details(AL_FUTTAIM_ID, NearbyGarageQuery::default())
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(details.reviews.len(), 5);
        assert_eq!(details.reviews[0].customer_name, "Ahmed K.");
        assert!(details.reviews[0].response.is_some());
        assert!(details.reviews[4].response.is_none());
        assert_eq!(details.distance_km, None);
    }
}
