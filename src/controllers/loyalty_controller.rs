use uuid::Uuid;

use crate::dto::account_dto::RedeemRewardRequest;
use crate::dto::common_dto::ApiResponse;
use crate::services::loyalty_service::{LoyaltyOverview, LoyaltyService, Redemption};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct LoyaltyController {
    service: LoyaltyService,
    state: AppState,
}

impl LoyaltyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: LoyaltyService::new(state.store.loyalty.clone()),
            state: state.clone(),
        }
    }

    pub async fn overview(&self, user_id: Uuid) -> ApiResponse<LoyaltyOverview> {
        ApiResponse::success(self.service.overview(user_id).await)
    }

    pub async fn redeem(
        &self,
        user_id: Uuid,
        request: RedeemRewardRequest,
    ) -> AppResult<ApiResponse<Redemption>> {
        let redemption = self
            .service
            .redeem(user_id, request.reward_id.trim(), self.state.today())
            .await?;
        Ok(ApiResponse::success_with_message(
            redemption,
            "Reward redeemed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvironmentConfig;
    use crate::database::seed::AHMED_ID;
    use crate::database::Store;
    use crate::models::loyalty::LoyaltyTier;
    use crate::utils::errors::AppError;

    #[tokio::test]
    async fn test_redeem_drops_tier_when_points_fall_below_threshold() {
        let state = AppState::new(EnvironmentConfig::default(), Store::seeded());
        let controller = LoyaltyController::new(&state);

        let overview = controller.overview(AHMED_ID).await.data.unwrap();
        assert_eq!(overview.progress.tier, LoyaltyTier::Gold);

        let redemption = controller
            .redeem(AHMED_ID, RedeemRewardRequest { reward_id: "2".to_string() })
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(redemption.remaining_points, 1650);
        assert_eq!(redemption.progress.tier, LoyaltyTier::Silver);
    }

    #[tokio::test]
    async fn test_unavailable_reward_conflicts() {
        let state = AppState::new(EnvironmentConfig::default(), Store::seeded());
        let controller = LoyaltyController::new(&state);

        let result = controller
            .redeem(AHMED_ID, RedeemRewardRequest { reward_id: "4".to_string() })
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
