use crate::dto::chat_dto::SendMessageRequest;
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::Session;
use crate::models::chat::Conversation;
use crate::services::chat_service::ChatService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ChatController {
    service: ChatService,
}

impl ChatController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.chat.clone(),
        }
    }

    pub async fn conversation(&self, session: &Session) -> AppResult<ApiResponse<Conversation>> {
        let customer_id = session.customer_id()?;
        Ok(ApiResponse::success(self.service.conversation(customer_id).await))
    }

    pub async fn send(
        &self,
        session: &Session,
        request: SendMessageRequest,
    ) -> AppResult<ApiResponse<Conversation>> {
        let customer_id = session.customer_id()?;
        let conversation = self
            .service
            .send(customer_id, session.name(), &request.message)
            .await?;
        Ok(ApiResponse::success_with_message(
            conversation,
            "Message sent".to_string(),
        ))
    }
}
