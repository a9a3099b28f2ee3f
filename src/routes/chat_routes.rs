use axum::{extract::State, routing::get, routing::post, Extension, Json, Router};

use crate::controllers::chat_controller::ChatController;
use crate::dto::chat_dto::SendMessageRequest;
use crate::dto::common_dto::{ApiResponse, ValidatedJson};
use crate::middleware::auth::Session;
use crate::models::chat::Conversation;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/", get(conversation))
        .route("/messages", post(send_message))
}

async fn conversation(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let controller = ChatController::new(&state);
    Ok(Json(controller.conversation(&session).await?))
}

async fn send_message(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let controller = ChatController::new(&state);
    let response = controller.send(&session, request).await?;
    Ok(Json(response))
}
