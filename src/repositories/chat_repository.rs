use uuid::Uuid;

use crate::database::Table;
use crate::models::chat::{ChatMessage, Conversation};
use crate::utils::errors::AppResult;

/// Conversaciones de chat, una por cliente
#[derive(Clone, Default)]
pub struct ChatRepository {
    conversations: Table<Conversation>,
}

impl ChatRepository {
    pub async fn find(&self, customer_id: Uuid) -> Option<Conversation> {
        self.conversations.get(customer_id).await
    }

    /// Devuelve la conversación del cliente o guarda `start` si no existe
    pub async fn find_or_start(&self, start: Conversation) -> Conversation {
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(start.customer_id)
            .or_insert(start)
            .clone()
    }

    pub async fn append(&self, customer_id: Uuid, message: ChatMessage) -> AppResult<Conversation> {
        self.conversations
            .update(customer_id, "Conversation", |conversation| {
                conversation.messages.push(message);
                Ok(conversation.clone())
            })
            .await
    }
}
