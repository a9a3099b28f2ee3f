//! Chat en vivo con un experto certificado
//!
//! Cada mensaje del cliente programa una respuesta del experto tras la
//! latencia simulada. La respuesta queda registrada en `PendingTasks` a
//! nombre del cliente, así que cerrar sesión la cancela.

use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::chat::{ChatExpert, ChatMessage, Conversation, SenderType};
use crate::repositories::chat_repository::ChatRepository;
use crate::services::task_registry::PendingTasks;
use crate::utils::errors::{validation_error, AppResult};

const GREETING: &str =
    "Hello! I'm Ahmed, a certified automotive expert. How can I help you today?";
const FOLLOW_UP: &str =
    "I understand your concern. Can you provide more details about when this issue started?";

/// Límite de caracteres por mensaje
pub const MAX_MESSAGE_CHARS: usize = 2000;

pub fn default_expert() -> ChatExpert {
    ChatExpert {
        id: "expert1".to_string(),
        name: "Ahmed Al-Mechanic".to_string(),
        specialization: "Engine & Transmission".to_string(),
        rating: 4.9,
        is_online: true,
    }
}

#[derive(Clone)]
pub struct ChatService {
    repository: ChatRepository,
    tasks: PendingTasks,
    reply_delay: Duration,
}

impl ChatService {
    pub fn new(repository: ChatRepository, tasks: PendingTasks, reply_delay: Duration) -> Self {
        Self {
            repository,
            tasks,
            reply_delay,
        }
    }

    /// Conversación del cliente; la primera vez empieza con el saludo del experto
    pub async fn conversation(&self, customer_id: Uuid) -> Conversation {
        if let Some(conversation) = self.repository.find(customer_id).await {
            return conversation;
        }
        let expert = default_expert();
        let greeting = ChatMessage::from_expert(&expert, GREETING);
        self.repository
            .find_or_start(Conversation {
                customer_id,
                expert,
                messages: vec![greeting],
            })
            .await
    }

    /// Añade el mensaje del cliente y programa la respuesta del experto
    pub async fn send(&self, customer_id: Uuid, sender_name: &str, text: &str) -> AppResult<Conversation> {
        let text = text.trim();
        if text.is_empty() {
            return Err(validation_error("message", "Message cannot be empty"));
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(validation_error("message", "Message is too long"));
        }

        let expert = self.conversation(customer_id).await.expert;
        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender_id: customer_id.to_string(),
            sender_name: sender_name.to_string(),
            sender_type: SenderType::User,
            message: text.to_string(),
            timestamp: Utc::now(),
        };
        let message_id = message.id;
        let conversation = self.repository.append(customer_id, message).await?;

        let repository = self.repository.clone();
        let delay = self.reply_delay;
        self.tasks
            .spawn(customer_id, message_id, async move {
                tokio::time::sleep(delay).await;
                let reply = ChatMessage::from_expert(&expert, FOLLOW_UP);
                if let Err(e) = repository.append(customer_id, reply).await {
                    tracing::error!(%customer_id, "❌ Could not store expert reply: {}", e);
                }
            })
            .await;

        tracing::info!(%customer_id, %message_id, "💬 Chat message sent");
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(delay_ms: u64) -> (ChatService, PendingTasks) {
        let tasks = PendingTasks::new();
        let service = ChatService::new(
            ChatRepository::default(),
            tasks.clone(),
            Duration::from_millis(delay_ms),
        );
        (service, tasks)
    }

    #[tokio::test]
    async fn test_conversation_starts_with_greeting() {
        let (service, _) = service(10);
        let customer = Uuid::new_v4();

        let conversation = service.conversation(customer).await;
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].sender_type, SenderType::Expert);
        assert_eq!(conversation.messages[0].message, GREETING);
        assert_eq!(conversation.expert.name, "Ahmed Al-Mechanic");

        // La segunda lectura no repite el saludo
        assert_eq!(service.conversation(customer).await.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_expert_replies_after_delay() {
        let (service, _) = service(20);
        let customer = Uuid::new_v4();

        let sent = service.send(customer, "Ahmed", "  My engine makes a noise ").await.unwrap();
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[1].message, "My engine makes a noise");
        assert_eq!(sent.messages[1].sender_type, SenderType::User);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let conversation = service.conversation(customer).await;
        assert_eq!(conversation.messages.len(), 3);
        assert_eq!(conversation.messages[2].message, FOLLOW_UP);
        assert_eq!(conversation.messages[2].sender_id, "expert1");
    }

    #[tokio::test]
    async fn test_cancelled_reply_never_arrives() {
        let (service, tasks) = service(100);
        let customer = Uuid::new_v4();

        service.send(customer, "Ahmed", "Hello").await.unwrap();
        assert_eq!(tasks.cancel_all(customer).await.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(service.conversation(customer).await.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let (service, tasks) = service(10);
        let customer = Uuid::new_v4();
        assert!(service.send(customer, "Ahmed", "   ").await.is_err());
        assert!(service.send(customer, "Ahmed", &"x".repeat(MAX_MESSAGE_CHARS + 1)).await.is_err());
        assert_eq!(tasks.pending_for(customer).await, 0);
    }
}
