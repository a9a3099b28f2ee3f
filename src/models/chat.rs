//! Chat en vivo con un experto
//!
//! Una conversación por cliente. La respuesta del experto llega tras una
//! latencia simulada y se cancela al cerrar sesión.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Expert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExpert {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub rating: f64,
    pub is_online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_type: SenderType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_expert(expert: &ChatExpert, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: expert.id.clone(),
            sender_name: expert.name.clone(),
            sender_type: SenderType::Expert,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub customer_id: Uuid,
    pub expert: ChatExpert,
    pub messages: Vec<ChatMessage>,
}
