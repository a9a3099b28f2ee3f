//! Cierre de trabajo
//!
//! Un `CompletionRecord` y su `Warranty` se crean juntos o no se crean.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::warranty::Warranty;

/// Metadatos de un adjunto recibido (fotos, documento de garantía)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAttachment {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
    /// md5 hex de los bytes decodificados
    pub checksum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: Uuid,
    pub service_request_id: Uuid,
    pub garage_id: Uuid,
    pub work_performed: String,
    pub parts_used: Option<String>,
    pub labor_hours: Decimal,
    pub total_cost: Decimal,
    pub customer_notes: Option<String>,
    pub photos: Vec<StoredAttachment>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCloseOut {
    pub completion: CompletionRecord,
    pub warranty: Warranty,
}
