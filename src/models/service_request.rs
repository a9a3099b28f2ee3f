//! Modelo de ServiceRequest
//!
//! Solicitud de servicio de un cliente y su ciclo de vida:
//!
//! ```text
//! pending -> quoted -> accepted -> in-progress -> completed
//!                          \______________________/
//! cualquier estado no terminal -> cancelled
//! ```
//!
//! `quoted -> accepted` solo ocurre al aceptar una cotización y
//! `-> completed` solo a través del cierre de trabajo (completion + warranty).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::completion::CompletionRecord;
use crate::models::quote::{Quote, QuoteStatus};
use crate::models::vehicle::VehicleInfo;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    Quoted,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::Quoted,
        RequestStatus::Accepted,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Quoted => "quoted",
            RequestStatus::Accepted => "accepted",
            RequestStatus::InProgress => "in-progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    pub fn can_transition_to(&self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        match (*self, to) {
            (Pending, Quoted)
            | (Quoted, Accepted)
            | (Accepted, InProgress)
            | (Accepted, Completed)
            | (InProgress, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Una cotización solo puede enviarse mientras la solicitud sigue abierta a ofertas
    pub fn accepts_quotes(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Quoted)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Origen de la solicitud en la app del cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceRequestKind {
    Diagnosis,
    #[default]
    KnownIssue,
    SavedReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: RequestStatus,
    pub to: RequestStatus,
    pub at: DateTime<Utc>,
    pub actor: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_info: VehicleInfo,
    pub kind: ServiceRequestKind,
    pub service_type: String,
    pub description: String,
    pub urgency: Urgency,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub location: Option<String>,
    pub status: RequestStatus,
    pub quotes: Vec<Quote>,
    pub completion: Option<CompletionRecord>,
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Aplica una transición de estado validada y la registra en el historial
    pub fn transition(&mut self, to: RequestStatus, actor: Uuid) -> AppResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(AppError::InvalidTransition { from: self.status, to });
        }
        if to == RequestStatus::Quoted && self.quotes.is_empty() {
            return Err(AppError::Conflict(format!(
                "Service request '{}' has no quotes yet",
                self.id
            )));
        }

        let now = Utc::now();
        self.history.push(StatusChange {
            from: self.status,
            to,
            at: now,
            actor,
        });
        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    pub fn find_quote(&self, quote_id: Uuid) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == quote_id)
    }

    pub fn accepted_quote(&self) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.status == QuoteStatus::Accepted)
    }

    /// Añade una cotización mientras la solicitud sigue abierta a ofertas.
    /// Un taller solo puede tener una cotización pendiente por solicitud.
    pub fn add_quote(&mut self, quote: Quote) -> AppResult<()> {
        if !self.status.accepts_quotes() {
            return Err(AppError::Conflict(format!(
                "Service request '{}' is {} and no longer accepts quotes",
                self.id, self.status
            )));
        }
        if self
            .quotes
            .iter()
            .any(|q| q.garage_id == quote.garage_id && q.status == QuoteStatus::Pending)
        {
            return Err(AppError::Conflict(format!(
                "Garage '{}' already has a pending quote on this request",
                quote.garage_name
            )));
        }
        self.quotes.push(quote);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Acepta una cotización: `quoted -> accepted`, el resto queda rechazado
    pub fn accept_quote(&mut self, quote_id: Uuid, actor: Uuid, now: DateTime<Utc>) -> AppResult<Quote> {
        if self.status != RequestStatus::Quoted {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: RequestStatus::Accepted,
            });
        }
        let quote = self.find_quote(quote_id).cloned().ok_or_else(|| {
            AppError::NotFound(format!("Quote with id '{}' not found", quote_id))
        })?;
        if quote.status != QuoteStatus::Pending {
            return Err(AppError::Conflict(format!("Quote '{}' is {:?}", quote_id, quote.status)));
        }
        if quote.is_expired_at(now) {
            return Err(AppError::Conflict(format!(
                "Quote '{}' expired at {}",
                quote_id, quote.valid_until
            )));
        }

        self.transition(RequestStatus::Accepted, actor)?;
        self.settle_quotes(quote_id);
        Ok(Quote {
            status: QuoteStatus::Accepted,
            ..quote
        })
    }

    /// Marca `quote_id` como aceptada y rechaza el resto
    pub fn settle_quotes(&mut self, quote_id: Uuid) {
        for quote in &mut self.quotes {
            quote.status = if quote.id == quote_id {
                QuoteStatus::Accepted
            } else {
                QuoteStatus::Rejected
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(status: RequestStatus) -> ServiceRequest {
        let now = Utc::now();
        ServiceRequest {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_name: "Omar Hassan".to_string(),
            customer_phone: "+971524567890".to_string(),
            vehicle_id: None,
            vehicle_info: VehicleInfo {
                make: "Nissan".to_string(),
                model: "Altima".to_string(),
                year: 2021,
                plate: "C-11111".to_string(),
            },
            kind: ServiceRequestKind::KnownIssue,
            service_type: "AC Repair".to_string(),
            description: "Air conditioning not cooling properly".to_string(),
            urgency: Urgency::Low,
            preferred_date: NaiveDate::from_ymd_opt(2024, 2, 18).unwrap(),
            preferred_time: "14:00".to_string(),
            location: None,
            status,
            quotes: vec![],
            completion: None,
            history: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn quote() -> Quote {
        Quote {
            id: Uuid::new_v4(),
            garage_id: Uuid::new_v4(),
            garage_name: "Al Futtaim Motors".to_string(),
            rating: 4.8,
            labor_cost: Decimal::new(320, 0),
            parts_cost: Decimal::ZERO,
            urgent: false,
            price: Decimal::new(320, 0),
            estimated_time: "1-2 hours".to_string(),
            description: "AC system diagnosis and refrigerant refill".to_string(),
            notes: None,
            distance_km: None,
            valid_until: Utc::now(),
            status: QuoteStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_forward_path_is_allowed() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Quoted));
        assert!(Quoted.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(InProgress));
        assert!(Accepted.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn test_shortcuts_and_backwards_moves_are_rejected() {
        use RequestStatus::*;
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Accepted));
        assert!(!Quoted.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Quoted));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_only_from_non_terminal() {
        for status in RequestStatus::ALL {
            assert_eq!(
                status.can_transition_to(RequestStatus::Cancelled),
                !status.is_terminal(),
                "cancel from {}",
                status
            );
        }
    }

    #[test]
    fn test_quoted_requires_a_quote() {
        let actor = Uuid::new_v4();
        let mut req = request(RequestStatus::Pending);
        assert!(matches!(
            req.transition(RequestStatus::Quoted, actor),
            Err(AppError::Conflict(_))
        ));

        req.quotes.push(quote());
        req.transition(RequestStatus::Quoted, actor).unwrap();
        assert_eq!(req.status, RequestStatus::Quoted);
        assert_eq!(req.history.len(), 1);
        assert_eq!(req.history[0].from, RequestStatus::Pending);
    }

    #[test]
    fn test_invalid_transition_reports_both_ends() {
        let mut req = request(RequestStatus::Completed);
        match req.transition(RequestStatus::Cancelled, Uuid::new_v4()) {
            Err(AppError::InvalidTransition { from, to }) => {
                assert_eq!(from, RequestStatus::Completed);
                assert_eq!(to, RequestStatus::Cancelled);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_settle_quotes_accepts_one_rejects_rest() {
        let mut req = request(RequestStatus::Quoted);
        let first = quote();
        let second = quote();
        let chosen = first.id;
        req.quotes = vec![first, second];

        req.settle_quotes(chosen);

        assert_eq!(req.accepted_quote().map(|q| q.id), Some(chosen));
        assert_eq!(
            req.quotes.iter().filter(|q| q.status == QuoteStatus::Rejected).count(),
            1
        );
    }

    #[test]
    fn test_accept_quote_from_quoted_only() {
        let actor = Uuid::new_v4();
        let mut req = request(RequestStatus::Pending);
        let q = Quote {
            valid_until: Utc::now() + chrono::Duration::days(3),
            ..quote()
        };
        let quote_id = q.id;
        req.add_quote(q).unwrap();

        assert!(matches!(
            req.accept_quote(quote_id, actor, Utc::now()),
            Err(AppError::InvalidTransition { .. })
        ));

        req.transition(RequestStatus::Quoted, actor).unwrap();
        let accepted = req.accept_quote(quote_id, actor, Utc::now()).unwrap();
        assert_eq!(accepted.status, QuoteStatus::Accepted);
        assert_eq!(req.status, RequestStatus::Accepted);
    }

    #[test]
    fn test_expired_quote_cannot_be_accepted() {
        let mut req = request(RequestStatus::Quoted);
        let q = quote();
        let quote_id = q.id;
        req.quotes.push(q);

        let later = Utc::now() + chrono::Duration::days(1);
        assert!(matches!(
            req.accept_quote(quote_id, Uuid::new_v4(), later),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(req.status, RequestStatus::Quoted);
    }

    #[test]
    fn test_closed_request_rejects_quotes() {
        let mut req = request(RequestStatus::InProgress);
        assert!(matches!(req.add_quote(quote()), Err(AppError::Conflict(_))));

        let mut open = request(RequestStatus::Pending);
        let first = quote();
        let duplicate = Quote {
            id: Uuid::new_v4(),
            ..first.clone()
        };
        open.add_quote(first).unwrap();
        assert!(open.add_quote(duplicate).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
