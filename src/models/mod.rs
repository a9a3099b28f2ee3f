//! Modelos del sistema
//!
//! Este módulo contiene las entidades de dominio que viven en el store en memoria.

pub mod chat;
pub mod checkout;
pub mod completion;
pub mod diagnosis;
pub mod financing;
pub mod fleet;
pub mod garage;
pub mod inspection;
pub mod job;
pub mod loyalty;
pub mod quote;
pub mod review;
pub mod service_request;
pub mod user;
pub mod vehicle;
pub mod warranty;
