//! Utilidades del sistema
//!
//! Manejo de errores y helpers de validación compartidos.

pub mod errors;
pub mod validation;

pub use errors::*;
