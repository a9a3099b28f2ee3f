//! Módulo de almacenamiento
//!
//! Store en memoria con una tabla por entidad, sembrada al arrancar.

pub mod seed;
pub mod store;

pub use store::{Store, Table};
