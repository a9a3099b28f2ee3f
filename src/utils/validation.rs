//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los DTOs (`#[validate(custom = ...)]`) y los controllers.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z]{1,3}-?\d{1,6}$").unwrap();
    static ref OTP_RE: Regex = Regex::new(r"^\d{4}$").unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ())
}

/// Convertir string `YYYY-MM-DD` a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar hora en formato `HH:MM`
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono: entre 9 y 15 dígitos
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(9..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        error.add_param("digits".into(), &digits);
        return Err(error);
    }
    Ok(())
}

/// Normalizar teléfono a solo dígitos con prefijo `+`
pub fn normalize_phone(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{}", digits)
}

/// Validar OTP: exactamente 4 dígitos
pub fn validate_otp(value: &str) -> Result<(), ValidationError> {
    if !OTP_RE.is_match(value) {
        let mut error = ValidationError::new("otp");
        error.message = Some("OTP must be exactly 4 digits".into());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula (`A-12345`, `DXB12345`)
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Validar importe monetario (no negativo)
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)
}

/// Validar importe monetario estrictamente positivo
pub fn validate_positive_money(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Debug + Serialize>(
    value: &T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Acumula errores de campo fuera del derive de `validator`
#[derive(Debug)]
pub struct FieldErrors {
    errors: ValidationErrors,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    /// Registra el resultado de una validación bajo `field`
    pub fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.add(field, error);
        }
    }

    pub fn add(&mut self, field: &'static str, code: &'static str, message: &'static str) {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        self.errors.add(field, error);
    }

    /// Fusiona errores del derive bajo un prefijo (`completion`, `warranty`)
    pub fn merge(&mut self, prefix: &'static str, result: Result<(), ValidationErrors>) {
        if let Err(nested) = result {
            for (field, errors) in nested.field_errors() {
                for error in errors {
                    let mut error = error.clone();
                    error.add_param("field".into(), &field);
                    self.errors.add(prefix, error);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.errors().is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
