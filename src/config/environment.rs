//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! `main` carga `.env` con `dotenvy` antes de llamar a `EnvironmentConfig::from_env`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

/// Error al leer la configuración
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },

    #[error("{key} has an invalid value '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Segundos de validez del token de sesión
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    /// Ventana del rate limit en segundos
    pub rate_limit_window: u64,
    /// Latencia simulada de envíos y análisis
    pub simulated_latency_ms: u64,
    pub max_attachment_bytes: usize,
    /// Confiar en `X-Forwarded-For` (solo detrás de un proxy propio)
    pub trust_proxy: bool,
    /// Fecha fija para los estados derivados; `None` usa el día UTC actual
    pub reference_date: Option<NaiveDate>,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "repyr-development-secret".to_string(),
            jwt_expiration: 24 * 3600,
            cors_origins: vec!["http://localhost:5173".to_string()],
            rate_limit_requests: 30,
            rate_limit_window: 60,
            simulated_latency_ms: 2000,
            max_attachment_bytes: 5 * 1024 * 1024,
            trust_proxy: false,
            reference_date: None,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Valores por defecto sobrescritos con las variables de entorno presentes
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret);
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Empty { key: "JWT_SECRET" });
        }

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            simulated_latency_ms: parse_var("SIMULATED_LATENCY_MS", defaults.simulated_latency_ms)?,
            max_attachment_bytes: parse_var("MAX_ATTACHMENT_BYTES", defaults.max_attachment_bytes)?,
            trust_proxy: parse_flag("TRUST_PROXY", defaults.trust_proxy)?,
            reference_date: parse_date("REFERENCE_DATE")?,
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value }),
        },
        Err(_) => Ok(default),
    }
}

/// `YYYY-MM-DD`
fn parse_date(key: &'static str) -> Result<Option<NaiveDate>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
