//! Middleware de Rate Limiting
//!
//! Ventana fija por IP de cliente, aplicada a las rutas de autenticación.
//! La IP sale de la conexión TCP; `X-Forwarded-For` solo cuenta con
//! `TRUST_PROXY` activo.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
    trust_proxy: bool,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window_duration: Duration::from_secs(config.rate_limit_window),
            trust_proxy: config.trust_proxy,
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

fn forwarded_ip(request: &Request) -> Option<String> {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

/// IP del cliente: cabecera del proxy si se confía en él, si no la del peer
fn client_ip(request: &Request, trust_proxy: bool) -> String {
    let forwarded = if trust_proxy { forwarded_ip(request) } else { None };
    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request, rate_limit_state.trust_proxy);
    rate_limit_state.check_rate_limit(&ip).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(max_requests: u32, window_secs: u64) -> RateLimitState {
        RateLimitState::new(&EnvironmentConfig {
            rate_limit_requests: max_requests,
            rate_limit_window: window_secs,
            ..EnvironmentConfig::default()
        })
    }

    #[tokio::test]
    async fn test_limit_per_ip() {
        let limiter = state(2, 60);
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(matches!(
            limiter.check_rate_limit("10.0.0.1").await,
            Err(AppError::RateLimitExceeded)
        ));
        assert!(limiter.check_rate_limit("10.0.0.2").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = state(1, 0);
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
    }

    fn login_request(peer: &str, forwarded_for: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/auth/login");
        if let Some(value) = forwarded_for {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut request = builder.body(axum::body::Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        request
    }

    #[test]
    fn test_forwarded_header_ignored_without_trusted_proxy() {
        let request = login_request("192.168.1.7:51000", Some("203.0.113.9"));
        assert_eq!(client_ip(&request, false), "192.168.1.7");
    }

    #[test]
    fn test_forwarded_header_used_behind_trusted_proxy() {
        let request = login_request("10.0.0.1:443", Some("203.0.113.9, 10.0.0.1"));
        assert_eq!(client_ip(&request, true), "203.0.113.9");

        let direct = login_request("10.0.0.1:443", None);
        assert_eq!(client_ip(&direct, true), "10.0.0.1");
    }

    #[tokio::test]
    async fn test_rotating_forwarded_header_shares_peer_bucket() {
        let limiter = state(2, 60);
        let mut outcomes = Vec::new();
        for n in 0..3 {
            let forwarded = format!("198.51.100.{}", n);
            let request = login_request("192.168.1.7:51000", Some(&forwarded));
            let ip = client_ip(&request, limiter.trust_proxy);
            outcomes.push(limiter.check_rate_limit(&ip).await.is_ok());
        }
        assert_eq!(outcomes, vec![true, true, false]);
    }
}
