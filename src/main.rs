use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use repyr_backend::build_app;
use repyr_backend::config::environment::EnvironmentConfig;
use repyr_backend::database::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging: RUST_LOG tiene prioridad sobre el nivel configurado
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("repyr_backend={},tower_http=info", config.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🔧 Repyr - API de reservas de talleres");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() && config.jwt_secret == EnvironmentConfig::default().jwt_secret {
        warn!("⚠️ Usando JWT_SECRET de desarrollo");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let server_url = config.server_url();
    let app = build_app(config, Store::seeded());

    info!("🌐 Servidor iniciando en {}", server_url);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/signup - Alta de cliente o taller");
    info!("   POST /api/auth/login - Login por teléfono + OTP");
    info!("   POST /api/auth/logout - Cerrar sesión y cancelar tareas");
    info!("   GET  /api/session - Sesión y pestañas del rol");
    info!("🛠️ Solicitudes:");
    info!("   POST /api/requests - Crear solicitud");
    info!("   GET  /api/requests - Listar solicitudes");
    info!("   POST /api/requests/:id/quotes - Cotizar (taller)");
    info!("   POST /api/requests/:id/accept - Aceptar cotización");
    info!("   POST /api/requests/:id/status - Cambiar estado");
    info!("   POST /api/requests/:id/complete - Cerrar trabajo con garantía");
    info!("🛒 Checkout: /api/checkout/{{summary,book,bookings,financing}}");
    info!("👤 Cuenta: /api/account/{{loyalty,warranties,history,maintenance,fleet}}");
    info!("🔍 Diagnóstico: /api/diagnostics/{{reports,options,book,bookings,analyze,jobs,:id}}");
    info!("🔎 Inspección: /api/inspections/{{options,reports}}");
    info!("💬 Chat: /api/chat, /api/chat/messages");
    info!("🗺️ Talleres: /api/garages, /api/garages/:id");
    info!("🏪 Taller: /api/garage/{{dashboard,profile}}");
    info!("🛡️ Admin: /api/admin/{{dashboard,users,garages,reports,customers/lookup}}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
