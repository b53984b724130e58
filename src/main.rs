use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use baham::build_router;
use baham::config::{DatabaseConfig, EnvironmentConfig};
use baham::database;
use baham::repositories::{CarpoolStore, MemoryRepository, PgRepository};
use baham::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("baham=debug,tower_http=info")),
        )
        .init();

    info!("🚗 Baham - Carpool API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;

    // Inicializar almacenamiento
    let store: Arc<dyn CarpoolStore> = match DatabaseConfig::from_environment(&config) {
        Some(db_config) => {
            let pool = database::connect(&db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                e
            })?;
            info!("✅ PostgreSQL conectado");
            Arc::new(PgRepository::new(pool))
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada: usando almacenamiento en memoria");
            Arc::new(MemoryRepository::new())
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::bootstrap(store, config).await?;
    let app = build_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/register | /api/auth/login");
    info!("   /api/vehicle-models, /api/vehicles, /api/user-profiles, /api/contracts");
    info!("      GET / | GET /:uuid | POST / | PUT /:uuid | DELETE /:uuid");
    info!("      POST /:uuid/restore | POST /:uuid/purge");
    info!("   POST /api/user-profiles/:uuid/deactivate | /activate");
    info!("🛠️ Consola de administración: /admin/vehicle-models, /admin/vehicles, /admin/user-profiles");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
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
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
