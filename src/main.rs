use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mall_parking_checkpoint::config::environment::EnvironmentConfig;
use mall_parking_checkpoint::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mall_parking_checkpoint=debug,tower_http=info")),
        )
        .init();

    info!("🅿️ Mall Parking Checkpoint");
    info!("==========================");

    let config = EnvironmentConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Configuración inválida: {}", e))?;
    info!("🌍 Zona horaria de referencia: {}", config.reference_timezone);

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(config)?;
    let app = create_app(state.clone());

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/checkpoint - Estado del checkpoint");
    info!("   POST /api/checkpoint/scan - Buscar ticket");
    info!("   POST /api/checkpoint/entry - Registrar entrada");
    info!("   POST /api/checkpoint/exit - Registrar salida");
    info!("   POST /api/checkpoint/reset - Reiniciar pantalla");
    info!("   POST /api/checkpoint/scanner/start - Iniciar escaneo");
    info!("   POST /api/checkpoint/scanner/stop - Detener escaneo");
    info!("   POST /api/checkpoint/scanner/frame - Frame de cámara");
    info!("   GET  /api/bookings - Listado de reservas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    state.shutdown().await;
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
