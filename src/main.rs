use std::net::SocketAddr;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use docvault::logging::{init_tracing, shutdown_tracer};
use docvault::metrics::{init_metrics, metrics_app};
use docvault::router::init_router;
use docvault::state::init_app_state;
use docvault_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let server_config = ServerConfig::from_env();

    let state = init_app_state().await?;
    docvault_db::run_migrations(&state.db).await?;

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = server_config.metrics_addr();
            tokio::spawn(async move {
                match tokio::net::TcpListener::bind(&metrics_addr).await {
                    Ok(listener) => {
                        info!("Metrics available at http://{}/metrics", metrics_addr);
                        if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                            error!(error = %e, "Metrics server stopped");
                        }
                    }
                    Err(e) => error!(error = %e, addr = %metrics_addr, "Failed to bind metrics port"),
                }
            });
        }
        Ok(None) => info!("Observability disabled, metrics server not started"),
        Err(e) => warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let rate_limiters = state.rate_limiters.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(60)).await;
            rate_limiters.retain_recent();
        }
    });

    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
