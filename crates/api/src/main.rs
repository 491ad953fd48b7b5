use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use soundope_core::ledger::BoostPoolPolicy;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soundope_api::background;
use soundope_api::config::ServerConfig;
use soundope_api::router::build_app_router;
use soundope_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundope_api=debug,soundope_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        boost_stacking = config.ledger.boost_stacking.as_str(),
        boost_pool_policy = config.ledger.boost_pool_policy.as_str(),
        monthly_vote_allowance = config.ledger.monthly_vote_allowance,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = soundope_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    soundope_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    soundope_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Background jobs ---
    let jobs_cancel = CancellationToken::new();
    let mut job_handles = Vec::new();

    job_handles.push(tokio::spawn(background::vote_allowance::run(
        pool.clone(),
        config.ledger.monthly_vote_allowance,
        jobs_cancel.clone(),
    )));

    if config.ledger.boost_pool_policy == BoostPoolPolicy::ResetOnExpiry {
        job_handles.push(tokio::spawn(background::boost_expiry::run(
            pool.clone(),
            config.ledger.boost_expiry_sweep_secs,
            jobs_cancel.clone(),
        )));
    }

    tracing::info!(jobs = job_handles.len(), "Background jobs started");

    // --- App state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    jobs_cancel.cancel();
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    for handle in job_handles {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Background job did not stop within the shutdown timeout");
        }
    }
    tracing::info!("Background jobs stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
