use std::sync::Arc;

use bvb_persistence_sea_orm::{
    ActionRepositoryImpl, GameRepositoryImpl, PlayerRepositoryImpl, connect, create_schema,
};
use bvb_stats_app::build_application;
use log::{error, info};

use crate::config::ServerConfig;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(e) = logs::init_logger(config.file_log.as_ref()) {
        eprintln!("Failed to initialize logger: {}", e);
        return std::process::ExitCode::FAILURE;
    }

    let db = match connect(&config.database_url, config.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to {}: {}", config.database_url, e);
            return std::process::ExitCode::FAILURE;
        }
    };
    if let Err(e) = create_schema(&db).await {
        error!("Failed to create database tables: {}", e);
        return std::process::ExitCode::FAILURE;
    }

    let player_repo = Arc::new(PlayerRepositoryImpl::new(db.clone()));
    let game_repo = Arc::new(GameRepositoryImpl::new(db.clone()));
    let action_repo = Arc::new(ActionRepositoryImpl::new(db.clone()));

    let app = Arc::new(build_application(player_repo, game_repo, action_repo));

    info!("Starting application");

    if let Err(e) =
        bvb_stats_api::run(app, &config.http_host, config.http_port, shutdown_signal()).await
    {
        error!("HTTP API failed: {}", e);
        return std::process::ExitCode::FAILURE;
    }

    if let Err(e) = db.close().await {
        error!("Failed to close database connection: {}", e);
    }

    info!("Application shut down gracefully");
    std::process::ExitCode::SUCCESS
}
