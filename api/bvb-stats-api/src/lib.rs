use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};
use bvb_stats_app::Application;
use log::info;
use tower_http::cors::CorsLayer;

pub mod error;
mod games;
mod players;
mod stats;

pub use error::ServiceError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

pub fn router(app: Arc<Application>) -> Router {
    let api: Router<AppState> = Router::new()
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/players/summary", get(players::players_summary))
        .route(
            "/players/{id}",
            get(players::get_player)
                .patch(players::rename_player)
                .delete(players::delete_player),
        )
        .route("/players/{id}/stats", get(players::player_categories))
        .route("/games", get(games::list_games).post(games::create_game))
        .route(
            "/games/{id}",
            get(games::get_game).delete(games::delete_game),
        )
        .route(
            "/games/{id}/stats",
            get(stats::list_game_stats).post(stats::create_stat),
        )
        .route("/games/{id}/stats/{stat_id}", delete(stats::delete_stat))
        .route("/stats/player/{player_id}", get(stats::list_player_stats))
        .route(
            "/stats/summary/player/{player_id}/game/{game_id}",
            get(stats::player_game_summary),
        );

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    host: &str,
    port: u16,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    info!("HTTP API listening on {}:{}", host, port);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
