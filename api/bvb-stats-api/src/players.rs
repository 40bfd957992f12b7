use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use bvb_stats_app::domain::{
    GameId, PlayerId,
    action::ActionType,
    player::Player,
    summary::CategoryTotals,
};

use crate::{AppState, error::ServiceError};

#[derive(serde::Serialize)]
pub struct JsonPlayer {
    pub id: i32,
    pub name: String,
}

impl From<Player> for JsonPlayer {
    fn from(player: Player) -> Self {
        JsonPlayer {
            id: player.id.0,
            name: player.name,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonPlayerName {
    #[serde(default)]
    pub name: String,
}

#[derive(serde::Serialize)]
pub struct JsonPlayerOverview {
    pub id: i32,
    pub name: String,
    pub games_played: u32,
    pub total_kills: u32,
    pub total_aces: u32,
}

#[derive(serde::Deserialize)]
pub struct JsonCategoriesFilter {
    pub game_id: Option<i32>,
}

#[derive(serde::Serialize)]
pub struct JsonCategories {
    pub categories: BTreeMap<ActionType, CategoryTotals>,
}

pub async fn list_players(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonPlayer>>, ServiceError> {
    let players = app_state.app.player_list_use_case.list_players().await?;
    Ok(Json(players.into_iter().map(JsonPlayer::from).collect()))
}

pub async fn create_player(
    State(app_state): State<AppState>,
    body: Result<Json<JsonPlayerName>, JsonRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Json(body) = body?;
    let player = app_state
        .app
        .player_create_use_case
        .create_player(&body.name)
        .await?;
    Ok(Json(player.into()))
}

pub async fn get_player(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Path(id) = path?;
    let player = app_state
        .app
        .player_get_use_case
        .get_player(PlayerId(id))
        .await?;
    Ok(Json(player.into()))
}

pub async fn rename_player(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<JsonPlayerName>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let Path(id) = path?;
    let Json(body) = body?;
    app_state
        .app
        .player_rename_use_case
        .rename_player(PlayerId(id), &body.name)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn delete_player(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let Path(id) = path?;
    let player = app_state
        .app
        .player_remove_use_case
        .remove_player(PlayerId(id))
        .await?;
    Ok(Json(player.into()))
}

pub async fn players_summary(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonPlayerOverview>>, ServiceError> {
    let overview = app_state
        .app
        .stats_overview_use_case
        .players_overview()
        .await?;
    Ok(Json(
        overview
            .into_iter()
            .map(|o| JsonPlayerOverview {
                id: o.player.id.0,
                name: o.player.name,
                games_played: o.games_played,
                total_kills: o.total_kills,
                total_aces: o.total_aces,
            })
            .collect(),
    ))
}

pub async fn player_categories(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    filter: Result<Query<JsonCategoriesFilter>, QueryRejection>,
) -> Result<Json<JsonCategories>, ServiceError> {
    let Path(id) = path?;
    let Query(filter) = filter?;
    let summary = app_state
        .app
        .stats_player_totals_use_case
        .player_totals(PlayerId(id), filter.game_id.map(GameId))
        .await?;
    Ok(Json(JsonCategories {
        categories: summary.categories(),
    }))
}
