use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use bvb_stats_app::domain::{
    GameId, PlayerId,
    game::{Game, NewGame},
};
use chrono::NaiveDate;

use crate::{AppState, error::ServiceError};

#[derive(serde::Serialize)]
pub struct JsonGame {
    pub id: i32,
    pub date: NaiveDate,
    pub team1: Vec<i32>,
    pub team2: Vec<i32>,
}

impl From<Game> for JsonGame {
    fn from(game: Game) -> Self {
        JsonGame {
            id: game.id.0,
            date: game.date,
            team1: game.team1.into_iter().map(|p| p.0).collect(),
            team2: game.team2.into_iter().map(|p| p.0).collect(),
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonNewGame {
    pub date: NaiveDate,
    pub team1: Vec<i32>,
    pub team2: Vec<i32>,
}

impl From<JsonNewGame> for NewGame {
    fn from(game: JsonNewGame) -> Self {
        NewGame {
            date: game.date,
            team1: game.team1.into_iter().map(PlayerId).collect(),
            team2: game.team2.into_iter().map(PlayerId).collect(),
        }
    }
}

pub async fn list_games(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonGame>>, ServiceError> {
    let games = app_state.app.game_list_use_case.list_games().await?;
    Ok(Json(games.into_iter().map(JsonGame::from).collect()))
}

pub async fn create_game(
    State(app_state): State<AppState>,
    body: Result<Json<JsonNewGame>, JsonRejection>,
) -> Result<Json<JsonGame>, ServiceError> {
    let Json(body) = body?;
    let game = app_state
        .app
        .game_create_use_case
        .create_game(body.into())
        .await?;
    Ok(Json(game.into()))
}

pub async fn get_game(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<JsonGame>, ServiceError> {
    let Path(id) = path?;
    let game = app_state.app.game_get_use_case.get_game(GameId(id)).await?;
    Ok(Json(game.into()))
}

pub async fn delete_game(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<JsonGame>, ServiceError> {
    let Path(id) = path?;
    let game = app_state
        .app
        .game_remove_use_case
        .remove_game(GameId(id))
        .await?;
    Ok(Json(game.into()))
}
