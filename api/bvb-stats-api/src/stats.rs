use std::str::FromStr;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use bvb_stats_app::{
    domain::{
        GameId, PlayerId, StatId,
        action::{
            ActionDetail, ActionType, AttackDetail, BlockDetail, DigDetail, ReceiveDetail,
            ServeDetail, SetDetail,
        },
        summary::StatSummary,
    },
    workflow::ActionView,
};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{AppState, error::ServiceError, games::JsonGame, players::JsonPlayer};

#[derive(serde::Serialize)]
pub struct JsonBaseStat {
    pub id: i32,
    pub game_id: i32,
    pub player_id: i32,
    pub player_name: Option<String>,
    pub action_type: ActionType,
    pub timestamp: DateTime<Utc>,
}

#[derive(serde::Serialize)]
pub struct JsonStatDetails {
    pub stat_id: i32,
    #[serde(flatten)]
    pub detail: ActionDetail,
}

#[derive(serde::Serialize)]
pub struct JsonStat {
    pub base: JsonBaseStat,
    pub details: JsonStatDetails,
}

impl From<ActionView> for JsonStat {
    fn from(view: ActionView) -> Self {
        let (base, detail) = view.record.into_parts();
        JsonStat {
            base: JsonBaseStat {
                id: base.id.0,
                game_id: base.game_id.0,
                player_id: base.player_id.0,
                player_name: view.player_name,
                action_type: base.action_type,
                timestamp: base.timestamp,
            },
            details: JsonStatDetails {
                stat_id: base.id.0,
                detail,
            },
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonNewBaseStat {
    pub player_id: i32,
    pub action_type: String,
    pub game_id: Option<i32>,
    pub timestamp: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct JsonNewStat {
    pub base_stat: JsonNewBaseStat,
    pub serve_stat: Option<ServeDetail>,
    pub receive_stat: Option<ReceiveDetail>,
    pub attack_stat: Option<AttackDetail>,
    pub block_stat: Option<BlockDetail>,
    pub dig_stat: Option<DigDetail>,
    pub set_stat: Option<SetDetail>,
}

impl JsonNewStat {
    fn take_detail(&mut self) -> Result<ActionDetail, ServiceError> {
        let details: Vec<ActionDetail> = [
            self.serve_stat.take().map(ActionDetail::Serve),
            self.receive_stat.take().map(ActionDetail::Receive),
            self.attack_stat.take().map(ActionDetail::Attack),
            self.block_stat.take().map(ActionDetail::Block),
            self.dig_stat.take().map(ActionDetail::Dig),
            self.set_stat.take().map(ActionDetail::Set),
        ]
        .into_iter()
        .flatten()
        .collect();
        match <[ActionDetail; 1]>::try_from(details) {
            Ok([detail]) => Ok(detail),
            Err(details) if details.is_empty() => Err(ServiceError::BadRequest(
                "A detail record is required".to_string(),
            )),
            Err(_) => Err(ServiceError::BadRequest(
                "Only one detail record may be given".to_string(),
            )),
        }
    }
}

/// Accepts RFC 3339 timestamps. A timestamp without offset is taken as UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ServiceError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::from_str(value)
        .map(|naive| naive.and_utc())
        .map_err(|_| ServiceError::BadRequest(format!("Invalid timestamp '{}'", value)))
}

fn parse_action_type(value: &str) -> Result<ActionType, ServiceError> {
    ActionType::from_str(value).map_err(|e| ServiceError::BadRequest(e.to_string()))
}

#[derive(serde::Deserialize)]
pub struct JsonGameStatsFilter {
    pub player_id: Option<i32>,
    pub action_type: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct JsonPlayerStatsFilter {
    pub game_id: Option<i32>,
    pub action_type: Option<String>,
}

pub async fn list_game_stats(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    filter: Result<Query<JsonGameStatsFilter>, QueryRejection>,
) -> Result<Json<Vec<JsonStat>>, ServiceError> {
    let Path(id) = path?;
    let Query(filter) = filter?;
    let action_type = filter
        .action_type
        .as_deref()
        .map(parse_action_type)
        .transpose()?;
    let views = app_state
        .app
        .action_list_use_case
        .list_game_actions(GameId(id), filter.player_id.map(PlayerId), action_type)
        .await?;
    Ok(Json(views.into_iter().map(JsonStat::from).collect()))
}

pub async fn create_stat(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<JsonNewStat>, JsonRejection>,
) -> Result<Json<JsonStat>, ServiceError> {
    let Path(id) = path?;
    let Json(mut body) = body?;
    let detail = body.take_detail()?;
    let base = body.base_stat;
    if let Some(body_game_id) = base.game_id
        && body_game_id != id
    {
        return Err(ServiceError::BadRequest(format!(
            "Body game_id {} does not match path game id {}",
            body_game_id, id
        )));
    }
    let action_type = parse_action_type(&base.action_type)?;
    let timestamp = base.timestamp.as_deref().map(parse_timestamp).transpose()?;

    log::debug!(
        "Recording {} for player {} in game {}",
        action_type,
        base.player_id,
        id
    );
    let view = app_state
        .app
        .action_record_use_case
        .record_action(
            GameId(id),
            PlayerId(base.player_id),
            action_type,
            timestamp,
            detail,
        )
        .await?;
    Ok(Json(view.into()))
}

pub async fn delete_stat(
    State(app_state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<JsonStat>, ServiceError> {
    let Path((id, stat_id)) = path?;
    let view = app_state
        .app
        .action_remove_use_case
        .remove_action(GameId(id), StatId(stat_id))
        .await?;
    Ok(Json(view.into()))
}

pub async fn list_player_stats(
    State(app_state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    filter: Result<Query<JsonPlayerStatsFilter>, QueryRejection>,
) -> Result<Json<Vec<JsonStat>>, ServiceError> {
    let Path(player_id) = path?;
    let Query(filter) = filter?;
    let action_type = filter
        .action_type
        .as_deref()
        .map(parse_action_type)
        .transpose()?;
    let views = app_state
        .app
        .action_list_use_case
        .list_player_actions(PlayerId(player_id), filter.game_id.map(GameId), action_type)
        .await?;
    Ok(Json(views.into_iter().map(JsonStat::from).collect()))
}

#[derive(serde::Serialize)]
pub struct JsonPlayerGameStats {
    pub player: JsonPlayer,
    pub game: JsonGame,
    #[serde(flatten)]
    pub summary: StatSummary,
}

pub async fn player_game_summary(
    State(app_state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<JsonPlayerGameStats>, ServiceError> {
    let Path((player_id, game_id)) = path?;
    let stats = app_state
        .app
        .stats_player_game_use_case
        .player_game_stats(PlayerId(player_id), GameId(game_id))
        .await?;
    Ok(Json(JsonPlayerGameStats {
        player: stats.player.into(),
        game: stats.game.into(),
        summary: stats.summary,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn new_stat(json: serde_json::Value) -> JsonNewStat {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T10:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-01-01T12:30:00+02:00").unwrap(),
            expected
        );
        assert_eq!(parse_timestamp("2024-01-01T10:30:00").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_exactly_one_detail() {
        let detail = new_stat(serde_json::json!({
            "base_stat": {"player_id": 1, "action_type": "block"},
            "block_stat": {"is_stuff": true}
        }))
        .take_detail()
        .unwrap();
        assert_eq!(
            detail,
            ActionDetail::Block(BlockDetail {
                is_stuff: true,
                is_touch: false
            })
        );

        let mut none = new_stat(serde_json::json!({
            "base_stat": {"player_id": 1, "action_type": "block"}
        }));
        assert!(matches!(
            none.take_detail(),
            Err(ServiceError::BadRequest(_))
        ));

        let mut two = new_stat(serde_json::json!({
            "base_stat": {"player_id": 1, "action_type": "block"},
            "block_stat": {},
            "dig_stat": {}
        }));
        assert!(matches!(two.take_detail(), Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn test_stat_json_shape() {
        let view = ActionView {
            record: bvb_stats_app::domain::action::ActionRecord::new(
                bvb_stats_app::domain::action::BaseStat {
                    id: StatId(7),
                    game_id: GameId(1),
                    player_id: PlayerId(2),
                    action_type: ActionType::Dig,
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                },
                ActionDetail::Dig(DigDetail {
                    is_successful: true,
                    led_to_kill: false,
                    dig_quality: None,
                }),
            )
            .unwrap(),
            player_name: Some("B".to_string()),
        };
        let json = serde_json::to_value(JsonStat::from(view)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "base": {
                    "id": 7,
                    "game_id": 1,
                    "player_id": 2,
                    "player_name": "B",
                    "action_type": "dig",
                    "timestamp": "2024-01-01T10:00:00Z"
                },
                "details": {
                    "stat_id": 7,
                    "is_successful": true,
                    "led_to_kill": false,
                    "dig_quality": null
                }
            })
        );
    }
}
