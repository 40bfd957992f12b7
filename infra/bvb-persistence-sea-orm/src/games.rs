use bvb_stats_app::domain::{
    GameId, PlayerId, Reference, RepoCreateError, RepoDeleteError, RepoError, RepoRetrieveError,
    game::{Game, GameRepository, NewGame},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entity::{base_stat, game, player},
    settle,
};

pub struct GameRepositoryImpl {
    db: DatabaseConnection,
}

pub(crate) fn encode_team(team: &[PlayerId]) -> String {
    serde_json::Value::from(team.iter().map(|id| id.0).collect::<Vec<i32>>()).to_string()
}

pub(crate) fn decode_team(json: &str) -> Result<Vec<PlayerId>, String> {
    serde_json::from_str::<Vec<i32>>(json)
        .map(|ids| ids.into_iter().map(PlayerId).collect())
        .map_err(|e| format!("invalid team column '{}': {}", json, e))
}

impl GameRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_game(model: game::Model) -> Result<Game, String> {
        Ok(Game {
            id: GameId(model.id),
            date: model.date,
            team1: decode_team(&model.team1)?,
            team2: decode_team(&model.team2)?,
        })
    }
}

#[async_trait::async_trait]
impl GameRepository for GameRepositoryImpl {
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError> {
        let res = self
            .db
            .transaction::<_, game::Model, RepoCreateError>(|c| {
                Box::pin(async move {
                    let storage = |e: DbErr| RepoCreateError::StorageError(e.to_string());
                    for player_id in game.players() {
                        let exists = player::Entity::find_by_id(player_id.0)
                            .one(c)
                            .await
                            .map_err(storage)?;
                        if exists.is_none() {
                            return Err(RepoCreateError::MissingReference(Reference::Player(
                                player_id,
                            )));
                        }
                    }
                    let new_game = game::ActiveModel {
                        id: NotSet,
                        date: Set(game.date),
                        team1: Set(encode_team(&game.team1)),
                        team2: Set(encode_team(&game.team2)),
                    };
                    new_game.insert(c).await.map_err(storage)
                })
            })
            .await;
        let model = settle(res, RepoCreateError::StorageError)?;
        Self::model_to_game(model).map_err(RepoCreateError::StorageError)
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        let model = game::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        Self::model_to_game(model).map_err(RepoRetrieveError::StorageError)
    }

    async fn list_games(&self) -> Result<Vec<Game>, RepoError> {
        let models = game::Entity::find()
            .order_by_desc(game::Column::Date)
            .order_by_desc(game::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        models
            .into_iter()
            .map(|model| Self::model_to_game(model).map_err(RepoError::StorageError))
            .collect()
    }

    async fn delete_game(&self, id: GameId) -> Result<Game, RepoDeleteError> {
        let res = self
            .db
            .transaction::<_, game::Model, RepoDeleteError>(|c| {
                Box::pin(async move {
                    let storage = |e: DbErr| RepoDeleteError::StorageError(e.to_string());
                    let model = game::Entity::find_by_id(id.0)
                        .one(c)
                        .await
                        .map_err(storage)?
                        .ok_or(RepoDeleteError::NotFound)?;
                    let stat_count = base_stat::Entity::find()
                        .filter(base_stat::Column::GameId.eq(id.0))
                        .count(c)
                        .await
                        .map_err(storage)?;
                    if stat_count > 0 {
                        return Err(RepoDeleteError::InUse);
                    }
                    model.clone().delete(c).await.map_err(storage)?;
                    Ok(model)
                })
            })
            .await;
        let model = settle(res, RepoDeleteError::StorageError)?;
        Self::model_to_game(model).map_err(RepoDeleteError::StorageError)
    }
}
