use std::sync::Arc;

use bvb_stats_app::domain::{
    PlayerId, RepoCreateError, RepoDeleteError, RepoError, RepoRetrieveError, RepoUpdateError,
    player::{Player, PlayerRepository},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entity::{base_stat, game, player},
    games::decode_team,
    is_unique_violation, settle,
};

pub struct PlayerRepositoryImpl {
    db: DatabaseConnection,
    player_cache: Arc<moka::future::Cache<PlayerId, Player>>,
}

impl PlayerRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        let player_cache = Arc::new(
            moka::future::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(std::time::Duration::from_secs(60 * 60))
                .build(),
        );
        Self { db, player_cache }
    }

    fn model_to_player(model: player::Model) -> Player {
        Player {
            id: PlayerId(model.id),
            name: model.name,
        }
    }
}

#[async_trait::async_trait]
impl PlayerRepository for PlayerRepositoryImpl {
    async fn create_player(&self, name: &str) -> Result<Player, RepoCreateError> {
        let name = name.to_string();
        self.player_cache.invalidate(&id).await;
        let res = self
            .db
            .transaction::<_, player::Model, RepoCreateError>(|c| {
                Box::pin(async move {
                    let existing = player::Entity::find()
                        .filter(player::Column::Name.eq(name.as_str()))
                        .one(c)
                        .await
                        .map_err(|e| RepoCreateError::StorageError(e.to_string()))?;
                    if existing.is_some() {
                        return Err(RepoCreateError::Conflict);
                    }
                    let new_player = player::ActiveModel {
                        id: NotSet,
                        name: Set(name),
                    };
                    new_player.insert(c).await.map_err(|e| {
                        if is_unique_violation(&e) {
                            RepoCreateError::Conflict
                        } else {
                            RepoCreateError::StorageError(e.to_string())
                        }
                    })
                })
            })
            .await;
        let player = Self::model_to_player(settle(res, RepoCreateError::StorageError)?);
        self.player_cache.insert(player.id, player.clone()).await;
        Ok(player)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        if let Some(player) = self.player_cache.get(&id).await {
            return Ok(player);
        }

        let player_model = player::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;

        match player_model {
            Some(model) => {
                let player = Self::model_to_player(model);
                self.player_cache.insert(id, player.clone()).await;
                Ok(player)
            }
            None => Err(RepoRetrieveError::NotFound),
        }
    }

    async fn list_players(&self) -> Result<Vec<Player>, RepoError> {
        let models = player::Entity::find()
            .order_by_asc(player::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(models.into_iter().map(Self::model_to_player).collect())
    }

    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player, RepoUpdateError> {
        let name = name.to_string();
        self.player_cache.invalidate(&id).await;
        let res = self
            .db
            .transaction::<_, player::Model, RepoUpdateError>(|c| {
                Box::pin(async move {
                    let model = player::Entity::find_by_id(id.0)
                        .one(c)
                        .await
                        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?
                        .ok_or(RepoUpdateError::NotFound)?;
                    let taken = player::Entity::find()
                        .filter(player::Column::Name.eq(name.as_str()))
                        .filter(player::Column::Id.ne(id.0))
                        .one(c)
                        .await
                        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;
                    if taken.is_some() {
                        return Err(RepoUpdateError::Conflict);
                    }
                    let mut active: player::ActiveModel = model.into();
                    active.name = Set(name);
                    active.update(c).await.map_err(|e| {
                        if is_unique_violation(&e) {
                            RepoUpdateError::Conflict
                        } else {
                            RepoUpdateError::StorageError(e.to_string())
                        }
                    })
                })
            })
            .await;
        self.player_cache.invalidate(&id).await;
        Ok(Self::model_to_player(settle(
            res,
            RepoUpdateError::StorageError,
        )?))
    }

    async fn delete_player(&self, id: PlayerId) -> Result<Player, RepoDeleteError> {
        self.player_cache.invalidate(&id).await;
        let res = self
            .db
            .transaction::<_, player::Model, RepoDeleteError>(|c| {
                Box::pin(async move {
                    let storage = |e: sea_orm::DbErr| RepoDeleteError::StorageError(e.to_string());
                    let model = player::Entity::find_by_id(id.0)
                        .one(c)
                        .await
                        .map_err(storage)?
                        .ok_or(RepoDeleteError::NotFound)?;

                    let stat_count = base_stat::Entity::find()
                        .filter(base_stat::Column::PlayerId.eq(id.0))
                        .count(c)
                        .await
                        .map_err(storage)?;
                    if stat_count > 0 {
                        return Err(RepoDeleteError::InUse);
                    }

                    for game in game::Entity::find().all(c).await.map_err(storage)? {
                        let team1 = decode_team(&game.team1).map_err(RepoDeleteError::StorageError)?;
                        let team2 = decode_team(&game.team2).map_err(RepoDeleteError::StorageError)?;
                        if team1.contains(&id) || team2.contains(&id) {
                            return Err(RepoDeleteError::InUse);
                        }
                    }

                    model.clone().delete(c).await.map_err(storage)?;
                    Ok(model)
                })
            })
            .await;
        self.player_cache.invalidate(&id).await;
        Ok(Self::model_to_player(settle(
            res,
            RepoDeleteError::StorageError,
        )?))
    }
}
