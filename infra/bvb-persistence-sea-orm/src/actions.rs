use std::str::FromStr;

use bvb_stats_app::domain::{
    GameId, PlayerId, Reference, RepoCreateError, RepoError, RepoRetrieveError, StatId,
    action::{ActionFilter, ActionRecord, ActionRepository, ActionType, BaseStat, NewAction},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    details::{delete_detail, insert_detail, load_details},
    entity::{base_stat, game, player},
    settle,
};

pub struct ActionRepositoryImpl {
    db: DatabaseConnection,
}

impl ActionRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_base(model: &base_stat::Model) -> Result<BaseStat, String> {
        Ok(BaseStat {
            id: StatId(model.id),
            game_id: GameId(model.game_id),
            player_id: PlayerId(model.player_id),
            action_type: ActionType::from_str(&model.action_type).map_err(|e| e.to_string())?,
            timestamp: model.timestamp,
        })
    }
}

#[async_trait::async_trait]
impl ActionRepository for ActionRepositoryImpl {
    async fn insert_action(&self, action: NewAction) -> Result<ActionRecord, RepoCreateError> {
        let res = self
            .db
            .transaction::<_, ActionRecord, RepoCreateError>(|c| {
                Box::pin(async move {
                    let storage = |e: DbErr| RepoCreateError::StorageError(e.to_string());
                    if game::Entity::find_by_id(action.game_id.0)
                        .one(c)
                        .await
                        .map_err(storage)?
                        .is_none()
                    {
                        return Err(RepoCreateError::MissingReference(Reference::Game(
                            action.game_id,
                        )));
                    }
                    if player::Entity::find_by_id(action.player_id.0)
                        .one(c)
                        .await
                        .map_err(storage)?
                        .is_none()
                    {
                        return Err(RepoCreateError::MissingReference(Reference::Player(
                            action.player_id,
                        )));
                    }

                    let action_type = action.action_type();
                    let base = base_stat::ActiveModel {
                        id: NotSet,
                        game_id: Set(action.game_id.0),
                        player_id: Set(action.player_id.0),
                        action_type: Set(action_type.to_string()),
                        timestamp: Set(action.timestamp),
                    }
                    .insert(c)
                    .await
                    .map_err(storage)?;
                    insert_detail(c, base.id, &action.detail)
                        .await
                        .map_err(storage)?;

                    let base = BaseStat {
                        id: StatId(base.id),
                        game_id: action.game_id,
                        player_id: action.player_id,
                        action_type,
                        timestamp: base.timestamp,
                    };
                    ActionRecord::new(base, action.detail)
                        .map_err(|e| RepoCreateError::StorageError(e.to_string()))
                })
            })
            .await;
        settle(res, RepoCreateError::StorageError)
    }

    async fn delete_action(
        &self,
        game_id: GameId,
        stat_id: StatId,
    ) -> Result<ActionRecord, RepoRetrieveError> {
        let res = self
            .db
            .transaction::<_, ActionRecord, RepoRetrieveError>(|c| {
                Box::pin(async move {
                    let storage = |e: DbErr| RepoRetrieveError::StorageError(e.to_string());
                    let model = base_stat::Entity::find_by_id(stat_id.0)
                        .filter(base_stat::Column::GameId.eq(game_id.0))
                        .one(c)
                        .await
                        .map_err(storage)?
                        .ok_or(RepoRetrieveError::NotFound)?;
                    let base = Self::model_to_base(&model).map_err(RepoRetrieveError::StorageError)?;

                    let mut details = load_details(c, &[(model.clone(), base.action_type)])
                        .await
                        .map_err(RepoRetrieveError::StorageError)?;
                    let detail = details.remove(&model.id).ok_or_else(|| {
                        RepoRetrieveError::StorageError(format!("stat {} has no detail", stat_id))
                    })?;

                    delete_detail(c, model.id, base.action_type)
                        .await
                        .map_err(storage)?;
                    model.delete(c).await.map_err(storage)?;

                    ActionRecord::new(base, detail)
                        .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))
                })
            })
            .await;
        settle(res, RepoRetrieveError::StorageError)
    }

    async fn find_actions(&self, filter: ActionFilter) -> Result<Vec<ActionRecord>, RepoError> {
        let mut query = base_stat::Entity::find();
        if let Some(game_id) = filter.game_id {
            query = query.filter(base_stat::Column::GameId.eq(game_id.0));
        }
        if let Some(player_id) = filter.player_id {
            query = query.filter(base_stat::Column::PlayerId.eq(player_id.0));
        }
        if let Some(action_type) = filter.action_type {
            query = query.filter(base_stat::Column::ActionType.eq(action_type.as_str()));
        }
        let models = query
            .order_by_desc(base_stat::Column::Timestamp)
            .order_by_asc(base_stat::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let mut bases = Vec::with_capacity(models.len());
        for model in models {
            let base = Self::model_to_base(&model).map_err(RepoError::StorageError)?;
            bases.push((model, base.action_type));
        }
        let mut details = load_details(&self.db, &bases)
            .await
            .map_err(RepoError::StorageError)?;

        let mut records = Vec::with_capacity(bases.len());
        for (model, _) in &bases {
            let Some(detail) = details.remove(&model.id) else {
                log::warn!("Skipping stat {} without a detail record", model.id);
                continue;
            };
            let base = Self::model_to_base(model).map_err(RepoError::StorageError)?;
            match ActionRecord::new(base, detail) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping inconsistent stat: {}", e),
            }
        }
        Ok(records)
    }
}
