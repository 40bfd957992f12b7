use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    domain::{
        GameId, PlayerId, Reference, RepoCreateError, RepoRetrieveError,
        action::{ActionDetail, ActionRepository, ActionType, NewAction},
        game::GameRepository,
        player::PlayerRepository,
    },
    workflow::ActionView,
};

#[async_trait::async_trait]
pub trait RecordActionUseCase {
    /// Stores a base stat and its detail. A missing timestamp means now.
    async fn record_action(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action_type: ActionType,
        timestamp: Option<DateTime<Utc>>,
        detail: ActionDetail,
    ) -> Result<ActionView, RecordActionError>;
}

#[derive(Debug, Error)]
pub enum RecordActionError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("action type {action_type} does not match {detail_type} details")]
    DetailMismatch {
        action_type: ActionType,
        detail_type: ActionType,
    },
    #[error("player {player_id} is not on a team of game {game_id}")]
    PlayerNotOnRoster { game_id: GameId, player_id: PlayerId },
    #[error("repository error")]
    RepositoryError,
}

pub struct RecordActionUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository> {
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository> RecordActionUseCaseImpl<G, P, A> {
    pub fn new(game_repo: Arc<G>, player_repo: Arc<P>, action_repo: Arc<A>) -> Self {
        Self {
            game_repo,
            player_repo,
            action_repo,
        }
    }
}

#[async_trait::async_trait]
impl<
    G: GameRepository + Send + Sync + 'static,
    P: PlayerRepository + Send + Sync + 'static,
    A: ActionRepository + Send + Sync + 'static,
> RecordActionUseCase for RecordActionUseCaseImpl<G, P, A>
{
    async fn record_action(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action_type: ActionType,
        timestamp: Option<DateTime<Utc>>,
        detail: ActionDetail,
    ) -> Result<ActionView, RecordActionError> {
        if detail.action_type() != action_type {
            return Err(RecordActionError::DetailMismatch {
                action_type,
                detail_type: detail.action_type(),
            });
        }

        let game = match self.game_repo.get_game(game_id).await {
            Ok(game) => game,
            Err(RepoRetrieveError::NotFound) => {
                return Err(RecordActionError::GameNotFound(game_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve game {}: {}", game_id, e);
                return Err(RecordActionError::RepositoryError);
            }
        };
        let player = match self.player_repo.get_player(player_id).await {
            Ok(player) => player,
            Err(RepoRetrieveError::NotFound) => {
                return Err(RecordActionError::PlayerNotFound(player_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve player {}: {}", player_id, e);
                return Err(RecordActionError::RepositoryError);
            }
        };
        if !game.has_player(player_id) {
            return Err(RecordActionError::PlayerNotOnRoster { game_id, player_id });
        }

        let action = NewAction {
            game_id,
            player_id,
            timestamp: timestamp.unwrap_or_else(Utc::now),
            detail,
        };
        match self.action_repo.insert_action(action).await {
            Ok(record) => {
                log::debug!(
                    "Recorded {} stat {} for player {} in game {}",
                    action_type,
                    record.id(),
                    player_id,
                    game_id
                );
                Ok(ActionView {
                    record,
                    player_name: Some(player.name),
                })
            }
            Err(RepoCreateError::MissingReference(Reference::Game(id))) => {
                Err(RecordActionError::GameNotFound(id))
            }
            Err(RepoCreateError::MissingReference(Reference::Player(id))) => {
                Err(RecordActionError::PlayerNotFound(id))
            }
            Err(e) => {
                log::error!("Failed to record action in game {}: {}", game_id, e);
                Err(RecordActionError::RepositoryError)
            }
        }
    }
}
