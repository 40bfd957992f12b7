use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{
        GameId, PlayerId, RepoError, RepoRetrieveError,
        action::{ActionFilter, ActionRepository, ActionType},
        game::GameRepository,
        player::PlayerRepository,
    },
    workflow::{ActionView, action::with_player_names},
};

#[async_trait::async_trait]
pub trait ListActionsUseCase {
    /// Actions of one game, newest first.
    async fn list_game_actions(
        &self,
        game_id: GameId,
        player_id: Option<PlayerId>,
        action_type: Option<ActionType>,
    ) -> Result<Vec<ActionView>, ListActionsError>;

    /// Actions of one player across games, newest first.
    async fn list_player_actions(
        &self,
        player_id: PlayerId,
        game_id: Option<GameId>,
        action_type: Option<ActionType>,
    ) -> Result<Vec<ActionView>, ListActionsError>;
}

#[derive(Debug, Error)]
pub enum ListActionsError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("repository error")]
    RepositoryError,
}

pub struct ListActionsUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository> {
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository> ListActionsUseCaseImpl<G, P, A> {
    pub fn new(game_repo: Arc<G>, player_repo: Arc<P>, action_repo: Arc<A>) -> Self {
        Self {
            game_repo,
            player_repo,
            action_repo,
        }
    }
}

impl<
    G: GameRepository + Send + Sync + 'static,
    P: PlayerRepository + Send + Sync + 'static,
    A: ActionRepository + Send + Sync + 'static,
> ListActionsUseCaseImpl<G, P, A>
{
    async fn ensure_game(&self, game_id: GameId) -> Result<(), ListActionsError> {
        match self.game_repo.get_game(game_id).await {
            Ok(_) => Ok(()),
            Err(RepoRetrieveError::NotFound) => Err(ListActionsError::GameNotFound(game_id)),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve game {}: {}", game_id, e);
                Err(ListActionsError::RepositoryError)
            }
        }
    }

    async fn ensure_player(&self, player_id: PlayerId) -> Result<(), ListActionsError> {
        match self.player_repo.get_player(player_id).await {
            Ok(_) => Ok(()),
            Err(RepoRetrieveError::NotFound) => Err(ListActionsError::PlayerNotFound(player_id)),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve player {}: {}", player_id, e);
                Err(ListActionsError::RepositoryError)
            }
        }
    }

    async fn find(&self, filter: ActionFilter) -> Result<Vec<ActionView>, ListActionsError> {
        let records = match self.action_repo.find_actions(filter.clone()).await {
            Ok(records) => records,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list actions for {:?}: {}", filter, e);
                return Err(ListActionsError::RepositoryError);
            }
        };
        with_player_names(self.player_repo.as_ref(), records)
            .await
            .map_err(|e| {
                log::error!("Failed to resolve player names: {}", e);
                ListActionsError::RepositoryError
            })
    }
}

#[async_trait::async_trait]
impl<
    G: GameRepository + Send + Sync + 'static,
    P: PlayerRepository + Send + Sync + 'static,
    A: ActionRepository + Send + Sync + 'static,
> ListActionsUseCase for ListActionsUseCaseImpl<G, P, A>
{
    async fn list_game_actions(
        &self,
        game_id: GameId,
        player_id: Option<PlayerId>,
        action_type: Option<ActionType>,
    ) -> Result<Vec<ActionView>, ListActionsError> {
        self.ensure_game(game_id).await?;
        self.find(ActionFilter {
            game_id: Some(game_id),
            player_id,
            action_type,
        })
        .await
    }

    async fn list_player_actions(
        &self,
        player_id: PlayerId,
        game_id: Option<GameId>,
        action_type: Option<ActionType>,
    ) -> Result<Vec<ActionView>, ListActionsError> {
        self.ensure_player(player_id).await?;
        if let Some(game_id) = game_id {
            self.ensure_game(game_id).await?;
        }
        self.find(ActionFilter {
            game_id,
            player_id: Some(player_id),
            action_type,
        })
        .await
    }
}
