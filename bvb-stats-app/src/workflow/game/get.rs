use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    GameId, RepoRetrieveError,
    game::{Game, GameRepository},
};

#[async_trait::async_trait]
pub trait GetGameUseCase {
    async fn get_game(&self, id: GameId) -> Result<Game, GetGameError>;
}

#[derive(Debug, Error)]
pub enum GetGameError {
    #[error("game not found")]
    NotFound,
    #[error("repository error")]
    RepositoryError,
}

pub struct GetGameUseCaseImpl<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> GetGameUseCaseImpl<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> GetGameUseCase for GetGameUseCaseImpl<G> {
    async fn get_game(&self, id: GameId) -> Result<Game, GetGameError> {
        match self.game_repo.get_game(id).await {
            Ok(game) => Ok(game),
            Err(RepoRetrieveError::NotFound) => Err(GetGameError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve game {}: {}", id, e);
                Err(GetGameError::RepositoryError)
            }
        }
    }
}
