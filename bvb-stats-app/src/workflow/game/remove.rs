use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    GameId, RepoDeleteError,
    game::{Game, GameRepository},
};

#[async_trait::async_trait]
pub trait RemoveGameUseCase {
    async fn remove_game(&self, id: GameId) -> Result<Game, RemoveGameError>;
}

#[derive(Debug, Error)]
pub enum RemoveGameError {
    #[error("game not found")]
    NotFound,
    #[error("game still has recorded stats")]
    InUse,
    #[error("repository error")]
    RepositoryError,
}

pub struct RemoveGameUseCaseImpl<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> RemoveGameUseCaseImpl<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> RemoveGameUseCase for RemoveGameUseCaseImpl<G> {
    async fn remove_game(&self, id: GameId) -> Result<Game, RemoveGameError> {
        match self.game_repo.delete_game(id).await {
            Ok(game) => {
                log::info!("Removed game {}", game.id);
                Ok(game)
            }
            Err(RepoDeleteError::NotFound) => Err(RemoveGameError::NotFound),
            Err(RepoDeleteError::InUse) => Err(RemoveGameError::InUse),
            Err(RepoDeleteError::StorageError(e)) => {
                log::error!("Failed to remove game {}: {}", id, e);
                Err(RemoveGameError::RepositoryError)
            }
        }
    }
}
