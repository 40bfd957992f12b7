use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    PlayerId, RepoDeleteError,
    player::{Player, PlayerRepository},
};

#[async_trait::async_trait]
pub trait RemovePlayerUseCase {
    async fn remove_player(&self, id: PlayerId) -> Result<Player, RemovePlayerError>;
}

#[derive(Debug, Error)]
pub enum RemovePlayerError {
    #[error("player not found")]
    NotFound,
    #[error("player still has recorded stats or is on a game roster")]
    InUse,
    #[error("repository error")]
    RepositoryError,
}

pub struct RemovePlayerUseCaseImpl<P: PlayerRepository> {
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> RemovePlayerUseCaseImpl<P> {
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> RemovePlayerUseCase
    for RemovePlayerUseCaseImpl<P>
{
    async fn remove_player(&self, id: PlayerId) -> Result<Player, RemovePlayerError> {
        match self.player_repo.delete_player(id).await {
            Ok(player) => {
                log::info!("Removed player {} ({})", player.id, player.name);
                Ok(player)
            }
            Err(RepoDeleteError::NotFound) => Err(RemovePlayerError::NotFound),
            Err(RepoDeleteError::InUse) => Err(RemovePlayerError::InUse),
            Err(RepoDeleteError::StorageError(e)) => {
                log::error!("Failed to remove player {}: {}", id, e);
                Err(RemovePlayerError::RepositoryError)
            }
        }
    }
}
