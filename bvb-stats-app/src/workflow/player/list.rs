use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    RepoError,
    player::{Player, PlayerRepository},
};

#[async_trait::async_trait]
pub trait ListPlayersUseCase {
    async fn list_players(&self) -> Result<Vec<Player>, ListPlayersError>;
}

#[derive(Debug, Error)]
pub enum ListPlayersError {
    #[error("repository error")]
    RepositoryError,
}

pub struct ListPlayersUseCaseImpl<P: PlayerRepository> {
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> ListPlayersUseCaseImpl<P> {
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> ListPlayersUseCase
    for ListPlayersUseCaseImpl<P>
{
    async fn list_players(&self) -> Result<Vec<Player>, ListPlayersError> {
        match self.player_repo.list_players().await {
            Ok(players) => Ok(players),
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list players: {}", e);
                Err(ListPlayersError::RepositoryError)
            }
        }
    }
}
