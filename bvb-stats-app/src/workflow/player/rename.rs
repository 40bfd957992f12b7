use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    PlayerId, RepoUpdateError,
    player::{Player, PlayerRepository, validate_player_name},
};

#[async_trait::async_trait]
pub trait RenamePlayerUseCase {
    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player, RenamePlayerError>;
}

#[derive(Debug, Error)]
pub enum RenamePlayerError {
    #[error("{0}")]
    InvalidName(String),
    #[error("player not found")]
    NotFound,
    #[error("a player with this name already exists")]
    NameTaken,
    #[error("repository error")]
    RepositoryError,
}

pub struct RenamePlayerUseCaseImpl<P: PlayerRepository> {
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> RenamePlayerUseCaseImpl<P> {
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> RenamePlayerUseCase
    for RenamePlayerUseCaseImpl<P>
{
    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player, RenamePlayerError> {
        let name =
            validate_player_name(name).map_err(|e| RenamePlayerError::InvalidName(e.0))?;
        match self.player_repo.rename_player(id, &name).await {
            Ok(player) => Ok(player),
            Err(RepoUpdateError::NotFound) => Err(RenamePlayerError::NotFound),
            Err(RepoUpdateError::Conflict) => Err(RenamePlayerError::NameTaken),
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!("Failed to rename player {}: {}", id, e);
                Err(RenamePlayerError::RepositoryError)
            }
        }
    }
}
