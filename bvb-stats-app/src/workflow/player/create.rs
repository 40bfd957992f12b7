use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    RepoCreateError,
    player::{Player, PlayerRepository, validate_player_name},
};

#[async_trait::async_trait]
pub trait CreatePlayerUseCase {
    async fn create_player(&self, name: &str) -> Result<Player, CreatePlayerError>;
}

#[derive(Debug, Error)]
pub enum CreatePlayerError {
    #[error("{0}")]
    InvalidName(String),
    #[error("a player with this name already exists")]
    NameTaken,
    #[error("repository error")]
    RepositoryError,
}

pub struct CreatePlayerUseCaseImpl<P: PlayerRepository> {
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> CreatePlayerUseCaseImpl<P> {
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> CreatePlayerUseCase
    for CreatePlayerUseCaseImpl<P>
{
    async fn create_player(&self, name: &str) -> Result<Player, CreatePlayerError> {
        let name =
            validate_player_name(name).map_err(|e| CreatePlayerError::InvalidName(e.0))?;
        match self.player_repo.create_player(&name).await {
            Ok(player) => {
                log::info!("Created player {} ({})", player.id, player.name);
                Ok(player)
            }
            Err(RepoCreateError::Conflict) => Err(CreatePlayerError::NameTaken),
            Err(e) => {
                log::error!("Failed to create player '{}': {}", name, e);
                Err(CreatePlayerError::RepositoryError)
            }
        }
    }
}
