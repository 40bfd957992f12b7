use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    PlayerId, Reference, RepoCreateError,
    game::{Game, GameRepository, InvalidRoster, NewGame},
};

#[async_trait::async_trait]
pub trait CreateGameUseCase {
    async fn create_game(&self, game: NewGame) -> Result<Game, CreateGameError>;
}

#[derive(Debug, Error)]
pub enum CreateGameError {
    #[error(transparent)]
    InvalidRoster(#[from] InvalidRoster),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("repository error")]
    RepositoryError,
}

pub struct CreateGameUseCaseImpl<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> CreateGameUseCaseImpl<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> CreateGameUseCase for CreateGameUseCaseImpl<G> {
    async fn create_game(&self, game: NewGame) -> Result<Game, CreateGameError> {
        game.validate_roster()?;
        match self.game_repo.create_game(game).await {
            Ok(game) => {
                log::info!("Created game {} on {}", game.id, game.date);
                Ok(game)
            }
            Err(RepoCreateError::MissingReference(Reference::Player(player_id))) => {
                Err(CreateGameError::PlayerNotFound(player_id))
            }
            Err(e) => {
                log::error!("Failed to create game: {}", e);
                Err(CreateGameError::RepositoryError)
            }
        }
    }
}
