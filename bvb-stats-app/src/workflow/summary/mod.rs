use thiserror::Error;

use crate::domain::{
    GameId, PlayerId, RepoError, RepoRetrieveError,
    action::{ActionFilter, ActionRecord, ActionRepository},
    game::{Game, GameRepository},
    player::{Player, PlayerRepository},
};

pub mod overview;
pub mod player_game;
pub mod player_totals;

#[derive(Debug, Error)]
pub enum StatsQueryError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("repository error")]
    RepositoryError,
}

/// A player with headline numbers across every game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerOverview {
    pub player: Player,
    /// Games whose roster lists the player.
    pub games_played: u32,
    pub total_kills: u32,
    pub total_aces: u32,
}

async fn load_player<P: PlayerRepository + Send + Sync>(
    player_repo: &P,
    player_id: PlayerId,
) -> Result<Player, StatsQueryError> {
    match player_repo.get_player(player_id).await {
        Ok(player) => Ok(player),
        Err(RepoRetrieveError::NotFound) => Err(StatsQueryError::PlayerNotFound(player_id)),
        Err(RepoRetrieveError::StorageError(e)) => {
            log::error!("Failed to retrieve player {}: {}", player_id, e);
            Err(StatsQueryError::RepositoryError)
        }
    }
}

async fn load_game<G: GameRepository + Send + Sync>(
    game_repo: &G,
    game_id: GameId,
) -> Result<Game, StatsQueryError> {
    match game_repo.get_game(game_id).await {
        Ok(game) => Ok(game),
        Err(RepoRetrieveError::NotFound) => Err(StatsQueryError::GameNotFound(game_id)),
        Err(RepoRetrieveError::StorageError(e)) => {
            log::error!("Failed to retrieve game {}: {}", game_id, e);
            Err(StatsQueryError::RepositoryError)
        }
    }
}

async fn load_actions<A: ActionRepository + Send + Sync>(
    action_repo: &A,
    filter: ActionFilter,
) -> Result<Vec<ActionRecord>, StatsQueryError> {
    match action_repo.find_actions(filter).await {
        Ok(records) => Ok(records),
        Err(RepoError::StorageError(e)) => {
            log::error!("Failed to load actions for summary: {}", e);
            Err(StatsQueryError::RepositoryError)
        }
    }
}
