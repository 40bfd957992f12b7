use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    RepoError,
    game::{Game, GameRepository},
};

#[async_trait::async_trait]
pub trait ListGamesUseCase {
    async fn list_games(&self) -> Result<Vec<Game>, ListGamesError>;
}

#[derive(Debug, Error)]
pub enum ListGamesError {
    #[error("repository error")]
    RepositoryError,
}

pub struct ListGamesUseCaseImpl<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> ListGamesUseCaseImpl<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> ListGamesUseCase for ListGamesUseCaseImpl<G> {
    async fn list_games(&self) -> Result<Vec<Game>, ListGamesError> {
        match self.game_repo.list_games().await {
            Ok(games) => Ok(games),
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list games: {}", e);
                Err(ListGamesError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{game::NewGame, player::PlayerRepository},
        testing::{InMemoryStore, date},
    };

    #[tokio::test]
    async fn test_list_games_newest_first() {
        let store = Arc::new(InMemoryStore::new());
        let a = store.create_player("A").await.unwrap();
        let b = store.create_player("B").await.unwrap();
        for day in [3, 1, 3, 2] {
            store
                .create_game(NewGame {
                    date: date(2024, 6, day),
                    team1: vec![a.id],
                    team2: vec![b.id],
                })
                .await
                .unwrap();
        }
        let use_case = ListGamesUseCaseImpl::new(store);

        let ids: Vec<i32> = use_case
            .list_games()
            .await
            .unwrap()
            .iter()
            .map(|g| g.id.0)
            .collect();
        assert_eq!(ids, vec![3, 1, 4, 2]);
    }
}
