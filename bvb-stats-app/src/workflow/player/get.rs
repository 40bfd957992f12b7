use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerRepository},
};

#[async_trait::async_trait]
pub trait GetPlayerUseCase {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError>;
}

#[derive(Debug, Error)]
pub enum GetPlayerError {
    #[error("player not found")]
    NotFound,
    #[error("repository error")]
    RepositoryError,
}

pub struct GetPlayerUseCaseImpl<P: PlayerRepository> {
    player_repo: Arc<P>,
}

impl<P: PlayerRepository> GetPlayerUseCaseImpl<P> {
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> GetPlayerUseCase for GetPlayerUseCaseImpl<P> {
    async fn get_player(&self, id: PlayerId) -> Result<Player, GetPlayerError> {
        match self.player_repo.get_player(id).await {
            Ok(player) => Ok(player),
            Err(RepoRetrieveError::NotFound) => Err(GetPlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve player {}: {}", id, e);
                Err(GetPlayerError::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    #[tokio::test]
    async fn test_get_player() {
        let store = Arc::new(InMemoryStore::new());
        let created = store.create_player("April").await.unwrap();
        let use_case = GetPlayerUseCaseImpl::new(store);

        assert_eq!(use_case.get_player(created.id).await.unwrap(), created);
        assert!(matches!(
            use_case.get_player(PlayerId(99)).await,
            Err(GetPlayerError::NotFound)
        ));
    }
}
