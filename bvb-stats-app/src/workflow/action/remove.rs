use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{
        GameId, RepoRetrieveError, StatId, action::ActionRepository, game::GameRepository,
        player::PlayerRepository,
    },
    workflow::ActionView,
};

#[async_trait::async_trait]
pub trait RemoveActionUseCase {
    async fn remove_action(
        &self,
        game_id: GameId,
        stat_id: StatId,
    ) -> Result<ActionView, RemoveActionError>;
}

#[derive(Debug, Error)]
pub enum RemoveActionError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("stat {0} not found")]
    StatNotFound(StatId),
    #[error("repository error")]
    RepositoryError,
}

pub struct RemoveActionUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository> {
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository> RemoveActionUseCaseImpl<G, P, A> {
    pub fn new(game_repo: Arc<G>, player_repo: Arc<P>, action_repo: Arc<A>) -> Self {
        Self {
            game_repo,
            player_repo,
            action_repo,
        }
    }
}

#[async_trait::async_trait]
impl<
    G: GameRepository + Send + Sync + 'static,
    P: PlayerRepository + Send + Sync + 'static,
    A: ActionRepository + Send + Sync + 'static,
> RemoveActionUseCase for RemoveActionUseCaseImpl<G, P, A>
{
    async fn remove_action(
        &self,
        game_id: GameId,
        stat_id: StatId,
    ) -> Result<ActionView, RemoveActionError> {
        match self.game_repo.get_game(game_id).await {
            Ok(_) => {}
            Err(RepoRetrieveError::NotFound) => {
                return Err(RemoveActionError::GameNotFound(game_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve game {}: {}", game_id, e);
                return Err(RemoveActionError::RepositoryError);
            }
        }

        let record = match self.action_repo.delete_action(game_id, stat_id).await {
            Ok(record) => record,
            Err(RepoRetrieveError::NotFound) => {
                return Err(RemoveActionError::StatNotFound(stat_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to remove stat {} of game {}: {}", stat_id, game_id, e);
                return Err(RemoveActionError::RepositoryError);
            }
        };
        log::debug!("Removed stat {} from game {}", stat_id, game_id);

        let player_name = match self.player_repo.get_player(record.base().player_id).await {
            Ok(player) => Some(player.name),
            Err(e) => {
                log::warn!(
                    "Could not resolve player {} of removed stat {}: {}",
                    record.base().player_id,
                    stat_id,
                    e
                );
                None
            }
        };
        Ok(ActionView {
            record,
            player_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            PlayerId,
            action::{ActionDetail, ActionFilter, NewAction},
            game::NewGame,
        },
        testing::{InMemoryStore, at, date},
    };

    #[tokio::test]
    async fn test_remove_action() {
        let store = Arc::new(InMemoryStore::new());
        let a = store.create_player("A").await.unwrap();
        let b = store.create_player("B").await.unwrap();
        let new_game = NewGame {
            date: date(2024, 1, 1),
            team1: vec![a.id],
            team2: vec![b.id],
        };
        let game = store.create_game(new_game.clone()).await.unwrap();
        let other_game = store.create_game(new_game).await.unwrap();
        let kept = store
            .insert_action(NewAction {
                game_id: game.id,
                player_id: a.id,
                timestamp: at(10, 0, 0),
                detail: ActionDetail::Dig(Default::default()),
            })
            .await
            .unwrap();
        let removed = store
            .insert_action(NewAction {
                game_id: game.id,
                player_id: b.id,
                timestamp: at(10, 0, 5),
                detail: ActionDetail::Set(Default::default()),
            })
            .await
            .unwrap();
        let use_case = RemoveActionUseCaseImpl::new(store.clone(), store.clone(), store.clone());

        assert!(matches!(
            use_case.remove_action(GameId(99), removed.id()).await,
            Err(RemoveActionError::GameNotFound(_))
        ));
        assert!(matches!(
            use_case.remove_action(other_game.id, removed.id()).await,
            Err(RemoveActionError::StatNotFound(_))
        ));

        let view = use_case.remove_action(game.id, removed.id()).await.unwrap();
        assert_eq!(view.record, removed);
        assert_eq!(view.player_name.as_deref(), Some("B"));
        assert_eq!(view.record.base().player_id, PlayerId(2));

        let remaining = store
            .find_actions(ActionFilter::for_game(game.id))
            .await
            .unwrap();
        assert_eq!(remaining, vec![kept]);

        assert!(matches!(
            use_case.remove_action(game.id, removed.id()).await,
            Err(RemoveActionError::StatNotFound(_))
        ));
    }
}
