use std::sync::Arc;

use crate::{
    domain::{
        GameId, PlayerId,
        action::{ActionFilter, ActionRepository},
        game::GameRepository,
        player::PlayerRepository,
        summary::{PlayerGameStats, StatSummary},
    },
    workflow::summary::{StatsQueryError, load_actions, load_game, load_player},
};

#[async_trait::async_trait]
pub trait PlayerGameStatsUseCase {
    async fn player_game_stats(
        &self,
        player_id: PlayerId,
        game_id: GameId,
    ) -> Result<PlayerGameStats, StatsQueryError>;
}

pub struct PlayerGameStatsUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository>
{
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository>
    PlayerGameStatsUseCaseImpl<G, P, A>
{
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
> PlayerGameStatsUseCase for PlayerGameStatsUseCaseImpl<G, P, A>
{
    async fn player_game_stats(
        &self,
        player_id: PlayerId,
        game_id: GameId,
    ) -> Result<PlayerGameStats, StatsQueryError> {
        let player = load_player(self.player_repo.as_ref(), player_id).await?;
        let game = load_game(self.game_repo.as_ref(), game_id).await?;
        let records = load_actions(
            self.action_repo.as_ref(),
            ActionFilter {
                game_id: Some(game_id),
                player_id: Some(player_id),
                action_type: None,
            },
        )
        .await?;
        Ok(PlayerGameStats {
            player,
            game,
            summary: StatSummary::from_records(&records),
        })
    }
}
