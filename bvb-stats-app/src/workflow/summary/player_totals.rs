use std::sync::Arc;

use crate::{
    domain::{
        GameId, PlayerId,
        action::{ActionFilter, ActionRepository},
        game::GameRepository,
        player::PlayerRepository,
        summary::StatSummary,
    },
    workflow::summary::{StatsQueryError, load_actions, load_game, load_player},
};

#[async_trait::async_trait]
pub trait PlayerTotalsUseCase {
    /// Counters over all of a player's actions, or only those of one game.
    async fn player_totals(
        &self,
        player_id: PlayerId,
        game_id: Option<GameId>,
    ) -> Result<StatSummary, StatsQueryError>;
}

pub struct PlayerTotalsUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository> {
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository> PlayerTotalsUseCaseImpl<G, P, A> {
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
> PlayerTotalsUseCase for PlayerTotalsUseCaseImpl<G, P, A>
{
    async fn player_totals(
        &self,
        player_id: PlayerId,
        game_id: Option<GameId>,
    ) -> Result<StatSummary, StatsQueryError> {
        load_player(self.player_repo.as_ref(), player_id).await?;
        if let Some(game_id) = game_id {
            load_game(self.game_repo.as_ref(), game_id).await?;
        }
        let records = load_actions(
            self.action_repo.as_ref(),
            ActionFilter {
                game_id,
                player_id: Some(player_id),
                action_type: None,
            },
        )
        .await?;
        Ok(StatSummary::from_records(&records))
    }
}
