use std::{collections::HashMap, sync::Arc};

use crate::{
    domain::{
        PlayerId, RepoError,
        action::{ActionFilter, ActionRepository},
        game::GameRepository,
        player::PlayerRepository,
        summary::StatSummary,
    },
    workflow::summary::{PlayerOverview, StatsQueryError, load_actions},
};

#[async_trait::async_trait]
pub trait PlayersOverviewUseCase {
    /// Every player ordered by name.
    async fn players_overview(&self) -> Result<Vec<PlayerOverview>, StatsQueryError>;
}

pub struct PlayersOverviewUseCaseImpl<G: GameRepository, P: PlayerRepository, A: ActionRepository>
{
    game_repo: Arc<G>,
    player_repo: Arc<P>,
    action_repo: Arc<A>,
}

impl<G: GameRepository, P: PlayerRepository, A: ActionRepository>
    PlayersOverviewUseCaseImpl<G, P, A>
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
> PlayersOverviewUseCase for PlayersOverviewUseCaseImpl<G, P, A>
{
    async fn players_overview(&self) -> Result<Vec<PlayerOverview>, StatsQueryError> {
        let players = match self.player_repo.list_players().await {
            Ok(players) => players,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list players: {}", e);
                return Err(StatsQueryError::RepositoryError);
            }
        };
        let games = match self.game_repo.list_games().await {
            Ok(games) => games,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list games: {}", e);
                return Err(StatsQueryError::RepositoryError);
            }
        };
        let records = load_actions(self.action_repo.as_ref(), ActionFilter::default()).await?;

        let mut games_played: HashMap<PlayerId, u32> = HashMap::new();
        for game in &games {
            for player_id in game.team1.iter().chain(game.team2.iter()) {
                *games_played.entry(*player_id).or_insert(0) += 1;
            }
        }
        let mut summaries: HashMap<PlayerId, StatSummary> = HashMap::new();
        for record in &records {
            summaries
                .entry(record.base().player_id)
                .or_default()
                .record(record.detail());
        }

        Ok(players
            .into_iter()
            .map(|player| {
                let summary = summaries.remove(&player.id).unwrap_or_default();
                PlayerOverview {
                    games_played: games_played.get(&player.id).copied().unwrap_or(0),
                    total_kills: summary.attack.kills,
                    total_aces: summary.serving.aces,
                    player,
                }
            })
            .collect())
    }
}
