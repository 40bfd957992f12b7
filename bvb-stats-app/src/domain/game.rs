use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    GameId, PlayerId, RepoCreateError, RepoDeleteError, RepoError, RepoRetrieveError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub date: NaiveDate,
    pub team1: Vec<PlayerId>,
    pub team2: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Team1,
    Team2,
}

impl Game {
    pub fn team_of(&self, player_id: PlayerId) -> Option<TeamSide> {
        if self.team1.contains(&player_id) {
            Some(TeamSide::Team1)
        } else if self.team2.contains(&player_id) {
            Some(TeamSide::Team2)
        } else {
            None
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.team_of(player_id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub date: NaiveDate,
    pub team1: Vec<PlayerId>,
    pub team2: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRoster {
    #[error("{0:?} has no players")]
    EmptyTeam(TeamSide),
    #[error("player {0} is listed twice on the same team")]
    DuplicatePlayer(PlayerId),
    #[error("player {0} cannot play on both teams")]
    PlayerOnBothTeams(PlayerId),
}

impl NewGame {
    pub fn validate_roster(&self) -> Result<(), InvalidRoster> {
        Self::team_set(&self.team1, TeamSide::Team1)?;
        let team2 = Self::team_set(&self.team2, TeamSide::Team2)?;
        match self.team1.iter().find(|id| team2.contains(id)) {
            Some(player_id) => Err(InvalidRoster::PlayerOnBothTeams(*player_id)),
            None => Ok(()),
        }
    }

    fn team_set(team: &[PlayerId], side: TeamSide) -> Result<HashSet<PlayerId>, InvalidRoster> {
        if team.is_empty() {
            return Err(InvalidRoster::EmptyTeam(side));
        }
        let mut seen = HashSet::with_capacity(team.len());
        for player_id in team {
            if !seen.insert(*player_id) {
                return Err(InvalidRoster::DuplicatePlayer(*player_id));
            }
        }
        Ok(seen)
    }

    /// Every player on either team, team1 first.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team1.iter().chain(self.team2.iter()).copied()
    }
}

#[async_trait::async_trait]
pub trait GameRepository {
    /// Fails with `MissingReference` when a rostered player does not exist.
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError>;
    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError>;
    /// Newest games first; games on the same date are ordered by descending id.
    async fn list_games(&self) -> Result<Vec<Game>, RepoError>;
    /// Fails with `InUse` while the game owns action records.
    async fn delete_game(&self, id: GameId) -> Result<Game, RepoDeleteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(team1: &[i32], team2: &[i32]) -> NewGame {
        NewGame {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            team1: team1.iter().copied().map(PlayerId).collect(),
            team2: team2.iter().copied().map(PlayerId).collect(),
        }
    }

    #[test]
    fn test_validate_roster() {
        assert_eq!(new_game(&[1, 2], &[3, 4]).validate_roster(), Ok(()));
        assert_eq!(new_game(&[1], &[2]).validate_roster(), Ok(()));
        assert_eq!(
            new_game(&[], &[2]).validate_roster(),
            Err(InvalidRoster::EmptyTeam(TeamSide::Team1))
        );
        assert_eq!(
            new_game(&[1], &[]).validate_roster(),
            Err(InvalidRoster::EmptyTeam(TeamSide::Team2))
        );
        assert_eq!(
            new_game(&[1, 1], &[2]).validate_roster(),
            Err(InvalidRoster::DuplicatePlayer(PlayerId(1)))
        );
        assert_eq!(
            new_game(&[1, 2], &[3, 2]).validate_roster(),
            Err(InvalidRoster::PlayerOnBothTeams(PlayerId(2)))
        );
    }

    #[test]
    fn test_team_of() {
        let game = Game {
            id: GameId(1),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            team1: vec![PlayerId(1), PlayerId(2)],
            team2: vec![PlayerId(3)],
        };
        assert_eq!(game.team_of(PlayerId(2)), Some(TeamSide::Team1));
        assert_eq!(game.team_of(PlayerId(3)), Some(TeamSide::Team2));
        assert_eq!(game.team_of(PlayerId(4)), None);
        assert!(!game.has_player(PlayerId(4)));
    }
}
