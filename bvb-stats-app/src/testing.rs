//! In-memory repositories for use-case tests.

use std::{collections::BTreeMap, sync::Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{
    GameId, PlayerId, Reference, RepoCreateError, RepoDeleteError, RepoError, RepoRetrieveError,
    RepoUpdateError, StatId,
    action::{ActionFilter, ActionRecord, ActionRepository, BaseStat, NewAction},
    game::{Game, GameRepository, NewGame},
    player::{Player, PlayerRepository},
};

#[derive(Default)]
struct State {
    players: BTreeMap<PlayerId, Player>,
    games: BTreeMap<GameId, Game>,
    actions: BTreeMap<StatId, ActionRecord>,
    last_player_id: i32,
    last_game_id: i32,
    last_stat_id: i32,
    unavailable: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

const UNAVAILABLE: &str = "store unavailable";

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    pub fn action_count(&self) -> usize {
        self.state.lock().unwrap().actions.len()
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, second).unwrap()
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryStore {
    async fn create_player(&self, name: &str) -> Result<Player, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoCreateError::StorageError(UNAVAILABLE.to_string()));
        }
        if state.players.values().any(|p| p.name == name) {
            return Err(RepoCreateError::Conflict);
        }
        state.last_player_id += 1;
        let player = Player {
            id: PlayerId(state.last_player_id),
            name: name.to_string(),
        };
        state.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoRetrieveError::StorageError(UNAVAILABLE.to_string()));
        }
        state
            .players
            .get(&id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_players(&self) -> Result<Vec<Player>, RepoError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoError::StorageError(UNAVAILABLE.to_string()));
        }
        let mut players: Vec<Player> = state.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player, RepoUpdateError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoUpdateError::StorageError(UNAVAILABLE.to_string()));
        }
        if state.players.values().any(|p| p.name == name && p.id != id) {
            return Err(RepoUpdateError::Conflict);
        }
        let player = state.players.get_mut(&id).ok_or(RepoUpdateError::NotFound)?;
        player.name = name.to_string();
        Ok(player.clone())
    }

    async fn delete_player(&self, id: PlayerId) -> Result<Player, RepoDeleteError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoDeleteError::StorageError(UNAVAILABLE.to_string()));
        }
        if !state.players.contains_key(&id) {
            return Err(RepoDeleteError::NotFound);
        }
        let has_actions = state.actions.values().any(|a| a.base().player_id == id);
        let on_roster = state.games.values().any(|g| g.has_player(id));
        if has_actions || on_roster {
            return Err(RepoDeleteError::InUse);
        }
        state.players.remove(&id).ok_or(RepoDeleteError::NotFound)
    }
}

#[async_trait::async_trait]
impl GameRepository for InMemoryStore {
    async fn create_game(&self, game: NewGame) -> Result<Game, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoCreateError::StorageError(UNAVAILABLE.to_string()));
        }
        if let Some(missing) = game.players().find(|id| !state.players.contains_key(id)) {
            return Err(RepoCreateError::MissingReference(Reference::Player(missing)));
        }
        state.last_game_id += 1;
        let game = Game {
            id: GameId(state.last_game_id),
            date: game.date,
            team1: game.team1,
            team2: game.team2,
        };
        state.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoRetrieveError::StorageError(UNAVAILABLE.to_string()));
        }
        state
            .games
            .get(&id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_games(&self) -> Result<Vec<Game>, RepoError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoError::StorageError(UNAVAILABLE.to_string()));
        }
        let mut games: Vec<Game> = state.games.values().cloned().collect();
        games.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(games)
    }

    async fn delete_game(&self, id: GameId) -> Result<Game, RepoDeleteError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoDeleteError::StorageError(UNAVAILABLE.to_string()));
        }
        if !state.games.contains_key(&id) {
            return Err(RepoDeleteError::NotFound);
        }
        if state.actions.values().any(|a| a.base().game_id == id) {
            return Err(RepoDeleteError::InUse);
        }
        state.games.remove(&id).ok_or(RepoDeleteError::NotFound)
    }
}

#[async_trait::async_trait]
impl ActionRepository for InMemoryStore {
    async fn insert_action(&self, action: NewAction) -> Result<ActionRecord, RepoCreateError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoCreateError::StorageError(UNAVAILABLE.to_string()));
        }
        if !state.games.contains_key(&action.game_id) {
            return Err(RepoCreateError::MissingReference(Reference::Game(
                action.game_id,
            )));
        }
        if !state.players.contains_key(&action.player_id) {
            return Err(RepoCreateError::MissingReference(Reference::Player(
                action.player_id,
            )));
        }
        state.last_stat_id += 1;
        let base = BaseStat {
            id: StatId(state.last_stat_id),
            game_id: action.game_id,
            player_id: action.player_id,
            action_type: action.action_type(),
            timestamp: action.timestamp,
        };
        let record = ActionRecord::new(base, action.detail)
            .map_err(|e| RepoCreateError::StorageError(e.to_string()))?;
        state.actions.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn delete_action(
        &self,
        game_id: GameId,
        stat_id: StatId,
    ) -> Result<ActionRecord, RepoRetrieveError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoRetrieveError::StorageError(UNAVAILABLE.to_string()));
        }
        match state.actions.get(&stat_id) {
            Some(record) if record.base().game_id == game_id => {}
            _ => return Err(RepoRetrieveError::NotFound),
        }
        state
            .actions
            .remove(&stat_id)
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn find_actions(&self, filter: ActionFilter) -> Result<Vec<ActionRecord>, RepoError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(RepoError::StorageError(UNAVAILABLE.to_string()));
        }
        let mut records: Vec<ActionRecord> = state
            .actions
            .values()
            .filter(|record| filter.matches(record.base()))
            .cloned()
            .collect();
        records.sort_by(ActionRecord::listing_order);
        Ok(records)
    }
}
