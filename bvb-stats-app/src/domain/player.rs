use thiserror::Error;
use validator::Validate;

use crate::domain::{
    PlayerId, RepoCreateError, RepoDeleteError, RepoError, RepoRetrieveError, RepoUpdateError,
};

pub const MAX_PLAYER_NAME_LENGTH: usize = 64;
// `validator` length bounds are u64.
const MAX_PLAYER_NAME_LENGTH_U64: u64 = MAX_PLAYER_NAME_LENGTH as u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// Fails with `Conflict` when the name is already taken.
    async fn create_player(&self, name: &str) -> Result<Player, RepoCreateError>;
    async fn get_player(&self, id: PlayerId) -> Result<Player, RepoRetrieveError>;
    /// All players ordered by name.
    async fn list_players(&self) -> Result<Vec<Player>, RepoError>;
    /// Fails with `Conflict` when another player already uses the name.
    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player, RepoUpdateError>;
    /// Fails with `InUse` while the player owns action records or sits on a game roster.
    async fn delete_player(&self, id: PlayerId) -> Result<Player, RepoDeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid player name: {0}")]
pub struct InvalidPlayerName(pub String);

#[derive(Validate)]
struct PlayerNameValidator {
    #[validate(length(min = 1, max = MAX_PLAYER_NAME_LENGTH_U64))]
    name: String,
}

/// Trims the name and checks its length.
pub fn validate_player_name(name: &str) -> Result<String, InvalidPlayerName> {
    let validator = PlayerNameValidator {
        name: name.trim().to_string(),
    };
    if validator.name.is_empty() {
        return Err(InvalidPlayerName("name is required".to_string()));
    }
    if let Err(e) = validator.validate() {
        return Err(InvalidPlayerName(e.to_string()));
    }
    Ok(validator.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name() {
        assert_eq!(validate_player_name("  Alice ").unwrap(), "Alice");
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());

        let long_name = "x".repeat(MAX_PLAYER_NAME_LENGTH + 1);
        assert!(validate_player_name(&long_name).is_err());

        let max_name = "x".repeat(MAX_PLAYER_NAME_LENGTH);
        assert_eq!(validate_player_name(&max_name).unwrap(), max_name);
    }
}
