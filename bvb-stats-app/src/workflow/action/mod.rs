use std::collections::HashMap;

use crate::{
    domain::{RepoError, action::ActionRecord, player::PlayerRepository},
    workflow::ActionView,
};

pub mod list;
pub mod record;
pub mod remove;

/// Attaches player names to records, looking all players up at once.
async fn with_player_names<P: PlayerRepository + Send + Sync>(
    player_repo: &P,
    records: Vec<ActionRecord>,
) -> Result<Vec<ActionView>, RepoError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let names: HashMap<_, _> = player_repo
        .list_players()
        .await?
        .into_iter()
        .map(|player| (player.id, player.name))
        .collect();
    Ok(records
        .into_iter()
        .map(|record| {
            let player_name = names.get(&record.base().player_id).cloned();
            ActionView {
                record,
                player_name,
            }
        })
        .collect())
}
