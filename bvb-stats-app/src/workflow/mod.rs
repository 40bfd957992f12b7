use crate::domain::action::ActionRecord;

pub mod action;
pub mod game;
pub mod player;
pub mod summary;

/// An action record with the name of the player who performed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionView {
    pub record: ActionRecord,
    /// `None` when the player could not be resolved.
    pub player_name: Option<String>,
}
