use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{GameId, PlayerId, RepoCreateError, RepoError, RepoRetrieveError, StatId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a fieldless enum that round-trips through a fixed lowercase name,
/// both in JSON and in storage columns.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

named_enum!(ActionType {
    Serving => "serving",
    ServeReceive => "serve_receive",
    Attack => "attack",
    Block => "block",
    Dig => "dig",
    Set => "set",
});

named_enum!(ServeType {
    Float => "float",
    Hybrid => "hybrid",
    Topspin => "topspin",
    Jump => "jump",
});

named_enum!(AttackType {
    Hard => "hard",
    Roll => "roll",
    Tip => "tip",
});

named_enum!(AttackDirection {
    Line => "line",
    Angle => "angle",
    Cut => "cut",
    Jumbo => "jumbo",
});

named_enum!(SetType {
    Bump => "bump",
    Hand => "hand",
    Jump => "jump",
});

named_enum!(DigQuality {
    Good => "good",
    Playable => "playable",
    Poor => "poor",
});

/// Quality of a pass on a 0 (poor) to 3 (perfect) scale. Serialized as the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PassRating {
    Poor = 0,
    Playable = 1,
    Good = 2,
    Perfect = 3,
}

impl PassRating {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<PassRating> for u8 {
    fn from(rating: PassRating) -> Self {
        rating.value()
    }
}

impl TryFrom<u8> for PassRating {
    type Error = UnknownVariant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PassRating::Poor),
            1 => Ok(PassRating::Playable),
            2 => Ok(PassRating::Good),
            3 => Ok(PassRating::Perfect),
            _ => Err(UnknownVariant {
                kind: "PassRating",
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PassRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeDetail {
    pub is_ace: bool,
    pub is_missed: bool,
    pub serve_type: Option<ServeType>,
    /// Court zone the serve was aimed at.
    pub serve_target: Option<String>,
    pub opponent_pass_quality: Option<PassRating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiveDetail {
    pub is_good_pass: bool,
    pub is_error: bool,
    pub pass_rating: Option<PassRating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackDetail {
    pub is_kill: bool,
    pub is_error: bool,
    pub is_blocked: bool,
    pub attack_type: Option<AttackType>,
    pub attack_direction: Option<AttackDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDetail {
    pub is_stuff: bool,
    pub is_touch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigDetail {
    pub is_successful: bool,
    pub led_to_kill: bool,
    pub dig_quality: Option<DigQuality>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetDetail {
    pub is_killable: bool,
    pub is_error: bool,
    pub set_type: Option<SetType>,
}

/// The action-specific half of a stat. Exactly one variant exists per base stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionDetail {
    Serve(ServeDetail),
    Receive(ReceiveDetail),
    Attack(AttackDetail),
    Block(BlockDetail),
    Dig(DigDetail),
    Set(SetDetail),
}

impl ActionDetail {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionDetail::Serve(_) => ActionType::Serving,
            ActionDetail::Receive(_) => ActionType::ServeReceive,
            ActionDetail::Attack(_) => ActionType::Attack,
            ActionDetail::Block(_) => ActionType::Block,
            ActionDetail::Dig(_) => ActionType::Dig,
            ActionDetail::Set(_) => ActionType::Set,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStat {
    pub id: StatId,
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub action_type: ActionType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stat {stat_id} is a {action_type} but carries a {detail_type} detail")]
pub struct DetailMismatch {
    pub stat_id: StatId,
    pub action_type: ActionType,
    pub detail_type: ActionType,
}

/// A base stat together with its detail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    base: BaseStat,
    detail: ActionDetail,
}

impl ActionRecord {
    pub fn new(base: BaseStat, detail: ActionDetail) -> Result<Self, DetailMismatch> {
        if base.action_type != detail.action_type() {
            return Err(DetailMismatch {
                stat_id: base.id,
                action_type: base.action_type,
                detail_type: detail.action_type(),
            });
        }
        Ok(Self { base, detail })
    }

    pub fn base(&self) -> &BaseStat {
        &self.base
    }

    pub fn detail(&self) -> &ActionDetail {
        &self.detail
    }

    pub fn id(&self) -> StatId {
        self.base.id
    }

    pub fn into_parts(self) -> (BaseStat, ActionDetail) {
        (self.base, self.detail)
    }

    /// Listing order: newest first, equal timestamps in insertion order.
    pub fn listing_order(a: &ActionRecord, b: &ActionRecord) -> Ordering {
        b.base
            .timestamp
            .cmp(&a.base.timestamp)
            .then_with(|| a.base.id.cmp(&b.base.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAction {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub timestamp: DateTime<Utc>,
    pub detail: ActionDetail,
}

impl NewAction {
    pub fn action_type(&self) -> ActionType {
        self.detail.action_type()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    pub game_id: Option<GameId>,
    pub player_id: Option<PlayerId>,
    pub action_type: Option<ActionType>,
}

impl ActionFilter {
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            game_id: Some(game_id),
            ..Default::default()
        }
    }

    pub fn for_player(player_id: PlayerId) -> Self {
        Self {
            player_id: Some(player_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, base: &BaseStat) -> bool {
        self.game_id.is_none_or(|id| id == base.game_id)
            && self.player_id.is_none_or(|id| id == base.player_id)
            && self.action_type.is_none_or(|t| t == base.action_type)
    }
}

#[async_trait::async_trait]
pub trait ActionRepository {
    /// Writes the base stat and its detail in one transaction. Fails with
    /// `MissingReference` when the game or the player does not exist.
    async fn insert_action(&self, action: NewAction) -> Result<ActionRecord, RepoCreateError>;
    /// Removes the base stat and its detail in one transaction. `NotFound` also
    /// covers a stat that belongs to another game.
    async fn delete_action(
        &self,
        game_id: GameId,
        stat_id: StatId,
    ) -> Result<ActionRecord, RepoRetrieveError>;
    /// Matching records in listing order.
    async fn find_actions(&self, filter: ActionFilter) -> Result<Vec<ActionRecord>, RepoError>;
}
