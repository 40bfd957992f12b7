use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    action::{
        ActionDetail, ActionRecord, ActionType, AttackDetail, BlockDetail, DigDetail,
        ReceiveDetail, ServeDetail, SetDetail,
    },
    game::Game,
    player::Player,
};

/// Occurrences per named value, e.g. `{"hard": 3, "tip": 1}`.
pub type KeyedCounter = BTreeMap<String, u32>;

fn bump(counter: &mut KeyedCounter, key: impl ToString) {
    *counter.entry(key.to_string()).or_insert(0) += 1;
}

fn merge_counter(into: &mut KeyedCounter, from: &KeyedCounter) {
    for (key, count) in from {
        *into.entry(key.clone()).or_insert(0) += count;
    }
}

fn count_if(flag: bool) -> u32 {
    u32::from(flag)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServingTotals {
    pub total_serves: u32,
    pub missed_serves: u32,
    pub aces: u32,
    pub serve_types: KeyedCounter,
}

impl ServingTotals {
    fn record(&mut self, serve: &ServeDetail) {
        self.total_serves += 1;
        self.missed_serves += count_if(serve.is_missed);
        self.aces += count_if(serve.is_ace);
        if let Some(serve_type) = serve.serve_type {
            bump(&mut self.serve_types, serve_type);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.total_serves += other.total_serves;
        self.missed_serves += other.missed_serves;
        self.aces += other.aces;
        merge_counter(&mut self.serve_types, &other.serve_types);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiveTotals {
    pub total_receive_attempts: u32,
    pub good_passes: u32,
    pub receive_errors: u32,
    pub pass_ratings: KeyedCounter,
}

impl ReceiveTotals {
    fn record(&mut self, receive: &ReceiveDetail) {
        self.total_receive_attempts += 1;
        self.good_passes += count_if(receive.is_good_pass);
        self.receive_errors += count_if(receive.is_error);
        if let Some(pass_rating) = receive.pass_rating {
            bump(&mut self.pass_ratings, pass_rating);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.total_receive_attempts += other.total_receive_attempts;
        self.good_passes += other.good_passes;
        self.receive_errors += other.receive_errors;
        merge_counter(&mut self.pass_ratings, &other.pass_ratings);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttackTotals {
    pub total_attacks: u32,
    pub kills: u32,
    pub attack_errors: u32,
    pub attacks_blocked: u32,
    pub attack_directions: KeyedCounter,
    pub attack_types: KeyedCounter,
}

impl AttackTotals {
    fn record(&mut self, attack: &AttackDetail) {
        self.total_attacks += 1;
        self.kills += count_if(attack.is_kill);
        self.attack_errors += count_if(attack.is_error);
        self.attacks_blocked += count_if(attack.is_blocked);
        if let Some(direction) = attack.attack_direction {
            bump(&mut self.attack_directions, direction);
        }
        if let Some(attack_type) = attack.attack_type {
            bump(&mut self.attack_types, attack_type);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.total_attacks += other.total_attacks;
        self.kills += other.kills;
        self.attack_errors += other.attack_errors;
        self.attacks_blocked += other.attacks_blocked;
        merge_counter(&mut self.attack_directions, &other.attack_directions);
        merge_counter(&mut self.attack_types, &other.attack_types);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockTotals {
    pub block_attempts: u32,
    pub stuff_blocks: u32,
    pub block_touches: u32,
}

impl BlockTotals {
    fn record(&mut self, block: &BlockDetail) {
        self.block_attempts += 1;
        self.stuff_blocks += count_if(block.is_stuff);
        self.block_touches += count_if(block.is_touch);
    }

    fn merge(&mut self, other: &Self) {
        self.block_attempts += other.block_attempts;
        self.stuff_blocks += other.stuff_blocks;
        self.block_touches += other.block_touches;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigTotals {
    pub dig_attempts: u32,
    pub successful_digs: u32,
    pub digs_to_kills: u32,
    pub dig_qualities: KeyedCounter,
}

impl DigTotals {
    fn record(&mut self, dig: &DigDetail) {
        self.dig_attempts += 1;
        self.successful_digs += count_if(dig.is_successful);
        self.digs_to_kills += count_if(dig.led_to_kill);
        if let Some(quality) = dig.dig_quality {
            bump(&mut self.dig_qualities, quality);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.dig_attempts += other.dig_attempts;
        self.successful_digs += other.successful_digs;
        self.digs_to_kills += other.digs_to_kills;
        merge_counter(&mut self.dig_qualities, &other.dig_qualities);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetTotals {
    pub total_sets: u32,
    pub set_errors: u32,
    pub killable_sets: u32,
    pub set_types: KeyedCounter,
}

impl SetTotals {
    fn record(&mut self, set: &SetDetail) {
        self.total_sets += 1;
        self.set_errors += count_if(set.is_error);
        self.killable_sets += count_if(set.is_killable);
        if let Some(set_type) = set.set_type {
            bump(&mut self.set_types, set_type);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.total_sets += other.total_sets;
        self.set_errors += other.set_errors;
        self.killable_sets += other.killable_sets;
        merge_counter(&mut self.set_types, &other.set_types);
    }
}

/// One category of a summary, keyed by its action type in [`StatSummary::categories`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryTotals {
    Serving(ServingTotals),
    ServeReceive(ReceiveTotals),
    Attack(AttackTotals),
    Block(BlockTotals),
    Dig(DigTotals),
    Set(SetTotals),
}

/// Counters folded from a set of action records.
///
/// Folding is order independent and two summaries can be merged, so a summary
/// over a union of records equals the merge of the summaries over its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatSummary {
    #[serde(flatten)]
    pub serving: ServingTotals,
    #[serde(flatten)]
    pub serve_receive: ReceiveTotals,
    #[serde(flatten)]
    pub attack: AttackTotals,
    #[serde(flatten)]
    pub block: BlockTotals,
    #[serde(flatten)]
    pub dig: DigTotals,
    #[serde(flatten)]
    pub set: SetTotals,
}

impl StatSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ActionRecord>) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.record(record.detail());
        }
        summary
    }

    pub fn record(&mut self, detail: &ActionDetail) {
        match detail {
            ActionDetail::Serve(serve) => self.serving.record(serve),
            ActionDetail::Receive(receive) => self.serve_receive.record(receive),
            ActionDetail::Attack(attack) => self.attack.record(attack),
            ActionDetail::Block(block) => self.block.record(block),
            ActionDetail::Dig(dig) => self.dig.record(dig),
            ActionDetail::Set(set) => self.set.record(set),
        }
    }

    pub fn merge(&mut self, other: &StatSummary) {
        self.serving.merge(&other.serving);
        self.serve_receive.merge(&other.serve_receive);
        self.attack.merge(&other.attack);
        self.block.merge(&other.block);
        self.dig.merge(&other.dig);
        self.set.merge(&other.set);
    }

    pub fn actions_of(&self, action_type: ActionType) -> u32 {
        match action_type {
            ActionType::Serving => self.serving.total_serves,
            ActionType::ServeReceive => self.serve_receive.total_receive_attempts,
            ActionType::Attack => self.attack.total_attacks,
            ActionType::Block => self.block.block_attempts,
            ActionType::Dig => self.dig.dig_attempts,
            ActionType::Set => self.set.total_sets,
        }
    }

    pub fn total_actions(&self) -> u32 {
        ActionType::ALL.iter().map(|t| self.actions_of(*t)).sum()
    }

    /// Per-category breakdown; categories without any action are left out.
    pub fn categories(&self) -> BTreeMap<ActionType, CategoryTotals> {
        ActionType::ALL
            .iter()
            .filter(|t| self.actions_of(**t) > 0)
            .map(|t| {
                let totals = match t {
                    ActionType::Serving => CategoryTotals::Serving(self.serving.clone()),
                    ActionType::ServeReceive => {
                        CategoryTotals::ServeReceive(self.serve_receive.clone())
                    }
                    ActionType::Attack => CategoryTotals::Attack(self.attack.clone()),
                    ActionType::Block => CategoryTotals::Block(self.block.clone()),
                    ActionType::Dig => CategoryTotals::Dig(self.dig.clone()),
                    ActionType::Set => CategoryTotals::Set(self.set.clone()),
                };
                (*t, totals)
            })
            .collect()
    }
}

/// Summary of one player's actions within one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerGameStats {
    pub player: Player,
    pub game: Game,
    pub summary: StatSummary,
}
