//! Storage of the six detail tables that hang off `base_stats`.

use std::{collections::HashMap, str::FromStr};

use bvb_stats_app::domain::action::{
    ActionDetail, ActionType, AttackDetail, BlockDetail, DigDetail, PassRating, ReceiveDetail,
    ServeDetail, SetDetail, UnknownVariant,
};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::entity::{
    attack_stat, base_stat, block_stat, dig_stat, receive_stat, serve_stat, set_stat,
};

fn parse_opt<T: FromStr<Err = UnknownVariant>>(value: Option<String>) -> Result<Option<T>, String> {
    value
        .map(|v| T::from_str(&v))
        .transpose()
        .map_err(|e| e.to_string())
}

fn rating_from_column(value: Option<i32>) -> Result<Option<PassRating>, String> {
    value
        .map(|v| {
            u8::try_from(v)
                .map_err(|_| format!("pass rating {} out of range", v))
                .and_then(|v| PassRating::try_from(v).map_err(|e| e.to_string()))
        })
        .transpose()
}

fn rating_to_column(rating: Option<PassRating>) -> Option<i32> {
    rating.map(|r| i32::from(r.value()))
}

fn serve_from_model(model: serve_stat::Model) -> Result<ServeDetail, String> {
    Ok(ServeDetail {
        is_ace: model.is_ace,
        is_missed: model.is_missed,
        serve_type: parse_opt(model.serve_type)?,
        serve_target: model.serve_target,
        opponent_pass_quality: rating_from_column(model.opponent_pass_quality)?,
    })
}

fn receive_from_model(model: receive_stat::Model) -> Result<ReceiveDetail, String> {
    Ok(ReceiveDetail {
        is_good_pass: model.is_good_pass,
        is_error: model.is_error,
        pass_rating: rating_from_column(model.pass_rating)?,
    })
}

fn attack_from_model(model: attack_stat::Model) -> Result<AttackDetail, String> {
    Ok(AttackDetail {
        is_kill: model.is_kill,
        is_error: model.is_error,
        is_blocked: model.is_blocked,
        attack_type: parse_opt(model.attack_type)?,
        attack_direction: parse_opt(model.attack_direction)?,
    })
}

fn block_from_model(model: block_stat::Model) -> BlockDetail {
    BlockDetail {
        is_stuff: model.is_stuff,
        is_touch: model.is_touch,
    }
}

fn dig_from_model(model: dig_stat::Model) -> Result<DigDetail, String> {
    Ok(DigDetail {
        is_successful: model.is_successful,
        led_to_kill: model.led_to_kill,
        dig_quality: parse_opt(model.dig_quality)?,
    })
}

fn set_from_model(model: set_stat::Model) -> Result<SetDetail, String> {
    Ok(SetDetail {
        is_killable: model.is_killable,
        is_error: model.is_error,
        set_type: parse_opt(model.set_type)?,
    })
}

/// Writes the detail row keyed by `stat_id`.
pub(crate) async fn insert_detail<C: ConnectionTrait>(
    db: &C,
    stat_id: i32,
    detail: &ActionDetail,
) -> Result<(), DbErr> {
    match detail {
        ActionDetail::Serve(serve) => {
            serve_stat::Entity::insert(serve_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_ace: Set(serve.is_ace),
                is_missed: Set(serve.is_missed),
                serve_type: Set(serve.serve_type.map(|t| t.to_string())),
                serve_target: Set(serve.serve_target.clone()),
                opponent_pass_quality: Set(rating_to_column(serve.opponent_pass_quality)),
            })
            .exec_without_returning(db)
            .await?;
        }
        ActionDetail::Receive(receive) => {
            receive_stat::Entity::insert(receive_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_good_pass: Set(receive.is_good_pass),
                is_error: Set(receive.is_error),
                pass_rating: Set(rating_to_column(receive.pass_rating)),
            })
            .exec_without_returning(db)
            .await?;
        }
        ActionDetail::Attack(attack) => {
            attack_stat::Entity::insert(attack_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_kill: Set(attack.is_kill),
                is_error: Set(attack.is_error),
                is_blocked: Set(attack.is_blocked),
                attack_type: Set(attack.attack_type.map(|t| t.to_string())),
                attack_direction: Set(attack.attack_direction.map(|d| d.to_string())),
            })
            .exec_without_returning(db)
            .await?;
        }
        ActionDetail::Block(block) => {
            block_stat::Entity::insert(block_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_stuff: Set(block.is_stuff),
                is_touch: Set(block.is_touch),
            })
            .exec_without_returning(db)
            .await?;
        }
        ActionDetail::Dig(dig) => {
            dig_stat::Entity::insert(dig_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_successful: Set(dig.is_successful),
                led_to_kill: Set(dig.led_to_kill),
                dig_quality: Set(dig.dig_quality.map(|q| q.to_string())),
            })
            .exec_without_returning(db)
            .await?;
        }
        ActionDetail::Set(set) => {
            set_stat::Entity::insert(set_stat::ActiveModel {
                stat_id: Set(stat_id),
                is_killable: Set(set.is_killable),
                is_error: Set(set.is_error),
                set_type: Set(set.set_type.map(|t| t.to_string())),
            })
            .exec_without_returning(db)
            .await?;
        }
    }
    Ok(())
}

pub(crate) async fn delete_detail<C: ConnectionTrait>(
    db: &C,
    stat_id: i32,
    action_type: ActionType,
) -> Result<(), DbErr> {
    match action_type {
        ActionType::Serving => serve_stat::Entity::delete_by_id(stat_id).exec(db).await?,
        ActionType::ServeReceive => receive_stat::Entity::delete_by_id(stat_id).exec(db).await?,
        ActionType::Attack => attack_stat::Entity::delete_by_id(stat_id).exec(db).await?,
        ActionType::Block => block_stat::Entity::delete_by_id(stat_id).exec(db).await?,
        ActionType::Dig => dig_stat::Entity::delete_by_id(stat_id).exec(db).await?,
        ActionType::Set => set_stat::Entity::delete_by_id(stat_id).exec(db).await?,
    };
    Ok(())
}

/// Loads the detail rows for the given base stats with one query per action type.
/// Stats without a detail row are missing from the result.
pub(crate) async fn load_details<C: ConnectionTrait>(
    db: &C,
    bases: &[(base_stat::Model, ActionType)],
) -> Result<HashMap<i32, ActionDetail>, String> {
    let mut ids: HashMap<ActionType, Vec<i32>> = HashMap::new();
    for (base, action_type) in bases {
        ids.entry(*action_type).or_default().push(base.id);
    }

    let db_err = |e: DbErr| e.to_string();
    let mut details = HashMap::with_capacity(bases.len());
    for (action_type, stat_ids) in ids {
        match action_type {
            ActionType::Serving => {
                let models = serve_stat::Entity::find()
                    .filter(serve_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(model.stat_id, ActionDetail::Serve(serve_from_model(model)?));
                }
            }
            ActionType::ServeReceive => {
                let models = receive_stat::Entity::find()
                    .filter(receive_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(
                        model.stat_id,
                        ActionDetail::Receive(receive_from_model(model)?),
                    );
                }
            }
            ActionType::Attack => {
                let models = attack_stat::Entity::find()
                    .filter(attack_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(
                        model.stat_id,
                        ActionDetail::Attack(attack_from_model(model)?),
                    );
                }
            }
            ActionType::Block => {
                let models = block_stat::Entity::find()
                    .filter(block_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(model.stat_id, ActionDetail::Block(block_from_model(model)));
                }
            }
            ActionType::Dig => {
                let models = dig_stat::Entity::find()
                    .filter(dig_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(model.stat_id, ActionDetail::Dig(dig_from_model(model)?));
                }
            }
            ActionType::Set => {
                let models = set_stat::Entity::find()
                    .filter(set_stat::Column::StatId.is_in(stat_ids))
                    .all(db)
                    .await
                    .map_err(db_err)?;
                for model in models {
                    details.insert(model.stat_id, ActionDetail::Set(set_from_model(model)?));
                }
            }
        }
    }
    Ok(details)
}
