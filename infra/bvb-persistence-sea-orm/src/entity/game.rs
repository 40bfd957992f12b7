use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i32,
    pub date: Date,
    /// JSON list of player ids.
    pub team1: String,
    pub team2: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::base_stat::Entity")]
    BaseStat,
}

impl Related<super::base_stat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseStat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
