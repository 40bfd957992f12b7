use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "block_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stat_id: i32,
    pub is_stuff: bool,
    pub is_touch: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::base_stat::Entity",
        from = "Column::StatId",
        to = "super::base_stat::Column::Id",
        on_delete = "Cascade"
    )]
    BaseStat,
}

impl Related<super::base_stat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseStat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
