use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "serve_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stat_id: i32,
    pub is_ace: bool,
    pub is_missed: bool,
    pub serve_type: Option<String>,
    pub serve_target: Option<String>,
    pub opponent_pass_quality: Option<i32>,
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
