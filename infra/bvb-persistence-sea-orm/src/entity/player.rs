use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
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
