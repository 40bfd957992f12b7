use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    SqlErr, TransactionError,
    sea_query::Table,
};

pub mod actions;
mod details;
pub mod entity;
pub mod games;
pub mod players;

pub use actions::ActionRepositoryImpl;
pub use games::GameRepositoryImpl;
pub use players::PlayerRepositoryImpl;

use crate::entity::{
    attack_stat, base_stat, block_stat, dig_stat, game, player, receive_stat, serve_stat, set_stat,
};

/// Unwraps a transaction result, turning connection failures into storage errors.
pub(crate) fn settle<T, E: std::error::Error>(
    result: Result<T, TransactionError<E>>,
    storage_error: impl FnOnce(String) -> E,
) -> Result<T, E> {
    match result {
        Ok(value) => Ok(value),
        Err(TransactionError::Transaction(e)) => Err(e),
        Err(TransactionError::Connection(e)) => Err(storage_error(e.to_string())),
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub async fn connect(db_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(max_connections)
        .sqlx_logging_level(log::LevelFilter::Debug);
    Database::connect(opt).await
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(&stmt).await?;
    Ok(())
}

async fn drop_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let stmt = Table::drop().table(entity.table_ref()).if_exists().to_owned();
    db.execute(&stmt).await?;
    Ok(())
}

/// Creates every table that does not exist yet. Referenced tables come first.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, player::Entity).await?;
    create_table(db, game::Entity).await?;
    create_table(db, base_stat::Entity).await?;
    create_table(db, serve_stat::Entity).await?;
    create_table(db, receive_stat::Entity).await?;
    create_table(db, attack_stat::Entity).await?;
    create_table(db, block_stat::Entity).await?;
    create_table(db, dig_stat::Entity).await?;
    create_table(db, set_stat::Entity).await?;
    log::info!("Database schema is ready");
    Ok(())
}

/// Drops every table, detail tables first.
pub async fn drop_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    drop_table(db, set_stat::Entity).await?;
    drop_table(db, dig_stat::Entity).await?;
    drop_table(db, block_stat::Entity).await?;
    drop_table(db, attack_stat::Entity).await?;
    drop_table(db, receive_stat::Entity).await?;
    drop_table(db, serve_stat::Entity).await?;
    drop_table(db, base_stat::Entity).await?;
    drop_table(db, game::Entity).await?;
    drop_table(db, player::Entity).await?;
    log::warn!("Dropped all tables");
    Ok(())
}
