use bvb_persistence_sea_orm::{connect, create_schema, drop_schema};
use sea_orm::DbErr;

const DEFAULT_DATABASE_URL: &str = "sqlite://bvb_stats.db?mode=rwc";

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    dotenvy::dotenv().ok();

    let reset = std::env::args().skip(1).any(|arg| arg == "--reset");
    let db_url =
        std::env::var("BVB_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let db = connect(&db_url, 1).await?;
    if reset {
        drop_schema(&db).await?;
        println!("Dropped existing tables");
    }
    create_schema(&db).await?;

    println!("Created database tables successfully");
    Ok(())
}
