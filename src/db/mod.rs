pub mod assistants;
pub mod employers;

use sea_orm::{Database, DatabaseConnection};
use std::env;

/// Create a SeaORM connection pool. `DATABASE_URL` defaults to a local
/// SQLite file (created on first start), so the service runs with zero
/// setup.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://assistfinder.db?mode=rwc".to_string());
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
