//! Migrate command - database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are driven manually here, unlike `serve` which
    // auto-applies them on connect
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("applying pending migrations");
            from_db(db.run_migrations().await)?;
            tracing::info!("migrations applied");
        }
        MigrateAction::Down => {
            tracing::info!("rolling back the last migration");
            from_db(db.rollback_migration().await)?;
            tracing::info!("rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in from_db(db.migration_status().await)? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("resetting the database and re-running all migrations");
            from_db(db.fresh_migrations().await)?;
            tracing::info!("fresh migrations complete");
        }
    }

    Ok(())
}

fn from_db<T>(result: Result<T, sea_orm::DbErr>) -> AppResult<T> {
    result.map_err(|e| AppError::internal(e.to_string()))
}
