//! SurrealDB schema initialization
//!
//! Idempotent table and index definitions; safe to run on every connect.

use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

use scorebook_core::{BackendError, BackendResult};

/// Initialize all scorebook tables.
pub async fn init_schema(db: &Surreal<Any>) -> BackendResult<()> {
    info!("initializing scorebook schema");

    init_teams_table(db).await?;
    init_judges_table(db).await?;
    init_evaluations_table(db).await?;

    Ok(())
}

async fn run(db: &Surreal<Any>, sql: &str) -> BackendResult<()> {
    db.query(sql)
        .await
        .map_err(|e| BackendError::Query(e.to_string()))?;
    Ok(())
}

async fn init_teams_table(db: &Surreal<Any>) -> BackendResult<()> {
    debug!("initializing teams table");
    run(
        db,
        r#"
        DEFINE TABLE IF NOT EXISTS teams SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_team_id ON TABLE teams COLUMNS team_id UNIQUE;
        "#,
    )
    .await
}

async fn init_judges_table(db: &Surreal<Any>) -> BackendResult<()> {
    debug!("initializing judges table");
    run(
        db,
        r#"
        DEFINE TABLE IF NOT EXISTS judges SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_judge_id ON TABLE judges COLUMNS judge_id UNIQUE;
        "#,
    )
    .await
}

async fn init_evaluations_table(db: &Surreal<Any>) -> BackendResult<()> {
    debug!("initializing evaluations table");
    run(
        db,
        r#"
        DEFINE TABLE IF NOT EXISTS evaluations SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_eval_id ON TABLE evaluations COLUMNS eval_id UNIQUE;

        -- One evaluation per (team, judge) pair, enforced at the store too
        DEFINE INDEX IF NOT EXISTS idx_eval_pair ON TABLE evaluations COLUMNS team_id, judge_id UNIQUE;
        "#,
    )
    .await
}
