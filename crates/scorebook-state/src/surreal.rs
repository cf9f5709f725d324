//! SurrealDB-backed JudgingBackend implementation
//!
//! Persists rows from [`crate::rows`], converting to and from the core
//! entities at the boundary.

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::{debug, info};
use uuid::Uuid;

use scorebook_core::backend::{
    BackendResult, EvaluationPatch, JudgingBackend, NewEvaluation, NewJudge, NewTeam,
};
use scorebook_core::{BackendError, EntityId, Evaluation, Judge, Team};

use crate::migrations;
use crate::rows::{
    evaluation_from_row, judge_from_row, team_from_row, EvaluationRow, JudgeRow, TeamRow,
};

/// SurrealDB-backed implementation of [`JudgingBackend`].
pub struct SurrealBackend {
    db: Surreal<Any>,
}

impl SurrealBackend {
    /// Create an in-memory instance for tests and demos.
    ///
    /// Connects to `mem://`, selects `scorebook/main`, and runs the schema
    /// migrations.
    pub async fn in_memory() -> BackendResult<Self> {
        Self::connect("mem://").await
    }

    /// Connect to any SurrealDB endpoint (ws://, wss://, surrealkv://,
    /// mem://) without authentication.
    pub async fn connect(endpoint: &str) -> BackendResult<Self> {
        let db = surrealdb::engine::any::connect(endpoint)
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        db.use_ns("scorebook")
            .use_db("main")
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;

        info!(endpoint, "SurrealBackend connected");
        Ok(Self { db })
    }

    /// Create from environment variables.
    ///
    /// Reads:
    /// - SCOREBOOK_DB_ENDPOINT (required)
    /// - SCOREBOOK_DB_USERNAME / SCOREBOOK_DB_PASSWORD (optional, root auth)
    /// - SCOREBOOK_DB_NAMESPACE (optional, default: "scorebook")
    /// - SCOREBOOK_DB_DATABASE (optional, default: "main")
    pub async fn from_env() -> BackendResult<Self> {
        let endpoint = std::env::var("SCOREBOOK_DB_ENDPOINT")
            .map_err(|_| BackendError::Connection("SCOREBOOK_DB_ENDPOINT not set".to_string()))?;
        let namespace =
            std::env::var("SCOREBOOK_DB_NAMESPACE").unwrap_or_else(|_| "scorebook".to_string());
        let database =
            std::env::var("SCOREBOOK_DB_DATABASE").unwrap_or_else(|_| "main".to_string());

        let db = surrealdb::engine::any::connect(&endpoint)
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        if let (Ok(username), Ok(password)) = (
            std::env::var("SCOREBOOK_DB_USERNAME"),
            std::env::var("SCOREBOOK_DB_PASSWORD"),
        ) {
            db.signin(Root {
                username: &username,
                password: &password,
            })
            .await
            .map_err(|e| BackendError::Connection(format!("auth failed: {e}")))?;
        }

        db.use_ns(&namespace)
            .use_db(&database)
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;

        info!(endpoint, "SurrealBackend connected (env)");
        Ok(Self { db })
    }

    async fn fetch_evaluation(&self, eval_id: &str) -> BackendResult<EvaluationRow> {
        let id_owned = eval_id.to_string();
        let mut res = self
            .db
            .query("SELECT * FROM evaluations WHERE eval_id = $id")
            .bind(("id", id_owned))
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;

        let rows: Vec<EvaluationRow> = res
            .take(0)
            .map_err(|e| BackendError::Query(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(eval_id.to_string()))
    }

    async fn delete_where(&self, sql: &'static str, id: &EntityId) -> BackendResult<()> {
        let id_owned = id.to_string();
        self.db
            .query(sql)
            .bind(("id", id_owned))
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl JudgingBackend for SurrealBackend {
    async fn probe(&self) -> BackendResult<()> {
        self.db
            .query("RETURN 1")
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn list_teams(&self) -> BackendResult<Vec<Team>> {
        let mut res = self
            .db
            .query("SELECT * FROM teams")
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;
        let rows: Vec<TeamRow> = res
            .take(0)
            .map_err(|e| BackendError::Query(e.to_string()))?;
        rows.into_iter().map(team_from_row).collect()
    }

    async fn list_judges(&self) -> BackendResult<Vec<Judge>> {
        let mut res = self
            .db
            .query("SELECT * FROM judges")
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;
        let rows: Vec<JudgeRow> = res
            .take(0)
            .map_err(|e| BackendError::Query(e.to_string()))?;
        rows.into_iter().map(judge_from_row).collect()
    }

    async fn list_evaluations(&self) -> BackendResult<Vec<Evaluation>> {
        let mut res = self
            .db
            .query("SELECT * FROM evaluations")
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;
        let rows: Vec<EvaluationRow> = res
            .take(0)
            .map_err(|e| BackendError::Query(e.to_string()))?;
        rows.into_iter().map(evaluation_from_row).collect()
    }

    async fn insert_team(&self, team: NewTeam) -> BackendResult<Team> {
        let row = TeamRow {
            team_id: Uuid::new_v4().to_string(),
            name: team.name,
            members: team.members,
            project: team.project,
            institution: team.institution,
        };
        debug!(team = %row.name, "inserting team");

        let created: Option<TeamRow> = self
            .db
            .create("teams")
            .content(row.clone())
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;

        team_from_row(created.unwrap_or(row))
    }

    async fn insert_judge(&self, judge: NewJudge) -> BackendResult<Judge> {
        let row = JudgeRow {
            judge_id: Uuid::new_v4().to_string(),
            name: judge.name,
            email: judge.email,
        };
        debug!(judge = %row.name, "inserting judge");

        let created: Option<JudgeRow> = self
            .db
            .create("judges")
            .content(row.clone())
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;

        judge_from_row(created.unwrap_or(row))
    }

    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> BackendResult<Evaluation> {
        let row = EvaluationRow::new(evaluation);
        debug!(evaluation = %row.eval_id, "inserting evaluation");

        let created: Option<EvaluationRow> = self
            .db
            .create("evaluations")
            .content(row.clone())
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;

        evaluation_from_row(created.unwrap_or(row))
    }

    async fn update_evaluation(
        &self,
        id: &EntityId,
        patch: &EvaluationPatch,
    ) -> BackendResult<()> {
        let mut row = self.fetch_evaluation(id.as_str()).await?;
        row.innovation = patch.criteria.innovation;
        row.technical = patch.criteria.technical;
        row.presentation = patch.criteria.presentation;
        row.impact = patch.criteria.impact;
        row.completion = patch.criteria.completion;
        row.total_score = patch.total_score;
        row.notes = patch.notes.clone();
        row.updated_at = chrono::Utc::now();

        let id_owned = id.to_string();
        self.db
            .query("UPDATE evaluations CONTENT $row WHERE eval_id = $id")
            .bind(("row", row))
            .bind(("id", id_owned))
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete_team(&self, id: &EntityId) -> BackendResult<()> {
        self.delete_where("DELETE FROM teams WHERE team_id = $id", id)
            .await
    }

    async fn delete_judge(&self, id: &EntityId) -> BackendResult<()> {
        self.delete_where("DELETE FROM judges WHERE judge_id = $id", id)
            .await
    }

    async fn delete_evaluations_by_team(&self, team_id: &EntityId) -> BackendResult<()> {
        self.delete_where("DELETE FROM evaluations WHERE team_id = $id", team_id)
            .await
    }

    async fn delete_evaluations_by_judge(&self, judge_id: &EntityId) -> BackendResult<()> {
        self.delete_where("DELETE FROM evaluations WHERE judge_id = $id", judge_id)
            .await
    }

    async fn delete_all_evaluations(&self) -> BackendResult<()> {
        self.db
            .query("DELETE evaluations")
            .await
            .map_err(|e| BackendError::Query(e.to_string()))?;
        Ok(())
    }
}
