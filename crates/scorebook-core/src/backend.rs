//! Durable backend trait
//!
//! The contract every durable store must satisfy. The sync layer only ever
//! talks to `dyn JudgingBackend`, so the SurrealDB implementation and the
//! in-memory fake are interchangeable.
//!
//! Guarantees expected of implementations:
//! - `insert_*` assigns the identity (and, for evaluations, the timestamp)
//!   and returns the full created record.
//! - `update_evaluation` is keyed by the existing record's identity.
//! - Deletes are idempotent: deleting an absent record is not an error.
//! - A write rejected for policy reasons surfaces as
//!   [`BackendError::PermissionDenied`], never as a silent no-op.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::model::{Criteria, EntityId, Evaluation, Judge, Team};

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Fields for a team the backend has not yet assigned an identity to.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub members: Vec<String>,
    pub project: String,
    pub institution: Option<String>,
}

/// Fields for a judge pending identity assignment.
#[derive(Debug, Clone)]
pub struct NewJudge {
    pub name: String,
    pub email: String,
}

/// Fields for a first-time evaluation insert.
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub team_id: EntityId,
    pub judge_id: EntityId,
    pub criteria: Criteria,
    pub total_score: u32,
    pub notes: Option<String>,
}

/// Mutable fields for an evaluation update (identity and foreign keys fixed).
#[derive(Debug, Clone)]
pub struct EvaluationPatch {
    pub criteria: Criteria,
    pub total_score: u32,
    pub notes: Option<String>,
}

/// Durable judging store.
#[async_trait]
pub trait JudgingBackend: Send + Sync {
    /// Cheap reachability check, run once at startup.
    async fn probe(&self) -> BackendResult<()>;

    async fn list_teams(&self) -> BackendResult<Vec<Team>>;
    async fn list_judges(&self) -> BackendResult<Vec<Judge>>;
    async fn list_evaluations(&self) -> BackendResult<Vec<Evaluation>>;

    async fn insert_team(&self, team: NewTeam) -> BackendResult<Team>;
    async fn insert_judge(&self, judge: NewJudge) -> BackendResult<Judge>;
    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> BackendResult<Evaluation>;

    async fn update_evaluation(
        &self,
        id: &EntityId,
        patch: &EvaluationPatch,
    ) -> BackendResult<()>;

    async fn delete_team(&self, id: &EntityId) -> BackendResult<()>;
    async fn delete_judge(&self, id: &EntityId) -> BackendResult<()>;

    async fn delete_evaluations_by_team(&self, team_id: &EntityId) -> BackendResult<()>;
    async fn delete_evaluations_by_judge(&self, judge_id: &EntityId) -> BackendResult<()>;
    async fn delete_all_evaluations(&self) -> BackendResult<()>;
}
