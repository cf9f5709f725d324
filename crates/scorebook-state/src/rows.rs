//! SurrealDB row shapes and entity mapping
//!
//! Rows carry the backend-native snake_case field names; exactly one
//! mapping function per entity in each direction keeps those names from
//! leaking into the core. Identity lives in an explicit `*_id` field
//! rather than the Surreal record id, so rows round-trip as plain content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scorebook_core::{BackendError, Criteria, EntityId, Evaluation, Judge, NewEvaluation, Team};

/// Module for serializing chrono DateTime to SurrealDB datetime format
mod surreal_datetime {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};
    use surrealdb::sql::Datetime as SurrealDatetime;

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sd = SurrealDatetime::from(*date);
        serde::Serialize::serialize(&sd, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sd = SurrealDatetime::deserialize(deserializer)?;
        Ok(DateTime::from(sd))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub team_id: String,
    pub name: String,
    pub members: Vec<String>,
    pub project: String,
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeRow {
    pub judge_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub eval_id: String,
    pub team_id: String,
    pub judge_id: String,
    pub innovation: u8,
    pub technical: u8,
    pub presentation: u8,
    pub impact: u8,
    pub completion: u8,
    pub total_score: u32,
    pub notes: Option<String>,
    #[serde(with = "surreal_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "surreal_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl EvaluationRow {
    /// Build a fresh row for an insert: identity and timestamps are
    /// assigned here, on the backend side of the boundary.
    pub fn new(draft: NewEvaluation) -> Self {
        let now = Utc::now();
        Self {
            eval_id: Uuid::new_v4().to_string(),
            team_id: draft.team_id.to_string(),
            judge_id: draft.judge_id.to_string(),
            innovation: draft.criteria.innovation,
            technical: draft.criteria.technical,
            presentation: draft.criteria.presentation,
            impact: draft.criteria.impact,
            completion: draft.criteria.completion,
            total_score: draft.total_score,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

fn parse_id(raw: &str) -> Result<EntityId, BackendError> {
    EntityId::parse(raw).map_err(|e| BackendError::Serialization(e.to_string()))
}

pub fn team_from_row(row: TeamRow) -> Result<Team, BackendError> {
    Ok(Team {
        id: parse_id(&row.team_id)?,
        name: row.name,
        members: row.members,
        project: row.project,
        institution: row.institution,
    })
}

pub fn judge_from_row(row: JudgeRow) -> Result<Judge, BackendError> {
    Ok(Judge {
        id: parse_id(&row.judge_id)?,
        name: row.name,
        email: row.email,
    })
}

pub fn evaluation_from_row(row: EvaluationRow) -> Result<Evaluation, BackendError> {
    Ok(Evaluation {
        id: parse_id(&row.eval_id)?,
        team_id: parse_id(&row.team_id)?,
        judge_id: parse_id(&row.judge_id)?,
        criteria: Criteria {
            innovation: row.innovation,
            technical: row.technical,
            presentation: row.presentation,
            impact: row.impact,
            completion: row.completion,
        },
        total_score: row.total_score,
        notes: row.notes,
        updated_at: row.updated_at,
    })
}
