//! Domain entities and the scoring rubric
//!
//! Teams, judges, and evaluations as seen by the rest of the system.
//! Backend-native row shapes never appear here; implementations of
//! [`crate::backend::JudgingBackend`] map to these types at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Entity identity accepted by the core.
///
/// The inner field is private to guarantee the string is either a canonical
/// 36-character hyphenated UUID (the backend's native format) or a short
/// seed token: one ASCII letter followed by one or two digits (`t1`, `j12`),
/// used only by the built-in demo roster. Anything else is rejected before
/// it can reach a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Parse and validate an id string.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        if is_canonical_uuid(s) || is_seed_token(s) {
            Ok(EntityId(s.to_string()))
        } else {
            Err(StoreError::InvalidId(s.to_string()))
        }
    }

    /// Mint a fresh UUID v4 identity for locally-created records.
    pub fn generate() -> Self {
        EntityId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        EntityId::parse(&s)
    }
}

/// Canonical hyphenated UUID: 36 chars, hyphens at 8/13/18/23, hex elsewhere.
fn is_canonical_uuid(s: &str) -> bool {
    if s.len() != 36 {
        return false;
    }
    s.bytes().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Seed-roster short form: a single letter then 1-2 digits.
fn is_seed_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    matches!(bytes.len(), 2..=3)
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..].iter().all(|b| b.is_ascii_digit())
}

/// The fixed five-criterion rubric. Each score is an integer in [0, 20];
/// range enforcement is the input layer's responsibility, not the rubric's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub innovation: u8,
    pub technical: u8,
    pub presentation: u8,
    pub impact: u8,
    pub completion: u8,
}

impl Criteria {
    /// Exact sum of the five scores. Pure; no clamping.
    pub fn total(&self) -> u32 {
        u32::from(self.innovation)
            + u32::from(self.technical)
            + u32::from(self.presentation)
            + u32::from(self.impact)
            + u32::from(self.completion)
    }
}

/// A competing team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    pub members: Vec<String>,
    pub project: String,
    pub institution: Option<String>,
}

/// A judge on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// One judge's scoring of one team.
///
/// `total_score` is derived: it always equals `criteria.total()`. The store
/// recomputes it on every write, so it is never settable independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EntityId,
    pub team_id: EntityId,
    pub judge_id: EntityId,
    pub criteria: Criteria,
    pub total_score: u32,
    pub notes: Option<String>,
    /// Last-write time.
    pub updated_at: DateTime<Utc>,
}
