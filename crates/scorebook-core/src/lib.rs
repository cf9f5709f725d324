//! Scorebook Core: evaluation store, aggregation, and reconciliation
//!
//! The judging core of the scorebook portal. Admins manage a team/judge
//! roster; judges score teams against a fixed five-criterion rubric; the
//! leaderboard is derived on demand.
//!
//! ## Key components
//!
//! - `EvaluationStore`: in-memory evaluation collection, enforcing at most
//!   one evaluation per (team, judge) pair through a single upsert path
//! - `SyncService`: startup load and the online/offline submission state
//!   machine against any [`backend::JudgingBackend`]
//! - `results`: pure aggregation into ranked [`results::TeamResult`]s
//!
//! Durable persistence lives behind the `JudgingBackend` trait; the
//! `scorebook-state` crate provides the SurrealDB implementation and the
//! `fakes` module an in-memory one for tests.

pub mod backend;
mod connectivity;
mod error;
pub mod export;
pub mod fakes;
pub mod model;
pub mod results;
pub mod seed;
mod store;
mod sync;

pub use backend::{
    BackendResult, EvaluationPatch, JudgingBackend, NewEvaluation, NewJudge, NewTeam,
};
pub use connectivity::ConnectivityGate;
pub use error::{BackendError, StoreError};
pub use export::{build_standings, CriterionAverages, TeamStanding};
pub use model::{Criteria, EntityId, Evaluation, Judge, Team};
pub use results::{compute_team_result, compute_team_results, TeamResult};
pub use seed::seed_teams;
pub use store::EvaluationStore;
pub use sync::{AppState, SubmissionOutcome, SyncService};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, StoreError>;
