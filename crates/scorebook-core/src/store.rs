//! In-memory evaluation store
//!
//! Owns the evaluation collection and the one-evaluation-per-(team, judge)
//! invariant. `upsert` is the single choke point: no other path inserts an
//! evaluation, so find-then-write always observes the previous write under
//! the single-threaded execution model.

use chrono::Utc;

use crate::error::StoreError;
use crate::model::{Criteria, EntityId, Evaluation};

/// Exclusive owner of the in-memory evaluation collection.
#[derive(Debug, Default)]
pub struct EvaluationStore {
    evaluations: Vec<Evaluation>,
}

impl EvaluationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the evaluation for a (team, judge) pair, if any.
    pub fn find(&self, team_id: &EntityId, judge_id: &EntityId) -> Option<&Evaluation> {
        self.evaluations
            .iter()
            .find(|e| e.team_id == *team_id && e.judge_id == *judge_id)
    }

    /// Insert or update the evaluation for a (team, judge) pair.
    ///
    /// Validates both ids before touching any state, so a rejected
    /// submission leaves the store completely unchanged. On resubmission
    /// the existing record keeps its identity; criteria, notes, total and
    /// timestamp are replaced in place. Returns a copy of the stored record.
    pub fn upsert(
        &mut self,
        team_id: &str,
        judge_id: &str,
        criteria: Criteria,
        notes: Option<String>,
    ) -> Result<Evaluation, StoreError> {
        let team_id = EntityId::parse(team_id)?;
        let judge_id = EntityId::parse(judge_id)?;

        let total_score = criteria.total();
        let now = Utc::now();

        if let Some(existing) = self
            .evaluations
            .iter_mut()
            .find(|e| e.team_id == team_id && e.judge_id == judge_id)
        {
            existing.criteria = criteria;
            existing.total_score = total_score;
            existing.notes = notes;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let evaluation = Evaluation {
            id: EntityId::generate(),
            team_id,
            judge_id,
            criteria,
            total_score,
            notes,
            updated_at: now,
        };
        self.evaluations.push(evaluation.clone());
        Ok(evaluation)
    }

    /// Insert a record produced by the durable backend, keeping its
    /// backend-assigned identity and timestamp. The (team, judge) dedup
    /// still applies: an existing pair is replaced, identity and all.
    pub fn adopt(&mut self, evaluation: Evaluation) {
        if let Some(existing) = self
            .evaluations
            .iter_mut()
            .find(|e| e.team_id == evaluation.team_id && e.judge_id == evaluation.judge_id)
        {
            *existing = evaluation;
        } else {
            self.evaluations.push(evaluation);
        }
    }

    /// Remove every evaluation referencing the given team.
    pub fn remove_by_team(&mut self, team_id: &EntityId) {
        self.evaluations.retain(|e| e.team_id != *team_id);
    }

    /// Remove every evaluation submitted by the given judge.
    pub fn remove_by_judge(&mut self, judge_id: &EntityId) {
        self.evaluations.retain(|e| e.judge_id != *judge_id);
    }

    /// All evaluations submitted by one judge.
    pub fn list_by_judge(&self, judge_id: &EntityId) -> Vec<Evaluation> {
        self.evaluations
            .iter()
            .filter(|e| e.judge_id == *judge_id)
            .cloned()
            .collect()
    }

    /// Clear the whole collection. Irreversible; callers confirm intent.
    pub fn reset(&mut self) {
        self.evaluations.clear();
    }

    /// Replace the collection wholesale (startup load).
    pub fn replace_all(&mut self, evaluations: Vec<Evaluation>) {
        self.evaluations = evaluations;
    }

    pub fn all(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}
