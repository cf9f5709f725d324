//! In-memory fake backend (testing only)
//!
//! `MemoryBackend` satisfies the [`JudgingBackend`] contract without any
//! external dependencies. Failure-injection switches let tests drive every
//! branch of the sync layer, and call counters let them assert that the
//! offline path never touches the backend.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::backend::{
    BackendResult, EvaluationPatch, JudgingBackend, NewEvaluation, NewJudge, NewTeam,
};
use crate::error::BackendError;
use crate::model::{EntityId, Evaluation, Judge, Team};

/// In-memory fake with failure injection and call counting.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    teams: Mutex<Vec<Team>>,
    judges: Mutex<Vec<Judge>>,
    evaluations: Mutex<Vec<Evaluation>>,
    fail_probe: AtomicBool,
    fail_writes: AtomicBool,
    deny_writes: AtomicBool,
    probe_calls: AtomicUsize,
    write_calls: AtomicUsize,
    read_calls: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `probe` fail (unreachable backend).
    pub fn set_fail_probe(&self, fail: bool) {
        self.fail_probe.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with [`BackendError::Query`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with [`BackendError::PermissionDenied`].
    pub fn set_deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Pre-populate the fake, bypassing counters.
    pub fn seed(&self, teams: Vec<Team>, judges: Vec<Judge>, evaluations: Vec<Evaluation>) {
        *self.teams.lock().unwrap() = teams;
        *self.judges.lock().unwrap() = judges;
        *self.evaluations.lock().unwrap() = evaluations;
    }

    /// Snapshot of stored evaluations, for assertions.
    pub fn stored_evaluations(&self) -> Vec<Evaluation> {
        self.evaluations.lock().unwrap().clone()
    }

    /// Snapshot of stored teams, for assertions.
    pub fn stored_teams(&self) -> Vec<Team> {
        self.teams.lock().unwrap().clone()
    }

    fn check_write(&self) -> BackendResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(BackendError::PermissionDenied("row policy".to_string()));
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Query("injected write failure".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> BackendResult<()> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Query("injected read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JudgingBackend for MemoryBackend {
    async fn probe(&self) -> BackendResult<()> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_probe.load(Ordering::SeqCst) {
            return Err(BackendError::Connection("injected probe failure".to_string()));
        }
        Ok(())
    }

    async fn list_teams(&self) -> BackendResult<Vec<Team>> {
        self.check_read()?;
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn list_judges(&self) -> BackendResult<Vec<Judge>> {
        self.check_read()?;
        Ok(self.judges.lock().unwrap().clone())
    }

    async fn list_evaluations(&self) -> BackendResult<Vec<Evaluation>> {
        self.check_read()?;
        Ok(self.evaluations.lock().unwrap().clone())
    }

    async fn insert_team(&self, team: NewTeam) -> BackendResult<Team> {
        self.check_write()?;
        let created = Team {
            id: EntityId::generate(),
            name: team.name,
            members: team.members,
            project: team.project,
            institution: team.institution,
        };
        self.teams.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn insert_judge(&self, judge: NewJudge) -> BackendResult<Judge> {
        self.check_write()?;
        let created = Judge {
            id: EntityId::generate(),
            name: judge.name,
            email: judge.email,
        };
        self.judges.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> BackendResult<Evaluation> {
        self.check_write()?;
        let created = Evaluation {
            id: EntityId::generate(),
            team_id: evaluation.team_id,
            judge_id: evaluation.judge_id,
            criteria: evaluation.criteria,
            total_score: evaluation.total_score,
            notes: evaluation.notes,
            updated_at: Utc::now(),
        };
        self.evaluations.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_evaluation(
        &self,
        id: &EntityId,
        patch: &EvaluationPatch,
    ) -> BackendResult<()> {
        self.check_write()?;
        let mut evaluations = self.evaluations.lock().unwrap();
        let existing = evaluations
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        existing.criteria = patch.criteria;
        existing.total_score = patch.total_score;
        existing.notes = patch.notes.clone();
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_team(&self, id: &EntityId) -> BackendResult<()> {
        self.check_write()?;
        self.teams.lock().unwrap().retain(|t| t.id != *id);
        Ok(())
    }

    async fn delete_judge(&self, id: &EntityId) -> BackendResult<()> {
        self.check_write()?;
        self.judges.lock().unwrap().retain(|j| j.id != *id);
        Ok(())
    }

    async fn delete_evaluations_by_team(&self, team_id: &EntityId) -> BackendResult<()> {
        self.check_write()?;
        self.evaluations
            .lock()
            .unwrap()
            .retain(|e| e.team_id != *team_id);
        Ok(())
    }

    async fn delete_evaluations_by_judge(&self, judge_id: &EntityId) -> BackendResult<()> {
        self.check_write()?;
        self.evaluations
            .lock()
            .unwrap()
            .retain(|e| e.judge_id != *judge_id);
        Ok(())
    }

    async fn delete_all_evaluations(&self) -> BackendResult<()> {
        self.check_write()?;
        self.evaluations.lock().unwrap().clear();
        Ok(())
    }
}
