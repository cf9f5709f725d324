//! Reconciliation/sync layer
//!
//! Keeps the in-memory collections and the durable backend consistent
//! across online/offline operation. All online-vs-offline branching lives
//! here, behind one service, instead of being duplicated per entity type.
//!
//! Write-path policy per submission attempt:
//! - connectivity false: local-only mutation, reported as saved locally;
//! - connectivity true, remote write fails: the submission fails and the
//!   local store is left untouched, so believed-online state never
//!   silently diverges from the backend;
//! - connectivity true, write rejected for policy reasons: soft failure,
//!   the local mutation is applied and a warning outcome returned so the
//!   judge's work is not lost.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{EvaluationPatch, JudgingBackend, NewEvaluation, NewJudge, NewTeam};
use crate::connectivity::ConnectivityGate;
use crate::error::{BackendError, StoreError};
use crate::model::{Criteria, EntityId, Evaluation, Judge, Team};
use crate::results::{compute_team_result, compute_team_results, TeamResult};
use crate::seed::seed_teams;
use crate::store::EvaluationStore;

/// Process-wide application state: the roster collections plus the
/// evaluation store. Owned by [`SyncService`]; no module-level globals.
#[derive(Debug, Default)]
pub struct AppState {
    pub teams: Vec<Team>,
    pub judges: Vec<Judge>,
    pub evaluations: EvaluationStore,
}

/// Distinct user-facing outcome for every submission path.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Online insert accepted by the backend; record carries its identity.
    Submitted(Evaluation),
    /// Online update of an existing evaluation, mirrored locally.
    Updated(Evaluation),
    /// Offline mode: saved to local state only.
    SavedLocally(Evaluation),
    /// Backend reachable but the write was rejected for policy reasons;
    /// saved locally so the work is not lost. Surfaced as a warning.
    SavedLocallyWarning(Evaluation),
}

/// The reconciliation service: startup load, submission write paths,
/// cascade deletes, and read-through result helpers.
pub struct SyncService {
    backend: Arc<dyn JudgingBackend>,
    gate: ConnectivityGate,
    state: AppState,
}

impl SyncService {
    pub fn new(backend: Arc<dyn JudgingBackend>) -> Self {
        Self {
            backend,
            gate: ConnectivityGate::new(),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn gate(&self) -> &ConnectivityGate {
        &self.gate
    }

    pub fn teams(&self) -> &[Team] {
        &self.state.teams
    }

    pub fn judges(&self) -> &[Judge] {
        &self.state.judges
    }

    /// Probe the backend and populate the collections.
    ///
    /// Reachable: fetch all three collections and replace wholesale; an
    /// empty remote roster is seeded best-effort and served locally.
    /// Unreachable (or any read fails): demo roster, empty judges and
    /// evaluations, offline for the rest of the session.
    pub async fn startup_load(&mut self) {
        if let Err(e) = self.backend.probe().await {
            warn!(error = %e, "backend unreachable, entering offline mode");
            self.enter_offline();
            return;
        }

        let fetched = self.fetch_all().await;
        match fetched {
            Ok((teams, judges, evaluations)) => {
                info!(
                    teams = teams.len(),
                    judges = judges.len(),
                    evaluations = evaluations.len(),
                    "loaded state from backend"
                );
                if teams.is_empty() {
                    self.push_seed_roster().await;
                    self.state.teams = seed_teams();
                } else {
                    self.state.teams = teams;
                }
                self.state.judges = judges;
                self.state.evaluations.replace_all(evaluations);
            }
            Err(e) => {
                warn!(error = %e, "startup fetch failed, entering offline mode");
                self.enter_offline();
            }
        }
    }

    /// Skip the probe and start in the degraded mode directly: demo
    /// roster, empty judges and evaluations, no remote writes.
    pub fn startup_offline(&mut self) {
        info!("starting in forced offline mode");
        self.enter_offline();
    }

    async fn fetch_all(&self) -> Result<(Vec<Team>, Vec<Judge>, Vec<Evaluation>), BackendError> {
        let teams = self.backend.list_teams().await?;
        let judges = self.backend.list_judges().await?;
        let evaluations = self.backend.list_evaluations().await?;
        Ok((teams, judges, evaluations))
    }

    fn enter_offline(&mut self) {
        self.gate.mark_unreachable();
        self.state.teams = seed_teams();
        self.state.judges.clear();
        self.state.evaluations.replace_all(Vec::new());
    }

    /// Best-effort insert of the demo roster into an empty backend.
    /// Individual failures are logged and ignored.
    async fn push_seed_roster(&self) {
        for team in seed_teams() {
            let draft = NewTeam {
                name: team.name.clone(),
                members: team.members.clone(),
                project: team.project.clone(),
                institution: team.institution.clone(),
            };
            if let Err(e) = self.backend.insert_team(draft).await {
                debug!(team = %team.name, error = %e, "seed insert skipped");
            }
        }
    }

    /// Submit (or resubmit) a judge's evaluation of a team.
    ///
    /// Ids are validated before any branching; a rejected submission
    /// leaves both local and remote state unchanged.
    pub async fn submit_evaluation(
        &mut self,
        team_id: &str,
        judge_id: &str,
        criteria: Criteria,
        notes: Option<String>,
    ) -> Result<SubmissionOutcome, StoreError> {
        let team = EntityId::parse(team_id)?;
        let judge = EntityId::parse(judge_id)?;

        if !self.gate.is_reachable() {
            let saved = self
                .state
                .evaluations
                .upsert(team_id, judge_id, criteria, notes)?;
            debug!(team = %team, judge = %judge, "evaluation saved locally (offline)");
            return Ok(SubmissionOutcome::SavedLocally(saved));
        }

        let existing = self.state.evaluations.find(&team, &judge).cloned();

        match existing {
            Some(existing) => {
                let patch = EvaluationPatch {
                    criteria,
                    total_score: criteria.total(),
                    notes: notes.clone(),
                };
                match self.backend.update_evaluation(&existing.id, &patch).await {
                    Ok(()) => {
                        let saved = self
                            .state
                            .evaluations
                            .upsert(team_id, judge_id, criteria, notes)?;
                        debug!(evaluation = %saved.id, "evaluation updated");
                        Ok(SubmissionOutcome::Updated(saved))
                    }
                    Err(BackendError::PermissionDenied(reason)) => {
                        warn!(%reason, "update denied by backend, keeping local copy");
                        let saved = self
                            .state
                            .evaluations
                            .upsert(team_id, judge_id, criteria, notes)?;
                        Ok(SubmissionOutcome::SavedLocallyWarning(saved))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            None => {
                let draft = NewEvaluation {
                    team_id: team.clone(),
                    judge_id: judge.clone(),
                    criteria,
                    total_score: criteria.total(),
                    notes: notes.clone(),
                };
                match self.backend.insert_evaluation(draft).await {
                    Ok(created) => {
                        self.state.evaluations.adopt(created.clone());
                        debug!(evaluation = %created.id, "evaluation submitted");
                        Ok(SubmissionOutcome::Submitted(created))
                    }
                    Err(BackendError::PermissionDenied(reason)) => {
                        warn!(%reason, "insert denied by backend, keeping local copy");
                        let saved = self
                            .state
                            .evaluations
                            .upsert(team_id, judge_id, criteria, notes)?;
                        Ok(SubmissionOutcome::SavedLocallyWarning(saved))
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Add a team. Online: backend assigns the identity. Offline: a fresh
    /// UUID is minted locally.
    pub async fn add_team(&mut self, draft: NewTeam) -> Result<Team, StoreError> {
        let team = if self.gate.is_reachable() {
            self.backend.insert_team(draft).await?
        } else {
            Team {
                id: EntityId::generate(),
                name: draft.name,
                members: draft.members,
                project: draft.project,
                institution: draft.institution,
            }
        };
        info!(team = %team.name, "team added");
        self.state.teams.push(team.clone());
        Ok(team)
    }

    pub async fn add_judge(&mut self, draft: NewJudge) -> Result<Judge, StoreError> {
        let judge = if self.gate.is_reachable() {
            self.backend.insert_judge(draft).await?
        } else {
            Judge {
                id: EntityId::generate(),
                name: draft.name,
                email: draft.email,
            }
        };
        info!(judge = %judge.name, "judge added");
        self.state.judges.push(judge.clone());
        Ok(judge)
    }

    /// Bulk import of teams. The caller (the import boundary) has already
    /// filtered out records missing required fields.
    pub async fn upload_teams(&mut self, drafts: Vec<NewTeam>) -> Result<Vec<Team>, StoreError> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.add_team(draft).await?);
        }
        Ok(created)
    }

    pub async fn upload_judges(
        &mut self,
        drafts: Vec<NewJudge>,
    ) -> Result<Vec<Judge>, StoreError> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.add_judge(draft).await?);
        }
        Ok(created)
    }

    /// Remove a team and cascade its evaluations. Online: remote
    /// evaluations first, then the team row, then the local prune; a
    /// remote failure propagates with local state untouched.
    pub async fn remove_team(&mut self, team_id: &str) -> Result<(), StoreError> {
        let id = EntityId::parse(team_id)?;
        if self.gate.is_reachable() {
            self.backend.delete_evaluations_by_team(&id).await?;
            self.backend.delete_team(&id).await?;
        }
        self.state.teams.retain(|t| t.id != id);
        self.state.evaluations.remove_by_team(&id);
        info!(team = %id, "team removed");
        Ok(())
    }

    pub async fn remove_judge(&mut self, judge_id: &str) -> Result<(), StoreError> {
        let id = EntityId::parse(judge_id)?;
        if self.gate.is_reachable() {
            self.backend.delete_evaluations_by_judge(&id).await?;
            self.backend.delete_judge(&id).await?;
        }
        self.state.judges.retain(|j| j.id != id);
        self.state.evaluations.remove_by_judge(&id);
        info!(judge = %id, "judge removed");
        Ok(())
    }

    /// Clear every evaluation. A remote permission rejection is tolerated
    /// (the local clear still happens); other remote failures propagate.
    pub async fn reset_evaluations(&mut self) -> Result<(), StoreError> {
        if self.gate.is_reachable() {
            match self.backend.delete_all_evaluations().await {
                Ok(()) | Err(BackendError::PermissionDenied(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.state.evaluations.reset();
        info!("all evaluations reset");
        Ok(())
    }

    /// All evaluations submitted by one judge.
    pub fn judge_evaluations(&self, judge_id: &str) -> Result<Vec<Evaluation>, StoreError> {
        let id = EntityId::parse(judge_id)?;
        Ok(self.state.evaluations.list_by_judge(&id))
    }

    /// Ranked leaderboard, recomputed from current state.
    pub fn team_results(&self) -> Vec<TeamResult> {
        compute_team_results(&self.state.teams, self.state.evaluations.all())
    }

    /// Result for a single team; `None` if the id is not on the roster.
    pub fn team_result(&self, team_id: &str) -> Result<Option<TeamResult>, StoreError> {
        let id = EntityId::parse(team_id)?;
        Ok(compute_team_result(
            &id,
            &self.state.teams,
            self.state.evaluations.all(),
        ))
    }
}
