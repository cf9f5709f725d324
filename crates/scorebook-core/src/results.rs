//! Aggregation engine
//!
//! Derives per-team results from the current roster and evaluation set.
//! Pure functions of their inputs: nothing here is cached, results are
//! recomputed on demand so they can never drift from the store.

use serde::Serialize;

use crate::model::{EntityId, Evaluation, Team};

/// Derived aggregate for one team. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TeamResult {
    pub team: Team,
    pub evaluations: Vec<Evaluation>,
    pub total_score: u32,
    pub average_score: f64,
}

/// Compute ranked results for the whole roster.
///
/// Sorted by `total_score` descending. The sort is stable, so teams with
/// equal totals keep their relative roster order; no secondary key.
pub fn compute_team_results(teams: &[Team], evaluations: &[Evaluation]) -> Vec<TeamResult> {
    let mut results: Vec<TeamResult> = teams
        .iter()
        .map(|team| result_for(team.clone(), evaluations))
        .collect();
    results.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    results
}

/// Same computation scoped to one team; `None` if the id is not on the roster.
pub fn compute_team_result(
    team_id: &EntityId,
    teams: &[Team],
    evaluations: &[Evaluation],
) -> Option<TeamResult> {
    teams
        .iter()
        .find(|t| t.id == *team_id)
        .map(|team| result_for(team.clone(), evaluations))
}

fn result_for(team: Team, evaluations: &[Evaluation]) -> TeamResult {
    let team_evaluations: Vec<Evaluation> = evaluations
        .iter()
        .filter(|e| e.team_id == team.id)
        .cloned()
        .collect();
    let total_score: u32 = team_evaluations.iter().map(|e| e.total_score).sum();
    let average_score = if team_evaluations.is_empty() {
        0.0
    } else {
        f64::from(total_score) / team_evaluations.len() as f64
    };
    TeamResult {
        team,
        evaluations: team_evaluations,
        total_score,
        average_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Criteria;
    use chrono::Utc;

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: EntityId::parse(id).unwrap(),
            name: name.to_string(),
            members: vec![],
            project: format!("{name} project"),
            institution: None,
        }
    }

    fn evaluation(team_id: &str, judge_id: &str, total: u32) -> Evaluation {
        // Spread the total across criteria; only the derived sum matters here.
        let base = (total / 5) as u8;
        let rem = (total % 5) as u8;
        Evaluation {
            id: EntityId::generate(),
            team_id: EntityId::parse(team_id).unwrap(),
            judge_id: EntityId::parse(judge_id).unwrap(),
            criteria: Criteria {
                innovation: base + rem,
                technical: base,
                presentation: base,
                impact: base,
                completion: base,
            },
            total_score: total,
            notes: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn zero_evaluations_means_zero_scores() {
        let teams = vec![team("t1", "Solo")];
        let results = compute_team_results(&teams, &[]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_score, 0);
        assert_eq!(results[0].average_score, 0.0);
        assert!(results[0].evaluations.is_empty());
    }

    #[test]
    fn sums_and_averages_partial_coverage() {
        let teams = vec![team("t1", "Scored")];
        let evals = vec![evaluation("t1", "j1", 70), evaluation("t1", "j2", 85)];
        let results = compute_team_results(&teams, &evals);

        assert_eq!(results[0].total_score, 155);
        assert_eq!(results[0].average_score, 77.5);
        assert_eq!(results[0].evaluations.len(), 2);
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let teams = vec![team("t1", "A"), team("t2", "B"), team("t3", "C")];
        let evals = vec![
            evaluation("t1", "j1", 75),
            evaluation("t1", "j2", 75), // A: 150
            evaluation("t2", "j1", 100),
            evaluation("t2", "j2", 100), // B: 200
            evaluation("t3", "j1", 75),
            evaluation("t3", "j2", 75), // C: 150, ties A
        ];
        let results = compute_team_results(&teams, &evals);

        let order: Vec<&str> = results.iter().map(|r| r.team.name.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn only_matching_evaluations_count() {
        let teams = vec![team("t1", "Mine")];
        let evals = vec![evaluation("t1", "j1", 40), evaluation("t2", "j1", 95)];
        let result = compute_team_result(&EntityId::parse("t1").unwrap(), &teams, &evals).unwrap();

        assert_eq!(result.total_score, 40);
        assert_eq!(result.evaluations.len(), 1);
    }

    #[test]
    fn unknown_team_is_none() {
        let teams = vec![team("t1", "Known")];
        assert!(compute_team_result(&EntityId::parse("t9").unwrap(), &teams, &[]).is_none());
    }
}
