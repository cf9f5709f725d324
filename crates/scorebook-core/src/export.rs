//! Read-only results snapshot for external serialization
//!
//! Flattens [`TeamResult`]s into rows suitable for export. The core owns
//! the shape only; the serialization format (JSON, CSV, ...) is the
//! caller's concern.

use serde::Serialize;

use crate::results::TeamResult;

/// Per-criterion averages across a team's evaluations.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CriterionAverages {
    pub innovation: f64,
    pub technical: f64,
    pub presentation: f64,
    pub impact: f64,
    pub completion: f64,
}

/// One exported leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub rank: usize,
    pub team: String,
    pub project: String,
    pub institution: Option<String>,
    pub total_score: u32,
    pub average_score: f64,
    pub evaluation_count: usize,
    pub criterion_averages: CriterionAverages,
}

/// Build export rows from ranked results. Rank is 1-based position in the
/// ranked sequence (tied totals keep distinct ranks by roster order).
pub fn build_standings(results: &[TeamResult]) -> Vec<TeamStanding> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let count = result.evaluations.len();
            let averages = if count == 0 {
                CriterionAverages::default()
            } else {
                let n = count as f64;
                let sum = |f: fn(&crate::model::Criteria) -> u8| -> f64 {
                    result
                        .evaluations
                        .iter()
                        .map(|e| f64::from(f(&e.criteria)))
                        .sum::<f64>()
                        / n
                };
                CriterionAverages {
                    innovation: sum(|c| c.innovation),
                    technical: sum(|c| c.technical),
                    presentation: sum(|c| c.presentation),
                    impact: sum(|c| c.impact),
                    completion: sum(|c| c.completion),
                }
            };
            TeamStanding {
                rank: idx + 1,
                team: result.team.name.clone(),
                project: result.team.project.clone(),
                institution: result.team.institution.clone(),
                total_score: result.total_score,
                average_score: result.average_score,
                evaluation_count: count,
                criterion_averages: averages,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Criteria, EntityId, Evaluation, Team};
    use crate::results::compute_team_results;
    use chrono::Utc;

    #[test]
    fn standings_carry_per_criterion_averages() {
        let team = Team {
            id: EntityId::parse("t1").unwrap(),
            name: "Avg".to_string(),
            members: vec![],
            project: "P".to_string(),
            institution: None,
        };
        let make = |innovation: u8| Evaluation {
            id: EntityId::generate(),
            team_id: EntityId::parse("t1").unwrap(),
            judge_id: EntityId::generate(),
            criteria: Criteria {
                innovation,
                technical: 10,
                presentation: 10,
                impact: 10,
                completion: 10,
            },
            total_score: u32::from(innovation) + 40,
            notes: None,
            updated_at: Utc::now(),
        };
        let results = compute_team_results(&[team], &[make(10), make(20)]);
        let standings = build_standings(&results);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].evaluation_count, 2);
        assert_eq!(standings[0].criterion_averages.innovation, 15.0);
        assert_eq!(standings[0].criterion_averages.technical, 10.0);
    }

    #[test]
    fn empty_team_exports_zeroes() {
        let team = Team {
            id: EntityId::parse("t1").unwrap(),
            name: "Empty".to_string(),
            members: vec![],
            project: "P".to_string(),
            institution: None,
        };
        let standings = build_standings(&compute_team_results(&[team], &[]));

        assert_eq!(standings[0].total_score, 0);
        assert_eq!(standings[0].average_score, 0.0);
        assert_eq!(standings[0].criterion_averages.impact, 0.0);
    }
}
