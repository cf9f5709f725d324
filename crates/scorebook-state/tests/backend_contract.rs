//! Contract tests for the SurrealDB backend against the in-memory engine.
//!
//! These exercise the same behaviors the sync layer relies on: identity
//! assignment on insert, update-by-identity, and targeted deletes.

use scorebook_core::backend::{EvaluationPatch, JudgingBackend, NewEvaluation, NewJudge, NewTeam};
use scorebook_core::{BackendError, Criteria, EntityId};
use scorebook_state::SurrealBackend;

fn criteria(each: u8) -> Criteria {
    Criteria {
        innovation: each,
        technical: each,
        presentation: each,
        impact: each,
        completion: each,
    }
}

fn new_team(name: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        members: vec!["A".to_string(), "B".to_string()],
        project: format!("{name} project"),
        institution: None,
    }
}

async fn backend() -> SurrealBackend {
    SurrealBackend::in_memory().await.unwrap()
}

#[tokio::test]
async fn probe_succeeds_on_live_connection() {
    let backend = backend().await;
    backend.probe().await.unwrap();
}

#[tokio::test]
async fn insert_team_assigns_canonical_identity() {
    let backend = backend().await;
    let created = backend.insert_team(new_team("Rowboat")).await.unwrap();

    // Backend-assigned ids are canonical UUIDs, not seed tokens.
    assert_eq!(created.id.as_str().len(), 36);
    assert!(EntityId::parse(created.id.as_str()).is_ok());

    let listed = backend.list_teams().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].name, "Rowboat");
}

#[tokio::test]
async fn insert_judge_round_trips() {
    let backend = backend().await;
    let created = backend
        .insert_judge(NewJudge {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await
        .unwrap();

    let listed = backend.list_judges().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].email, "ada@example.com");
}

#[tokio::test]
async fn evaluation_insert_then_update_by_identity() {
    let backend = backend().await;
    let team = backend.insert_team(new_team("Scored")).await.unwrap();
    let judge = backend
        .insert_judge(NewJudge {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await
        .unwrap();

    let created = backend
        .insert_evaluation(NewEvaluation {
            team_id: team.id.clone(),
            judge_id: judge.id.clone(),
            criteria: criteria(10),
            total_score: 50,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.total_score, 50);

    backend
        .update_evaluation(
            &created.id,
            &EvaluationPatch {
                criteria: criteria(16),
                total_score: 80,
                notes: Some("revised".to_string()),
            },
        )
        .await
        .unwrap();

    let listed = backend.list_evaluations().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].total_score, 80);
    assert_eq!(listed[0].notes.as_deref(), Some("revised"));
    assert!(listed[0].updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_of_missing_evaluation_is_not_found() {
    let backend = backend().await;
    let err = backend
        .update_evaluation(
            &EntityId::parse("2f1e8a40-9c33-4b6f-8d21-0a5e7c4d9b12").unwrap(),
            &EvaluationPatch {
                criteria: criteria(1),
                total_score: 5,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn delete_evaluations_by_team_is_targeted() {
    let backend = backend().await;
    let team_a = backend.insert_team(new_team("A")).await.unwrap();
    let team_b = backend.insert_team(new_team("B")).await.unwrap();
    let judge = backend
        .insert_judge(NewJudge {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await
        .unwrap();

    for team in [&team_a, &team_b] {
        backend
            .insert_evaluation(NewEvaluation {
                team_id: team.id.clone(),
                judge_id: judge.id.clone(),
                criteria: criteria(10),
                total_score: 50,
                notes: None,
            })
            .await
            .unwrap();
    }

    backend.delete_evaluations_by_team(&team_a.id).await.unwrap();

    let remaining = backend.list_evaluations().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].team_id, team_b.id);
}

#[tokio::test]
async fn delete_team_and_all_evaluations() {
    let backend = backend().await;
    let team = backend.insert_team(new_team("Gone")).await.unwrap();
    let judge = backend
        .insert_judge(NewJudge {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await
        .unwrap();
    backend
        .insert_evaluation(NewEvaluation {
            team_id: team.id.clone(),
            judge_id: judge.id.clone(),
            criteria: criteria(5),
            total_score: 25,
            notes: None,
        })
        .await
        .unwrap();

    backend.delete_team(&team.id).await.unwrap();
    backend.delete_all_evaluations().await.unwrap();

    assert!(backend.list_teams().await.unwrap().is_empty());
    assert!(backend.list_evaluations().await.unwrap().is_empty());

    // Deletes are idempotent.
    backend.delete_team(&team.id).await.unwrap();
}
