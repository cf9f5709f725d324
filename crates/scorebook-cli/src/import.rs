//! Bulk import boundary
//!
//! Parses JSON arrays of team-like and judge-like records and filters out
//! entries missing required fields (team: name + project; judge: name +
//! email) before they reach the core. Identity assignment happens in the
//! sync layer, never here.

use serde::Deserialize;

use scorebook_core::{NewJudge, NewTeam};

#[derive(Debug, Deserialize)]
struct TeamRecord {
    name: Option<String>,
    #[serde(default)]
    members: Vec<String>,
    project: Option<String>,
    institution: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JudgeRecord {
    name: Option<String>,
    email: Option<String>,
}

/// Parse a JSON array of team records, dropping incomplete entries.
/// Returns the accepted drafts and the number of records dropped.
pub fn parse_teams(json: &str) -> Result<(Vec<NewTeam>, usize), serde_json::Error> {
    let records: Vec<TeamRecord> = serde_json::from_str(json)?;
    let total = records.len();
    let accepted: Vec<NewTeam> = records
        .into_iter()
        .filter_map(|r| match (r.name, r.project) {
            (Some(name), Some(project)) if !name.is_empty() && !project.is_empty() => {
                Some(NewTeam {
                    name,
                    members: r.members,
                    project,
                    institution: r.institution,
                })
            }
            _ => None,
        })
        .collect();
    let dropped = total - accepted.len();
    Ok((accepted, dropped))
}

/// Parse a JSON array of judge records, dropping incomplete entries.
pub fn parse_judges(json: &str) -> Result<(Vec<NewJudge>, usize), serde_json::Error> {
    let records: Vec<JudgeRecord> = serde_json::from_str(json)?;
    let total = records.len();
    let accepted: Vec<NewJudge> = records
        .into_iter()
        .filter_map(|r| match (r.name, r.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(NewJudge { name, email })
            }
            _ => None,
        })
        .collect();
    let dropped = total - accepted.len();
    Ok((accepted, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teams_missing_required_fields_are_dropped() {
        let json = r#"[
            {"name": "Alpha", "project": "P1", "members": ["a"]},
            {"name": "NoProject"},
            {"project": "NoName"},
            {"name": "", "project": "Empty name"},
            {"name": "Beta", "project": "P2", "institution": "Uni"}
        ]"#;
        let (teams, dropped) = parse_teams(json).unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(dropped, 3);
        assert_eq!(teams[0].name, "Alpha");
        assert_eq!(teams[1].institution.as_deref(), Some("Uni"));
    }

    #[test]
    fn judges_missing_required_fields_are_dropped() {
        let json = r#"[
            {"name": "Ada", "email": "ada@example.com"},
            {"name": "NoEmail"},
            {"email": "orphan@example.com"}
        ]"#;
        let (judges, dropped) = parse_judges(json).unwrap();

        assert_eq!(judges.len(), 1);
        assert_eq!(dropped, 2);
        assert_eq!(judges[0].email, "ada@example.com");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_teams("not json").is_err());
        assert!(parse_judges("{\"not\": \"an array\"}").is_err());
    }
}
