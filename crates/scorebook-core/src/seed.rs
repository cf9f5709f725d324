//! Built-in demo roster
//!
//! Fallback team list served when the durable backend is unreachable at
//! startup. Seed ids use the short token form (`t1`..`t5`), which the id
//! validator accepts alongside canonical UUIDs.

use crate::model::{EntityId, Team};

/// The five demo teams.
pub fn seed_teams() -> Vec<Team> {
    fn team(id: &str, name: &str, members: &[&str], project: &str, institution: &str) -> Team {
        Team {
            id: EntityId::parse(id).expect("seed ids are valid short tokens"),
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            project: project.to_string(),
            institution: Some(institution.to_string()),
        }
    }

    vec![
        team(
            "t1",
            "Code Wizards",
            &["Alice Johnson", "Bob Smith", "Charlie Brown"],
            "AI-Powered Waste Management System",
            "Delhi Technical University",
        ),
        team(
            "t2",
            "Binary Beasts",
            &["Diana Prince", "Bruce Wayne", "Clark Kent"],
            "Smart Agriculture Monitoring",
            "IIT Roorkee",
        ),
        team(
            "t3",
            "Tech Titans",
            &["Elon Mask", "Steve Job", "Bill Get"],
            "Blockchain for Supply Chain",
            "Dev Bhoomi Uttarakhand University",
        ),
        team(
            "t4",
            "Quantum Quips",
            &["Priya Singh", "Rahul Sharma", "Neha Kumar"],
            "AR Navigation for Campus",
            "Dev Bhoomi Uttarakhand University",
        ),
        team(
            "t5",
            "Data Dragons",
            &["Amit Patel", "Sanjay Gupta", "Kiran Rao"],
            "ML-based Disease Prediction",
            "IIIT Delhi",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_pass_validation() {
        let teams = seed_teams();
        assert_eq!(teams.len(), 5);
        for team in &teams {
            assert!(EntityId::parse(team.id.as_str()).is_ok());
        }
    }
}
