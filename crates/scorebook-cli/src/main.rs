//! Scorebook - hackathon judging portal CLI
//!
//! The `scorebook` command drives the judging core: admins manage the
//! team/judge roster and reset or export results, judges submit rubric
//! scores. State lives in a SurrealDB backend selected via environment
//! variables; when the backend is unreachable (or `--offline` is passed)
//! the session runs against local state with the built-in demo roster.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use scorebook_core::{
    build_standings, Criteria, NewJudge, NewTeam, SubmissionOutcome, SyncService,
};
use scorebook_state::SurrealBackend;

mod import;

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hackathon judging portal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip the backend entirely and run against local state
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the team roster
    Teams {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Manage the judging panel
    Judges {
        #[command(subcommand)]
        command: JudgeCommands,
    },

    /// Submit a judge's evaluation of a team
    Evaluate {
        /// Team id
        #[arg(long)]
        team: String,

        /// Judge id
        #[arg(long)]
        judge: String,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        innovation: u8,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        technical: u8,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        presentation: u8,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        impact: u8,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
        completion: u8,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the ranked leaderboard
    Results {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Limit to a single team id
        #[arg(long)]
        team: Option<String>,
    },

    /// Export the leaderboard snapshot as JSON
    Export {
        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Delete every evaluation
    Reset {
        /// Confirm the irreversible reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TeamCommands {
    /// Add a single team
    Add {
        #[arg(long)]
        name: String,

        /// Member name (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,

        #[arg(long)]
        project: String,

        #[arg(long)]
        institution: Option<String>,
    },

    /// Remove a team and its evaluations
    Remove {
        id: String,
    },

    /// List the roster
    List,

    /// Bulk import teams from a JSON file
    Import {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum JudgeCommands {
    /// Add a single judge
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },

    /// Remove a judge and their evaluations
    Remove {
        id: String,
    },

    /// List the panel
    List,

    /// Bulk import judges from a JSON file
    Import {
        file: PathBuf,
    },

    /// List one judge's submitted evaluations
    Evaluations {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut service = build_service(cli.offline).await?;

    match cli.command {
        Commands::Teams { command } => run_teams(&mut service, command).await,
        Commands::Judges { command } => run_judges(&mut service, command).await,
        Commands::Evaluate {
            team,
            judge,
            innovation,
            technical,
            presentation,
            impact,
            completion,
            notes,
        } => {
            let criteria = Criteria {
                innovation,
                technical,
                presentation,
                impact,
                completion,
            };
            let outcome = service
                .submit_evaluation(&team, &judge, criteria, notes)
                .await
                .context("failed to submit evaluation")?;
            report_outcome(&outcome);
            Ok(())
        }
        Commands::Results { json, team } => run_results(&service, json, team),
        Commands::Export { out } => {
            let standings = build_standings(&service.team_results());
            let payload =
                serde_json::to_string_pretty(&standings).context("failed to serialize export")?;
            std::fs::write(&out, payload)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Exported {} teams to {}", standings.len(), out.display());
            Ok(())
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("reset deletes every evaluation; re-run with --yes to confirm");
            }
            service
                .reset_evaluations()
                .await
                .context("failed to reset evaluations")?;
            println!("All evaluations have been reset");
            Ok(())
        }
    }
}

/// Pick the backend and load initial state.
///
/// `SCOREBOOK_DB_ENDPOINT` selects a remote backend; without it the
/// session runs against an in-memory instance. A failed remote connection
/// degrades to offline mode rather than aborting, matching the startup
/// policy of the sync layer.
async fn build_service(offline: bool) -> Result<SyncService> {
    if offline {
        let backend = SurrealBackend::in_memory()
            .await
            .context("failed to start in-memory backend")?;
        let mut service = SyncService::new(Arc::new(backend));
        service.startup_offline();
        return Ok(service);
    }

    let backend = if std::env::var("SCOREBOOK_DB_ENDPOINT").is_ok() {
        match SurrealBackend::from_env().await {
            Ok(backend) => Some(backend),
            Err(e) => {
                warn!(error = %e, "backend connection failed");
                None
            }
        }
    } else {
        Some(
            SurrealBackend::in_memory()
                .await
                .context("failed to start in-memory backend")?,
        )
    };

    match backend {
        Some(backend) => {
            let mut service = SyncService::new(Arc::new(backend));
            service.startup_load().await;
            Ok(service)
        }
        None => {
            // Connection failed outright: same degraded mode the probe
            // failure path produces.
            let fallback = SurrealBackend::in_memory()
                .await
                .context("failed to start in-memory backend")?;
            let mut service = SyncService::new(Arc::new(fallback));
            service.startup_offline();
            println!("Backend unreachable; running offline with the demo roster");
            Ok(service)
        }
    }
}

async fn run_teams(service: &mut SyncService, command: TeamCommands) -> Result<()> {
    match command {
        TeamCommands::Add {
            name,
            members,
            project,
            institution,
        } => {
            let team = service
                .add_team(NewTeam {
                    name,
                    members,
                    project,
                    institution,
                })
                .await
                .context("failed to add team")?;
            println!("Team \"{}\" added ({})", team.name, team.id);
        }
        TeamCommands::Remove { id } => {
            service
                .remove_team(&id)
                .await
                .context("failed to remove team")?;
            println!("Team removed");
        }
        TeamCommands::List => {
            for team in service.teams() {
                let institution = team.institution.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  {} [{}]",
                    team.id, team.name, team.project, institution
                );
            }
        }
        TeamCommands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let (drafts, dropped) =
                import::parse_teams(&json).context("failed to parse team import")?;
            let created = service
                .upload_teams(drafts)
                .await
                .context("failed to upload teams")?;
            println!("{} teams uploaded, {} records skipped", created.len(), dropped);
        }
    }
    Ok(())
}

async fn run_judges(service: &mut SyncService, command: JudgeCommands) -> Result<()> {
    match command {
        JudgeCommands::Add { name, email } => {
            let judge = service
                .add_judge(NewJudge { name, email })
                .await
                .context("failed to add judge")?;
            println!("Judge \"{}\" added ({})", judge.name, judge.id);
        }
        JudgeCommands::Remove { id } => {
            service
                .remove_judge(&id)
                .await
                .context("failed to remove judge")?;
            println!("Judge removed");
        }
        JudgeCommands::List => {
            for judge in service.judges() {
                println!("{}  {}  <{}>", judge.id, judge.name, judge.email);
            }
        }
        JudgeCommands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let (drafts, dropped) =
                import::parse_judges(&json).context("failed to parse judge import")?;
            let created = service
                .upload_judges(drafts)
                .await
                .context("failed to upload judges")?;
            println!(
                "{} judges uploaded, {} records skipped",
                created.len(),
                dropped
            );
        }
        JudgeCommands::Evaluations { id } => {
            let evaluations = service
                .judge_evaluations(&id)
                .context("failed to list evaluations")?;
            for evaluation in evaluations {
                println!(
                    "team {}  total {}  at {}",
                    evaluation.team_id, evaluation.total_score, evaluation.updated_at
                );
            }
        }
    }
    Ok(())
}

fn run_results(service: &SyncService, json: bool, team: Option<String>) -> Result<()> {
    let results = match team {
        Some(id) => {
            let result = service
                .team_result(&id)
                .context("invalid team id")?
                .with_context(|| format!("team {id} not found"))?;
            vec![result]
        }
        None => service.team_results(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{:<5} {:<24} {:>6} {:>8} {:>6}", "rank", "team", "total", "average", "count");
    for (idx, result) in results.iter().enumerate() {
        println!(
            "{:<5} {:<24} {:>6} {:>8.1} {:>6}",
            idx + 1,
            result.team.name,
            result.total_score,
            result.average_score,
            result.evaluations.len()
        );
    }
    Ok(())
}

fn report_outcome(outcome: &SubmissionOutcome) {
    match outcome {
        SubmissionOutcome::Submitted(e) => {
            println!("Evaluation submitted successfully ({})", e.id);
        }
        SubmissionOutcome::Updated(e) => {
            println!("Evaluation updated successfully ({})", e.id);
        }
        SubmissionOutcome::SavedLocally(_) => {
            println!("Evaluation saved locally (offline mode)");
        }
        SubmissionOutcome::SavedLocallyWarning(_) => {
            println!("Warning: online write failed, but the evaluation was saved locally");
        }
    }
}
