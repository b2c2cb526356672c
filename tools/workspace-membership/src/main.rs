//! Workspace Membership - Workspace Assignment
//!
//! Adds users to a workspace with `admin.users.assign` or removes them
//! with `admin.users.remove`, one user or a roster at a time.
//!
//! # Usage
//!
//! ```bash
//! # Add one user to a workspace
//! workspace-membership add --team-id T0123456 --user W012ABC
//!
//! # Remove every id in a headerless roster
//! workspace-membership remove --team-id T0123456 --roster leavers.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use slack_admin_core::{SlackClient, auth, roster};

/// Workspace membership administration.
#[derive(Parser, Debug)]
#[command(name = "workspace-membership")]
#[command(about = "Adds or removes users from a workspace")]
struct Args {
    /// Slack token with the admin.users scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Workspace (team) ID.
    #[arg(short, long, env = "SLACK_TEAM_ID")]
    team_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add users to the workspace.
    Add {
        /// Single user ID.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Remove users from the workspace.
    Remove {
        /// Single user ID.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

/// Resolves the target user ids from a single flag or a roster file.
fn collect_user_ids(user: Option<String>, roster_path: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match (user, roster_path) {
        (Some(id), _) => Ok(vec![id]),
        (None, Some(path)) => roster::read_single_column(path)
            .with_context(|| format!("Failed to read roster {}", path.display())),
        (None, None) => anyhow::bail!("Pass --user or --roster"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token.clone(), args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let (method, user, roster_path, verb) = match args.command {
        Command::Add { user, roster } => ("admin.users.assign", user, roster, "added to"),
        Command::Remove { user, roster } => ("admin.users.remove", user, roster, "removed from"),
    };

    let user_ids = collect_user_ids(user, roster_path.as_deref())?;
    for user_id in &user_ids {
        let fields = [
            ("team_id", args.team_id.clone()),
            ("user_id", user_id.clone()),
        ];
        match client.post_form(method, &fields).await {
            Ok(_) => println!("User {user_id} {verb} {}.", args.team_id),
            Err(e) => eprintln!("Failed for user {user_id}: {e}"),
        }
    }

    Ok(())
}
