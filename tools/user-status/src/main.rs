//! User Status - Account Activation and Deactivation
//!
//! Activates or deactivates Slack accounts through the SCIM API. Activation
//! is a PATCH setting `active: true`; deactivation is a DELETE (Slack
//! answers 204 and keeps the record).
//!
//! # Usage
//!
//! ```bash
//! # Deactivate one account
//! user-status deactivate --user W012ABC
//!
//! # Activate every id in a headerless roster
//! user-status activate --roster users.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use slack_admin_core::{ScimClient, auth, roster, scim};

/// Account activation and deactivation over SCIM.
#[derive(Parser, Debug)]
#[command(name = "user-status")]
#[command(about = "Activates or deactivates accounts through SCIM")]
struct Args {
    /// SCIM access token.
    #[arg(long, env = "SLACK_SCIM_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the SCIM access token.
    #[arg(long, env = "SLACK_SCIM_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reactivate one or more accounts.
    Activate {
        /// Single user ID.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Deactivate one or more accounts.
    Deactivate {
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

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = ScimClient::new(token)?;

    match args.command {
        Command::Activate { user, roster } => {
            let user_ids = collect_user_ids(user, roster.as_deref())?;
            for user_id in &user_ids {
                match client.patch_user(user_id, &scim::activate_payload()).await {
                    Ok(_) => println!("User {user_id} has been activated."),
                    Err(e) => eprintln!("Failed to activate {user_id}: {e}"),
                }
            }
        }
        Command::Deactivate { user, roster } => {
            let user_ids = collect_user_ids(user, roster.as_deref())?;
            for user_id in &user_ids {
                match client.delete_user(user_id).await {
                    Ok(()) => println!("User {user_id} has been deactivated."),
                    Err(e) => eprintln!("Failed to deactivate {user_id}: {e}"),
                }
            }
        }
    }

    Ok(())
}
