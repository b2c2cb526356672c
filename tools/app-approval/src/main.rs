//! App Approval - Workspace App Approval and Restriction
//!
//! Approves or restricts a Slack app for one workspace with
//! `admin.apps.approve` / `admin.apps.restrict`.
//!
//! # Usage
//!
//! ```bash
//! # Approve an app
//! app-approval approve --app-id A012ABC --team-id T0123456
//!
//! # Restrict an app
//! app-approval restrict --app-id A012ABC --team-id T0123456
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slack_admin_core::{SlackClient, auth};

/// Workspace app approval administration.
#[derive(Parser, Debug)]
#[command(name = "app-approval")]
#[command(about = "Approves or restricts apps for a workspace")]
struct Args {
    /// Slack token with the admin.apps scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Approve an app for installation.
    Approve {
        /// App ID.
        #[arg(long)]
        app_id: String,

        /// Workspace (team) ID.
        #[arg(long, env = "SLACK_TEAM_ID")]
        team_id: String,
    },
    /// Restrict an app from installation.
    Restrict {
        /// App ID.
        #[arg(long)]
        app_id: String,

        /// Workspace (team) ID.
        #[arg(long, env = "SLACK_TEAM_ID")]
        team_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let (method, app_id, team_id, verb) = match &args.command {
        Command::Approve { app_id, team_id } => {
            ("admin.apps.approve", app_id, team_id, "approved")
        }
        Command::Restrict { app_id, team_id } => {
            ("admin.apps.restrict", app_id, team_id, "restricted")
        }
    };

    let fields = [
        ("app_id", app_id.clone()),
        ("team_id", team_id.clone()),
    ];
    client.post_form(method, &fields).await?;
    println!("App {app_id} was {verb} successfully for {team_id}.");
    Ok(())
}
