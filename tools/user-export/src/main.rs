//! User Export - Workspace User Roster Export
//!
//! Pages through `admin.users.list` for one or more workspaces and writes
//! every user to a single CSV.
//!
//! # Usage
//!
//! ```bash
//! # Export one workspace
//! user-export --team-id T0123456
//!
//! # Export several workspaces into one file
//! user-export --team-id T0123456 --team-id T0456789 --output all_users.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use slack_admin_core::types::AdminUser;
use slack_admin_core::{SlackClient, auth};

/// Workspace user roster export.
#[derive(Parser, Debug)]
#[command(name = "user-export")]
#[command(about = "Exports all workspace users to CSV")]
struct Args {
    /// Slack token with admin scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Workspace (team) ID to export (repeatable).
    #[arg(short, long = "team-id", required = true)]
    team_ids: Vec<String>,

    /// Output CSV path.
    #[arg(short, long, default_value = "all_slack_users.csv")]
    output: PathBuf,
}

/// One exported CSV row.
#[derive(Debug, Serialize)]
struct UserRow {
    id: String,
    email: String,
    is_admin: bool,
    is_owner: bool,
    is_primary_owner: bool,
    is_restricted: bool,
    is_ultra_restricted: bool,
    is_bot: bool,
}

impl From<AdminUser> for UserRow {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            is_admin: user.is_admin,
            is_owner: user.is_owner,
            is_primary_owner: user.is_primary_owner,
            is_restricted: user.is_restricted,
            is_ultra_restricted: user.is_ultra_restricted,
            is_bot: user.is_bot,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut total = 0usize;
    for team_id in &args.team_ids {
        let params = [
            ("team_id", team_id.clone()),
            ("limit", "100".to_string()),
        ];
        let records = client
            .paginate("admin.users.list", &params, "users")
            .await
            .with_context(|| format!("Failed to list users for {team_id}"))?;

        for record in records {
            let user: AdminUser = serde_json::from_value(record)
                .context("Unexpected user record shape from admin.users.list")?;
            writer.serialize(UserRow::from(user))?;
            total += 1;
        }
        println!("Fetched workspace {team_id}");
    }

    writer.flush()?;
    println!("Exported {total} user(s) to {}", args.output.display());
    Ok(())
}
