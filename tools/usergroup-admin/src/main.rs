//! Usergroup Admin - User Group Listing and Toggling
//!
//! Exports the workspace's user groups to CSV, or enables/disables groups
//! one by one. Groups that still fail after the client's rate-limit
//! retries are listed at the end of the run.
//!
//! # Usage
//!
//! ```bash
//! # Export all user groups
//! usergroup-admin --team-id T0123456 list --output usergroups.csv
//!
//! # Disable two groups
//! usergroup-admin --team-id T0123456 disable --group S012 --group S013
//!
//! # Enable every group in a roster with a group_id header
//! usergroup-admin --team-id T0123456 enable --roster groups.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use slack_admin_core::{SlackClient, auth, roster};

/// User group administration.
#[derive(Parser, Debug)]
#[command(name = "usergroup-admin")]
#[command(about = "Lists, enables, and disables user groups")]
struct Args {
    /// Slack token with the usergroups scopes.
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
    /// Export all user groups to CSV.
    List {
        /// Include disabled groups.
        #[arg(long)]
        include_disabled: bool,

        /// Output CSV path.
        #[arg(short, long, default_value = "slack_usergroups.csv")]
        output: PathBuf,
    },
    /// Enable user groups.
    Enable {
        /// Group ID (repeatable).
        #[arg(long = "group", conflicts_with = "roster")]
        groups: Vec<String>,

        /// CSV with a `group_id` header column.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Disable user groups.
    Disable {
        /// Group ID (repeatable).
        #[arg(long = "group", conflicts_with = "roster")]
        groups: Vec<String>,

        /// CSV with a `group_id` header column.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

/// Writes the user group export.
async fn list_groups(
    client: &SlackClient,
    team_id: &str,
    include_disabled: bool,
    output: &Path,
) -> anyhow::Result<()> {
    let params = [
        ("team_id", team_id.to_string()),
        ("include_count", "true".to_string()),
        ("include_disabled", include_disabled.to_string()),
    ];
    let payload = client
        .get("usergroups.list", &params)
        .await
        .context("Failed to list user groups")?;

    let groups = payload
        .get("usergroups")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writer.write_record(["id", "handle", "name", "description", "user_count"])?;

    for group in &groups {
        let field = |key: &str| {
            group
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };
        let user_count = group
            .get("user_count")
            .and_then(Value::as_u64)
            .map(|count| count.to_string())
            .unwrap_or_default();
        writer.write_record([
            field("id"),
            field("handle"),
            field("name"),
            field("description"),
            user_count,
        ])?;
    }

    writer.flush()?;
    println!("Exported {} user group(s) to {}", groups.len(), output.display());
    Ok(())
}

/// Enables or disables each group, collecting the ones that fail.
async fn toggle_groups(
    client: &SlackClient,
    team_id: &str,
    method: &str,
    group_ids: &[String],
) -> anyhow::Result<()> {
    let mut failed = Vec::new();

    for group_id in group_ids {
        let fields = [
            ("usergroup", group_id.clone()),
            ("team_id", team_id.to_string()),
        ];
        match client.post_form(method, &fields).await {
            Ok(_) => println!("{method} succeeded for {group_id}."),
            Err(e) => {
                eprintln!("{method} failed for {group_id}: {e}");
                failed.push(group_id.clone());
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("{} group(s) could not be updated: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token.clone(), args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    match args.command {
        Command::List {
            include_disabled,
            output,
        } => list_groups(&client, &args.team_id, include_disabled, &output).await,
        Command::Enable { groups, roster } => {
            let group_ids = resolve_groups(groups, roster)?;
            toggle_groups(&client, &args.team_id, "usergroups.enable", &group_ids).await
        }
        Command::Disable { groups, roster } => {
            let group_ids = resolve_groups(groups, roster)?;
            toggle_groups(&client, &args.team_id, "usergroups.disable", &group_ids).await
        }
    }
}

/// Resolves the target group ids from repeated flags or a roster file.
fn resolve_groups(groups: Vec<String>, roster_path: Option<PathBuf>) -> anyhow::Result<Vec<String>> {
    if let Some(path) = roster_path {
        return roster::read_column(&path, "group_id")
            .with_context(|| format!("Failed to read roster {}", path.display()));
    }
    if groups.is_empty() {
        anyhow::bail!("Pass --group or --roster");
    }
    Ok(groups)
}
