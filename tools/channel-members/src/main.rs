//! Channel Members - Membership Administration and Export
//!
//! Adds users to a channel, removes them, or exports the full member list
//! to CSV with each member's name and email resolved through `users.info`.
//!
//! # Usage
//!
//! ```bash
//! # Add one user
//! channel-members add --channel C024BE91L --user W012ABC
//!
//! # Remove every user in a headerless roster
//! channel-members remove --channel C024BE91L --roster leavers.csv
//!
//! # Export the membership of a channel
//! channel-members export --channel C024BE91L --output membership.csv
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use slack_admin_core::{SlackClient, auth, roster};

/// Channel membership administration.
#[derive(Parser, Debug)]
#[command(name = "channel-members")]
#[command(about = "Adds, removes, and exports channel members")]
struct Args {
    /// Slack token with the conversations scopes.
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
    /// Invite users to a channel.
    Add {
        /// Channel ID.
        #[arg(long)]
        channel: String,

        /// Single user ID.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Remove users from a channel.
    Remove {
        /// Channel ID.
        #[arg(long)]
        channel: String,

        /// Single user ID.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Export the channel's members to CSV.
    Export {
        /// Channel ID.
        #[arg(long)]
        channel: String,

        /// Output CSV path.
        #[arg(short, long, default_value = "channel_membership.csv")]
        output: PathBuf,
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

/// Looks up a member's display name and email, caching per user id.
async fn user_details(
    client: &SlackClient,
    cache: &mut HashMap<String, (String, String)>,
    user_id: &str,
) -> (String, String) {
    if let Some(details) = cache.get(user_id) {
        return details.clone();
    }

    let params = [("user", user_id.to_string())];
    let details = match client.get("users.info", &params).await {
        Ok(payload) => {
            let name = payload
                .pointer("/user/name")
                .and_then(Value::as_str)
                .unwrap_or("N/A")
                .to_string();
            let email = payload
                .pointer("/user/profile/email")
                .and_then(Value::as_str)
                .unwrap_or("N/A")
                .to_string();
            (name, email)
        }
        Err(e) => {
            eprintln!("Failed to look up {user_id}: {e}");
            ("N/A".to_string(), "N/A".to_string())
        }
    };

    cache.insert(user_id.to_string(), details.clone());
    details
}

/// Pages through the member list and writes one row per member.
async fn export_members(
    client: &SlackClient,
    channel: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let params = [
        ("channel", channel.to_string()),
        ("limit", "200".to_string()),
    ];
    let members = client
        .paginate("conversations.members", &params, "members")
        .await
        .with_context(|| format!("Failed to list members of {channel}"))?;

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writer.write_record(["channel_id", "user_id", "name", "email"])?;

    let mut cache = HashMap::new();
    let mut total = 0usize;
    for member in &members {
        let Some(user_id) = member.as_str() else {
            continue;
        };
        let (name, email) = user_details(client, &mut cache, user_id).await;
        writer.write_record([channel, user_id, name.as_str(), email.as_str()])?;
        total += 1;
    }

    writer.flush()?;
    println!("Exported {total} member(s) of {channel} to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    match args.command {
        Command::Add {
            channel,
            user,
            roster,
        } => {
            let user_ids = collect_user_ids(user, roster.as_deref())?;
            for user_id in &user_ids {
                let fields = [("channel", channel.clone()), ("users", user_id.clone())];
                match client.post_form("conversations.invite", &fields).await {
                    Ok(_) => println!("Added {user_id} to {channel}."),
                    Err(e) => eprintln!("Failed to add {user_id} to {channel}: {e}"),
                }
            }
        }
        Command::Remove {
            channel,
            user,
            roster,
        } => {
            let user_ids = collect_user_ids(user, roster.as_deref())?;
            for user_id in &user_ids {
                let fields = [("channel", channel.clone()), ("user", user_id.clone())];
                match client.post_form("conversations.kick", &fields).await {
                    Ok(_) => println!("Removed {user_id} from {channel}."),
                    Err(e) => eprintln!("Failed to remove {user_id} from {channel}: {e}"),
                }
            }
        }
        Command::Export { channel, output } => {
            export_members(&client, &channel, &output).await?;
        }
    }

    Ok(())
}
