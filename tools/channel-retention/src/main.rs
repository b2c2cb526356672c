//! Channel Retention - Custom Retention Administration
//!
//! Sets a custom retention duration on channels, or resets them to the
//! workspace default.
//!
//! # Usage
//!
//! ```bash
//! # Set 30 day retention on one channel
//! channel-retention set --channel C024BE91L --days 30
//!
//! # Apply per-channel durations from a CSV with channel_id,retention_days headers
//! channel-retention set --roster retention.csv
//!
//! # Reset one channel to the workspace default
//! channel-retention reset --channel C024BE91L
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slack_admin_core::{SlackClient, auth, roster};

/// Channel retention administration.
#[derive(Parser, Debug)]
#[command(name = "channel-retention")]
#[command(about = "Sets or resets custom channel retention")]
struct Args {
    /// Slack token with admin scopes.
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
    /// Set a custom retention duration.
    Set {
        /// Single channel ID.
        #[arg(long, requires = "days", conflicts_with = "roster")]
        channel: Option<String>,

        /// Retention duration in days for --channel.
        #[arg(long)]
        days: Option<u32>,

        /// CSV with `channel_id` and `retention_days` header columns.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Reset channels to the workspace default retention.
    Reset {
        /// Single channel ID.
        #[arg(long, conflicts_with = "roster")]
        channel: Option<String>,

        /// Headerless CSV of channel IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

/// One row of the set-retention roster.
#[derive(Debug, Deserialize)]
struct RetentionRow {
    channel_id: String,
    retention_days: u32,
}

/// Reads the set-retention roster rows.
fn read_retention_roster(path: &Path) -> anyhow::Result<Vec<RetentionRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.context("Bad roster row; expected channel_id,retention_days")?);
    }
    Ok(rows)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    match args.command {
        Command::Set {
            channel,
            days,
            roster,
        } => {
            let rows = match (channel, days, roster.as_deref()) {
                (Some(channel_id), Some(retention_days), _) => vec![RetentionRow {
                    channel_id,
                    retention_days,
                }],
                (None, _, Some(path)) => read_retention_roster(path)?,
                _ => anyhow::bail!("Pass --channel with --days, or --roster"),
            };

            for row in &rows {
                let fields = [
                    ("channel_id", row.channel_id.clone()),
                    ("duration_days", row.retention_days.to_string()),
                ];
                match client
                    .post_form("admin.conversations.setCustomRetention", &fields)
                    .await
                {
                    Ok(_) => println!(
                        "Channel {} retention set to {} day(s).",
                        row.channel_id, row.retention_days
                    ),
                    Err(e) => eprintln!(
                        "Failed to set retention for channel {}: {e}",
                        row.channel_id
                    ),
                }
            }
        }
        Command::Reset { channel, roster } => {
            let channel_ids = match (channel, roster.as_deref()) {
                (Some(id), _) => vec![id],
                (None, Some(path)) => roster::read_single_column(path)
                    .with_context(|| format!("Failed to read roster {}", path.display()))?,
                (None, None) => anyhow::bail!("Pass --channel or --roster"),
            };

            for channel_id in &channel_ids {
                let fields = [("channel_id", channel_id.clone())];
                match client
                    .post_form("admin.conversations.removeCustomRetention", &fields)
                    .await
                {
                    Ok(_) => println!("Channel {channel_id} retention reset to the default."),
                    Err(e) => eprintln!("Failed to reset retention for channel {channel_id}: {e}"),
                }
            }
        }
    }

    Ok(())
}
