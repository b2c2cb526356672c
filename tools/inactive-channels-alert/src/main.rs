//! Inactive Channels Alert - Idle Channel Report
//!
//! Pages through the channel list, reads the timestamp of the most recent
//! message in each channel, and uploads a CSV of the channels that have
//! been idle for the configured number of days. Channels with no messages
//! at all count as idle.
//!
//! # Usage
//!
//! ```bash
//! # Upload the 90-day idle report
//! inactive-channels-alert --team-id T0123456 --alert-channel C0ALERTS
//!
//! # Use a different window and keep the CSV locally instead of uploading
//! inactive-channels-alert --team-id T0123456 --alert-channel C0ALERTS \
//!     --days 30 --dry-run
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use slack_admin_core::report::{format_ts, parse_slack_ts};
use slack_admin_core::types::Channel;
use slack_admin_core::{SlackClient, auth};

const SECS_PER_DAY: i64 = 86_400;

/// Idle channel reporter.
#[derive(Parser, Debug)]
#[command(name = "inactive-channels-alert")]
#[command(about = "Uploads a CSV of channels with no recent activity")]
struct Args {
    /// Slack token with the conversations and files scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Workspace (team) ID.
    #[arg(short, long, env = "SLACK_TEAM_ID")]
    team_id: String,

    /// Channel ID the CSV is uploaded to.
    #[arg(long, env = "SLACK_ALERT_CHANNEL")]
    alert_channel: String,

    /// Days without a message before a channel counts as inactive.
    #[arg(long, default_value = "90")]
    days: i64,

    /// Output CSV path.
    #[arg(short, long, default_value = "inactive_slack_channels.csv")]
    output: PathBuf,

    /// Write the CSV locally without uploading it.
    #[arg(long)]
    dry_run: bool,
}

/// Reads the timestamp of the most recent message in a channel, if any.
async fn last_message_ts(client: &SlackClient, channel_id: &str) -> Option<i64> {
    let params = [
        ("channel", channel_id.to_string()),
        ("limit", "1".to_string()),
    ];
    match client.get("conversations.history", &params).await {
        Ok(payload) => payload
            .pointer("/messages/0/ts")
            .and_then(Value::as_str)
            .and_then(parse_slack_ts),
        Err(e) => {
            eprintln!("Failed to read history for {channel_id}: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token.clone(), args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let params = [
        ("team_id", args.team_id.clone()),
        ("exclude_archived", "true".to_string()),
        ("types", "public_channel,private_channel".to_string()),
        ("limit", "100".to_string()),
    ];
    let records = client
        .paginate("conversations.list", &params, "channels")
        .await
        .context("Failed to list channels")?;

    let cutoff = chrono::Utc::now().timestamp() - args.days * SECS_PER_DAY;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writer.write_record(["name", "id", "last_message"])?;

    let mut inactive = 0usize;
    for record in records {
        let channel: Channel = serde_json::from_value(record)
            .context("Unexpected channel record shape from conversations.list")?;

        let last_ts = last_message_ts(&client, &channel.id).await;
        let idle = match last_ts {
            Some(ts) => ts <= cutoff,
            None => true,
        };
        if !idle {
            continue;
        }

        let last_message = last_ts.map(format_ts).unwrap_or_else(|| "never".to_string());
        writer.write_record([channel.name.as_str(), channel.id.as_str(), last_message.as_str()])?;
        inactive += 1;
    }
    writer.flush()?;

    println!(
        "Found {inactive} channel(s) idle for {} day(s) or more; wrote {}",
        args.days,
        args.output.display()
    );

    if inactive == 0 || args.dry_run {
        return Ok(());
    }

    let bytes = std::fs::read(&args.output)
        .with_context(|| format!("Failed to read {}", args.output.display()))?;
    let filename = args
        .output
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("inactive_slack_channels.csv");
    client
        .upload_file(
            &args.alert_channel,
            filename,
            bytes,
            "Inactive channels report",
        )
        .await
        .context("Failed to upload the inactive channels CSV")?;
    println!("Uploaded {filename} to {}", args.alert_channel);
    Ok(())
}
