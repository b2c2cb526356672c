//! Empty Channels Alert - No-Member Channel Notifier
//!
//! Pages through the channel list and posts one summary of the channels
//! that have no members. Meant to run on a schedule.
//!
//! # Usage
//!
//! ```bash
//! # Post the summary
//! empty-channels-alert --team-id T0123456 --alert-channel C0ALERTS
//!
//! # Preview without posting
//! empty-channels-alert --team-id T0123456 --alert-channel C0ALERTS --dry-run
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slack_admin_core::report::{format_channel_report, post_message};
use slack_admin_core::types::Channel;
use slack_admin_core::{SlackClient, auth};

/// Empty channel notifier.
#[derive(Parser, Debug)]
#[command(name = "empty-channels-alert")]
#[command(about = "Posts an alert listing channels with no members")]
struct Args {
    /// Slack token with the conversations scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Workspace (team) ID.
    #[arg(short, long, env = "SLACK_TEAM_ID")]
    team_id: String,

    /// Channel ID the alert is posted to.
    #[arg(long, env = "SLACK_ALERT_CHANNEL")]
    alert_channel: String,

    /// Print the alert instead of posting it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
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

    let mut empty: Vec<Channel> = Vec::new();
    for record in records {
        let channel: Channel = serde_json::from_value(record)
            .context("Unexpected channel record shape from conversations.list")?;
        if channel.num_members == Some(0) {
            empty.push(channel);
        }
    }

    if empty.is_empty() {
        println!("No empty channels found; nothing to post.");
        return Ok(());
    }

    let summary = format_channel_report("Empty channels", &empty);
    if args.dry_run {
        println!("{summary}");
        return Ok(());
    }

    post_message(&client, &args.alert_channel, &summary)
        .await
        .context("Failed to post the empty channel alert")?;
    println!(
        "Posted an alert listing {} empty channel(s) to {}",
        empty.len(),
        args.alert_channel
    );
    Ok(())
}
