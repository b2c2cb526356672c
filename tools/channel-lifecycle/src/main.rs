//! Channel Lifecycle - Archive, Unarchive, and Delete
//!
//! Applies one `admin.conversations.*` lifecycle action to one channel or
//! to every channel in a roster.
//!
//! # Usage
//!
//! ```bash
//! # Archive one channel
//! channel-lifecycle archive --channel C024BE91L
//!
//! # Delete every channel in a headerless roster
//! channel-lifecycle delete --roster stale_channels.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use slack_admin_core::{SlackClient, auth, roster};

/// Channel archive/unarchive/delete administration.
#[derive(Parser, Debug)]
#[command(name = "channel-lifecycle")]
#[command(about = "Archives, unarchives, or deletes channels")]
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
    /// Archive channels.
    Archive {
        /// Single channel ID.
        #[arg(long, conflicts_with = "roster")]
        channel: Option<String>,

        /// Headerless CSV of channel IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Unarchive channels.
    Unarchive {
        /// Single channel ID.
        #[arg(long, conflicts_with = "roster")]
        channel: Option<String>,

        /// Headerless CSV of channel IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Permanently delete channels.
    Delete {
        /// Single channel ID.
        #[arg(long, conflicts_with = "roster")]
        channel: Option<String>,

        /// Headerless CSV of channel IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

impl Command {
    fn api_method(&self) -> &'static str {
        match self {
            Command::Archive { .. } => "admin.conversations.archive",
            Command::Unarchive { .. } => "admin.conversations.unarchive",
            Command::Delete { .. } => "admin.conversations.delete",
        }
    }

    fn targets(&self) -> (Option<&String>, Option<&PathBuf>) {
        match self {
            Command::Archive { channel, roster }
            | Command::Unarchive { channel, roster }
            | Command::Delete { channel, roster } => (channel.as_ref(), roster.as_ref()),
        }
    }
}

/// Resolves the target channel ids from a single flag or a roster file.
fn collect_channel_ids(
    channel: Option<&String>,
    roster_path: Option<&Path>,
) -> anyhow::Result<Vec<String>> {
    match (channel, roster_path) {
        (Some(id), _) => Ok(vec![id.clone()]),
        (None, Some(path)) => roster::read_single_column(path)
            .with_context(|| format!("Failed to read roster {}", path.display())),
        (None, None) => anyhow::bail!("Pass --channel or --roster"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let method = args.command.api_method();
    let (channel, roster_path) = args.command.targets();
    let channel_ids = collect_channel_ids(channel, roster_path.map(PathBuf::as_path))?;

    for channel_id in &channel_ids {
        let fields = [("channel_id", channel_id.clone())];
        match client.post_form(method, &fields).await {
            Ok(_) => println!("Channel {channel_id}: {method} succeeded."),
            Err(e) => eprintln!("Channel {channel_id}: {method} failed: {e}"),
        }
    }

    Ok(())
}
