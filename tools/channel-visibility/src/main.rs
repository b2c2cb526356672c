//! Channel Visibility - Public/Private Conversion
//!
//! Converts one channel or a roster of channels to public or private with
//! `admin.conversations.convertToPublic` / `convertToPrivate`.
//!
//! # Usage
//!
//! ```bash
//! # Make one channel private
//! channel-visibility --visibility private --channel C024BE91L
//!
//! # Make every channel in a headerless roster public
//! channel-visibility --visibility public --roster channels.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use slack_admin_core::{SlackClient, auth, roster};

/// Target visibility for the conversion.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Visibility {
    Public,
    Private,
}

impl Visibility {
    fn api_method(self) -> &'static str {
        match self {
            Visibility::Public => "admin.conversations.convertToPublic",
            Visibility::Private => "admin.conversations.convertToPrivate",
        }
    }
}

/// Channel public/private conversion.
#[derive(Parser, Debug)]
#[command(name = "channel-visibility")]
#[command(about = "Converts channels between public and private")]
struct Args {
    /// Slack token with admin scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Visibility to convert the channels to.
    #[arg(long, value_enum)]
    visibility: Visibility,

    /// Single channel ID to convert.
    #[arg(long, conflicts_with = "roster")]
    channel: Option<String>,

    /// Headerless CSV of channel IDs, one per row.
    #[arg(long)]
    roster: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let channel_ids = match (args.channel, args.roster.as_deref()) {
        (Some(id), _) => vec![id],
        (None, Some(path)) => roster::read_single_column(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?,
        (None, None) => anyhow::bail!("Pass --channel or --roster"),
    };

    let method = args.visibility.api_method();
    for channel_id in &channel_ids {
        let fields = [("channel_id", channel_id.clone())];
        match client.post_form(method, &fields).await {
            Ok(_) => println!("Channel {channel_id} converted successfully."),
            Err(e) => eprintln!("Failed to convert channel {channel_id}: {e}"),
        }
    }

    Ok(())
}
