//! Profile Update - User Profile and Status
//!
//! Sets a user's display name and status through `users.profile.set`, for
//! one user from flags or for many from a roster CSV.
//!
//! # Usage
//!
//! ```bash
//! # Update one user
//! profile-update --user W012ABC --display-name "Chad R" \
//!     --status-text "On call" --status-emoji ":pager:"
//!
//! # Apply a roster with user_id,display_name,status_text,status_emoji headers
//! profile-update --roster profiles.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use slack_admin_core::{SlackClient, auth};

/// User profile and status updates.
#[derive(Parser, Debug)]
#[command(name = "profile-update")]
#[command(about = "Sets user profile fields and status")]
struct Args {
    /// Slack token with the users.profile scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Single user ID to update.
    #[arg(long, conflicts_with = "roster")]
    user: Option<String>,

    /// New display name for --user.
    #[arg(long, default_value = "")]
    display_name: String,

    /// New status text for --user.
    #[arg(long, default_value = "")]
    status_text: String,

    /// New status emoji for --user.
    #[arg(long, default_value = "")]
    status_emoji: String,

    /// Status expiration as epoch seconds (0 = indefinite).
    #[arg(long, default_value = "0")]
    status_expiration: i64,

    /// CSV with user_id,display_name,status_text,status_emoji headers.
    #[arg(long)]
    roster: Option<PathBuf>,
}

/// One profile update.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    user_id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    status_text: String,
    #[serde(default)]
    status_emoji: String,
    #[serde(default)]
    status_expiration: i64,
}

/// Reads the profile roster rows.
fn read_profile_roster(path: &Path) -> anyhow::Result<Vec<ProfileRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.context("Bad roster row; expected user_id,display_name,status_text,status_emoji")?);
    }
    Ok(rows)
}

/// Applies one profile update.
async fn set_profile(client: &SlackClient, row: &ProfileRow) -> anyhow::Result<()> {
    let body = json!({
        "user": row.user_id,
        "profile": {
            "display_name": row.display_name,
            "status_text": row.status_text,
            "status_emoji": row.status_emoji,
            "status_expiration": row.status_expiration,
        }
    });
    client.post_json("users.profile.set", &body).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token.clone(), args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let rows = match (&args.user, args.roster.as_deref()) {
        (Some(user_id), _) => vec![ProfileRow {
            user_id: user_id.clone(),
            display_name: args.display_name.clone(),
            status_text: args.status_text.clone(),
            status_emoji: args.status_emoji.clone(),
            status_expiration: args.status_expiration,
        }],
        (None, Some(path)) => read_profile_roster(path)?,
        (None, None) => anyhow::bail!("Pass --user or --roster"),
    };

    for row in &rows {
        match set_profile(&client, row).await {
            Ok(()) => println!("Profile updated for {}.", row.user_id),
            Err(e) => eprintln!("Failed to update profile for {}: {e:#}", row.user_id),
        }
    }

    Ok(())
}
