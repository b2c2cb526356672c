//! Emoji Admin - Custom Emoji Export and Removal
//!
//! Exports the workspace's custom emoji to CSV, resolving each uploader's
//! email through `users.info` (cached per uploader), or removes named
//! emoji.
//!
//! # Usage
//!
//! ```bash
//! # Export all custom emoji
//! emoji-admin export --output emojis.csv
//!
//! # Remove two emoji by name
//! emoji-admin remove --name party-parrot --name old-logo
//!
//! # Remove every emoji named in a headerless roster
//! emoji-admin remove --roster retired_emoji.csv
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use slack_admin_core::client::next_cursor;
use slack_admin_core::report::format_ts;
use slack_admin_core::{SlackClient, auth, roster};

/// Custom emoji administration.
#[derive(Parser, Debug)]
#[command(name = "emoji-admin")]
#[command(about = "Exports and removes custom emoji")]
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
    /// Export all custom emoji to CSV.
    Export {
        /// Output CSV path.
        #[arg(short, long, default_value = "emojis.csv")]
        output: PathBuf,
    },
    /// Remove custom emoji by name.
    Remove {
        /// Emoji name to remove (repeatable).
        #[arg(long = "name", conflicts_with = "roster")]
        names: Vec<String>,

        /// Headerless CSV of emoji names, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

/// Looks up an uploader's email, caching per user id.
async fn uploader_email(
    client: &SlackClient,
    cache: &mut HashMap<String, String>,
    user_id: &str,
) -> String {
    if let Some(email) = cache.get(user_id) {
        return email.clone();
    }

    let params = [("user", user_id.to_string())];
    let email = match client.get("users.info", &params).await {
        Ok(payload) => payload
            .pointer("/user/profile/email")
            .and_then(Value::as_str)
            .unwrap_or("No email found")
            .to_string(),
        Err(e) => {
            eprintln!("Failed to look up uploader {user_id}: {e}");
            "No email found".to_string()
        }
    };

    cache.insert(user_id.to_string(), email.clone());
    email
}

/// Pages through `admin.emoji.list` (a map keyed by emoji name) and writes
/// one row per emoji.
async fn export_emoji(client: &SlackClient, output: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writer.write_record(["name", "url", "date_created", "uploaded_by", "email"])?;

    let mut cache = HashMap::new();
    let mut cursor: Option<String> = None;
    let mut total = 0usize;

    loop {
        let mut params = vec![("limit", "1000".to_string())];
        if let Some(ref c) = cursor {
            params.push(("cursor", c.clone()));
        }
        let payload = client
            .get("admin.emoji.list", &params)
            .await
            .context("Failed to list custom emoji")?;

        if let Some(emoji) = payload.get("emoji").and_then(Value::as_object) {
            for (name, data) in emoji {
                let url = data.get("url").and_then(Value::as_str).unwrap_or("");
                let date_created = data
                    .get("date_created")
                    .and_then(Value::as_i64)
                    .map(format_ts)
                    .unwrap_or_default();
                let uploaded_by = data
                    .get("uploaded_by")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                let email = if uploaded_by.is_empty() {
                    "No email found".to_string()
                } else {
                    uploader_email(client, &mut cache, &uploaded_by).await
                };

                writer.write_record([name.as_str(), url, &date_created, &uploaded_by, &email])?;
                total += 1;
            }
        }

        cursor = next_cursor(&payload);
        if cursor.is_none() {
            break;
        }
    }

    writer.flush()?;
    println!("Exported {total} emoji to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    match args.command {
        Command::Export { output } => export_emoji(&client, &output).await?,
        Command::Remove { names, roster } => {
            let names = if let Some(path) = roster.as_deref() {
                roster::read_single_column(path)
                    .with_context(|| format!("Failed to read roster {}", path.display()))?
            } else if names.is_empty() {
                anyhow::bail!("Pass --name or --roster");
            } else {
                names
            };

            for name in &names {
                let fields = [("name", name.clone())];
                match client.post_form("admin.emoji.remove", &fields).await {
                    Ok(_) => println!("Emoji '{name}' deleted successfully."),
                    Err(e) => eprintln!("Failed to delete emoji '{name}': {e}"),
                }
            }
        }
    }

    Ok(())
}
