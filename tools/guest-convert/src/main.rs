//! Guest Convert - Multi-Channel Guest Conversion
//!
//! Converts accounts to active multi-channel guests through the SCIM API
//! while keeping their group memberships: the current groups are read
//! first, sent along with the conversion PATCH, then re-asserted with a
//! second PATCH (the conversion can drop them).
//!
//! # Usage
//!
//! ```bash
//! # Convert one account
//! guest-convert --user W012ABC
//!
//! # Convert every id in a roster with a user_id header
//! guest-convert --roster conversions.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::{Value, json};
use slack_admin_core::{ScimClient, auth, roster, scim};

/// Multi-channel guest conversion over SCIM.
#[derive(Parser, Debug)]
#[command(name = "guest-convert")]
#[command(about = "Converts accounts to active multi-channel guests")]
struct Args {
    /// SCIM access token.
    #[arg(long, env = "SLACK_SCIM_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the SCIM access token.
    #[arg(long, env = "SLACK_SCIM_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Single user ID to convert.
    #[arg(long, conflicts_with = "roster")]
    user: Option<String>,

    /// CSV with a `user_id` header column.
    #[arg(long)]
    roster: Option<PathBuf>,
}

/// Converts one account, preserving its group memberships.
async fn convert_user(client: &ScimClient, user_id: &str) -> anyhow::Result<()> {
    let record = client
        .get_user(user_id)
        .await
        .context("Failed to fetch the SCIM user record")?;
    let groups: Value = record.get("groups").cloned().unwrap_or_else(|| json!([]));

    client
        .patch_user(user_id, &scim::multi_channel_guest_payload(&groups))
        .await
        .context("Conversion PATCH failed")?;

    client
        .patch_user(user_id, &scim::group_reassign_payload(user_id, &groups))
        .await
        .context("Group re-assignment PATCH failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = ScimClient::new(token)?;

    let user_ids = match (args.user, args.roster.as_deref()) {
        (Some(id), _) => vec![id],
        (None, Some(path)) => roster::read_column(path, "user_id")
            .with_context(|| format!("Failed to read roster {}", path.display()))?,
        (None, None) => anyhow::bail!("Pass --user or --roster"),
    };

    for user_id in &user_ids {
        match convert_user(&client, user_id).await {
            Ok(()) => println!("User {user_id} is now an active multi-channel guest."),
            Err(e) => eprintln!("Failed to convert {user_id}: {e:#}"),
        }
    }

    Ok(())
}
