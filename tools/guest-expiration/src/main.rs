//! Guest Expiration - Guest Account Expiration Management
//!
//! Reports guest accounts that have no expiration date set, and sets
//! expiration dates for one or more guest accounts.
//!
//! # Usage
//!
//! ```bash
//! # Post a summary of guests with no expiration to an alert channel
//! guest-expiration --team-id T0123456 report --alert-channel C0ALERTS
//!
//! # Leave contractor accounts out of the report
//! guest-expiration --team-id T0123456 report --alert-channel C0ALERTS \
//!     --exclude-domain contractors.example.com
//!
//! # Preview the summary without posting it
//! guest-expiration --team-id T0123456 report --alert-channel C0ALERTS --dry-run
//!
//! # Set an expiration for a single guest
//! guest-expiration --team-id T0123456 set --user W012ABC --expiration-ts 1767225600
//!
//! # Set the same expiration for every id in a roster
//! guest-expiration --team-id T0123456 set --roster guests.csv --expiration-ts 1767225600
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use slack_admin_core::guest::GuestExpirationPolicy;
use slack_admin_core::report::{format_guest_report, post_message};
use slack_admin_core::types::AdminUser;
use slack_admin_core::{SlackClient, auth, roster};

/// Guest account expiration management.
#[derive(Parser, Debug)]
#[command(name = "guest-expiration")]
#[command(about = "Reports and sets guest account expiration dates")]
struct Args {
    /// Slack token with admin scopes.
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
    /// Post one summary of the guest accounts that have no expiration date.
    Report {
        /// Channel ID the summary is posted to.
        #[arg(long, env = "SLACK_ALERT_CHANNEL")]
        alert_channel: String,

        /// Email domain to leave out of the report (repeatable).
        #[arg(long = "exclude-domain")]
        exclude_domains: Vec<String>,

        /// Print the summary instead of posting it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Set an expiration timestamp for one or more guest accounts.
    Set {
        /// Single user ID to update.
        #[arg(long, conflicts_with = "roster")]
        user: Option<String>,

        /// Headerless CSV of user IDs, one per row.
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Expiration as an epoch timestamp in seconds.
        #[arg(long)]
        expiration_ts: i64,
    },
}

/// Pages through `admin.users.list` and posts one summary listing every
/// guest that has no expiration date set.
async fn report(
    client: &SlackClient,
    team_id: &str,
    alert_channel: &str,
    exclude_domains: Vec<String>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let policy = GuestExpirationPolicy::new(exclude_domains);
    let params = [
        ("team_id", team_id.to_string()),
        ("limit", "100".to_string()),
    ];
    let records = client
        .paginate("admin.users.list", &params, "users")
        .await
        .context("Failed to list workspace users")?;

    let mut violations: Vec<AdminUser> = Vec::new();
    for record in records {
        let user: AdminUser = serde_json::from_value(record)
            .context("Unexpected user record shape from admin.users.list")?;
        if policy.violates(&user) {
            violations.push(user);
        }
    }

    if violations.is_empty() {
        println!("All guests have an expiration date; nothing to post.");
        return Ok(());
    }

    let summary = format_guest_report(&violations);
    if dry_run {
        println!("{summary}");
        return Ok(());
    }

    post_message(client, alert_channel, &summary)
        .await
        .context("Failed to post the guest expiration summary")?;
    println!(
        "Posted a summary of {} guest account(s) to {alert_channel}",
        violations.len()
    );
    Ok(())
}

/// Sets the expiration timestamp on each user, reporting failures per user.
async fn set_expirations(
    client: &SlackClient,
    team_id: &str,
    user_ids: &[String],
    expiration_ts: i64,
) -> anyhow::Result<()> {
    for user_id in user_ids {
        let fields = [
            ("team_id", team_id.to_string()),
            ("user_id", user_id.clone()),
            ("expiration_ts", expiration_ts.to_string()),
        ];
        match client.post_form("admin.users.setExpiration", &fields).await {
            Ok(_) => println!("User {user_id} expiration set successfully."),
            Err(e) => eprintln!("Failed to set expiration for {user_id}: {e}"),
        }
    }
    Ok(())
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token.clone(), args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    match args.command {
        Command::Report {
            alert_channel,
            exclude_domains,
            dry_run,
        } => {
            report(
                &client,
                &args.team_id,
                &alert_channel,
                exclude_domains,
                dry_run,
            )
            .await
        }
        Command::Set {
            user,
            roster,
            expiration_ts,
        } => {
            let user_ids = collect_user_ids(user, roster.as_deref())?;
            set_expirations(&client, &args.team_id, &user_ids, expiration_ts).await
        }
    }
}
