//! GW Admin - Google Workspace Administration
//!
//! Drives the `gam` command-line wrapper for the Google Workspace APIs:
//! exports the user directory, and transfers Drive file ownership between
//! accounts.
//!
//! # Usage
//!
//! ```bash
//! # Export the user directory to CSV
//! gw-admin users --output google_users.csv
//!
//! # Transfer Drive ownership from a leaver to their manager
//! gw-admin transfer-drive --from leaver@example.com --to manager@example.com
//!
//! # Use a specific gam binary
//! gw-admin --gam-path /opt/gam/gam users
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::process::Command as Process;

/// Google Workspace administration via gam.
#[derive(Parser, Debug)]
#[command(name = "gw-admin")]
#[command(about = "Google Workspace operations through the gam CLI")]
struct Args {
    /// Path to the gam binary.
    #[arg(long, env = "GAM_PATH", default_value = "gam")]
    gam_path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the user directory as CSV.
    Users {
        /// Output CSV path.
        #[arg(short, long, default_value = "google_users.csv")]
        output: PathBuf,
    },
    /// Transfer Drive file ownership between two accounts.
    TransferDrive {
        /// Account giving up ownership.
        #[arg(long)]
        from: String,

        /// Account receiving ownership.
        #[arg(long)]
        to: String,
    },
}

/// Runs gam and returns its stdout; a non-zero exit carries stderr.
async fn run_gam(gam_path: &str, gam_args: &[&str]) -> anyhow::Result<String> {
    let output = Process::new(gam_path)
        .args(gam_args)
        .output()
        .await
        .with_context(|| format!("Failed to launch {gam_path}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "gam {} exited with {}: {}",
            gam_args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Users { output } => {
            let stdout = run_gam(&args.gam_path, &["print", "users"]).await?;
            std::fs::write(&output, &stdout)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            let rows = stdout.lines().count().saturating_sub(1);
            println!("Exported {rows} user(s) to {}", output.display());
        }
        Command::TransferDrive { from, to } => {
            let stdout = run_gam(
                &args.gam_path,
                &["user", &from, "transfer", "drive", &to],
            )
            .await?;
            if !stdout.trim().is_empty() {
                println!("{}", stdout.trim());
            }
            println!("Drive ownership transferred from {from} to {to}.");
        }
    }

    Ok(())
}
