//! Workflows Search - Workflow Metadata Export
//!
//! Pages through `admin.workflows.search` and writes every workflow record
//! to CSV. The column set comes from the first record's keys, so the export
//! keeps whatever fields Slack returns.
//!
//! # Usage
//!
//! ```bash
//! workflows-search --output slack_workflows.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use slack_admin_core::{SlackClient, auth};

/// Workflow metadata export.
#[derive(Parser, Debug)]
#[command(name = "workflows-search")]
#[command(about = "Exports workflow metadata to CSV")]
struct Args {
    /// Slack token with the admin.workflows scopes.
    #[arg(long, env = "SLACK_TOKEN")]
    token: Option<String>,

    /// Path to a file containing the Slack token.
    #[arg(long, env = "SLACK_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Output CSV path.
    #[arg(short, long, default_value = "slack_workflows.csv")]
    output: PathBuf,
}

/// Renders a JSON value as one CSV cell.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slack_admin_core::init_tracing();
    let args = Args::parse();

    let token = auth::resolve_token(args.token, args.token_file.as_deref())?;
    let client = SlackClient::new(token)?;

    let params = [("limit", "50".to_string())];
    let workflows = client
        .paginate("admin.workflows.search", &params, "workflows")
        .await
        .context("Failed to search workflows")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let headers: Vec<String> = workflows
        .first()
        .and_then(Value::as_object)
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default();

    if !headers.is_empty() {
        writer.write_record(&headers)?;
        for workflow in &workflows {
            let row: Vec<String> = headers
                .iter()
                .map(|key| workflow.get(key).map(cell).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }
    }

    writer.flush()?;
    println!(
        "Successfully exported {} workflow(s) to {}",
        workflows.len(),
        args.output.display()
    );
    Ok(())
}
