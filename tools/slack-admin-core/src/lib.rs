//! Shared plumbing for the workspace administration tools.
//!
//! Every tool in this workspace is an independent binary; this crate holds
//! the pieces they all need: the Slack Web API client with cursor pagination
//! and rate-limit backoff, the SCIM client, token resolution, CSV roster
//! input, and the record types and filters the tools operate on.

pub mod auth;
pub mod client;
pub mod error;
pub mod guest;
pub mod report;
pub mod roster;
pub mod scim;
pub mod types;

pub use client::SlackClient;
pub use error::Error;
pub use scim::ScimClient;

/// Initializes the tracing subscriber for a tool binary.
///
/// The filter defaults to `info`; override it with `RUST_LOG`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
