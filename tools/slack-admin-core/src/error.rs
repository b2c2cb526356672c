//! Error type shared by the library and the tool binaries.

use thiserror::Error;

/// Errors surfaced by the Slack clients and the input helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Web API answered with `ok: false`.
    #[error("slack api call {method} failed: {code}")]
    Api { method: String, code: String },

    /// Still rate limited after the bounded retries.
    #[error("slack api call {method} still rate limited after retries")]
    RateLimited { method: String },

    /// A SCIM endpoint answered with a non-success status.
    #[error("scim request failed with status {status}: {body}")]
    Scim { status: u16, body: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Neither an inline token nor a token file was provided.
    #[error("no token provided; pass --token or --token-file")]
    MissingToken,

    /// A header-addressed roster column is absent.
    #[error("csv file is missing the `{header}` column")]
    MissingColumn { header: String },
}
