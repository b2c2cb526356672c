//! Token resolution for the tool binaries.

use std::path::Path;

use crate::error::Error;

/// Resolves the API token from an inline value or a token file.
///
/// The inline value (usually a clap flag backed by an environment variable)
/// wins when both are present. File contents are trimmed, matching the
/// one-token-per-file convention the rosters use.
pub fn resolve_token(inline: Option<String>, file: Option<&Path>) -> Result<String, Error> {
    let raw = match (inline, file) {
        (Some(token), _) => token,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(Error::MissingToken),
    };

    let token = raw.trim().to_string();
    if token.is_empty() {
        return Err(Error::MissingToken);
    }
    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn inline_token_wins() {
        let token = resolve_token(Some("xoxb-inline".into()), None).unwrap();
        assert_eq!(token, "xoxb-inline");
    }

    #[test]
    fn file_token_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  xoxb-from-file  ").unwrap();

        let token = resolve_token(None, Some(file.path())).unwrap();
        assert_eq!(token, "xoxb-from-file");
    }

    #[test]
    fn missing_both_is_an_error() {
        assert!(matches!(resolve_token(None, None), Err(Error::MissingToken)));
    }

    #[test]
    fn blank_inline_token_is_an_error() {
        assert!(matches!(
            resolve_token(Some("   ".into()), None),
            Err(Error::MissingToken)
        ));
    }
}
