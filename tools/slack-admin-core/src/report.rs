//! Summary formatting and message posting for the alert tools.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::client::SlackClient;
use crate::error::Error;
use crate::types::{AdminUser, Channel};

/// Formats the guest expiration summary: one count header plus one line per
/// violating record. An empty slice yields a distinct all-clear line that
/// callers use to skip posting.
pub fn format_guest_report(violations: &[AdminUser]) -> String {
    if violations.is_empty() {
        return "No guests without an expiration date.".to_string();
    }

    let mut lines = vec![format!(
        "{} guest account(s) have no expiration date set:",
        violations.len()
    )];
    for user in violations {
        let email = user.email.as_deref().unwrap_or("(no email)");
        lines.push(format!(
            "- {} — {} ({} guest)",
            user.id,
            email,
            user.guest_kind()
        ));
    }
    lines.join("\n")
}

/// Formats a channel alert: one header plus one line per channel.
pub fn format_channel_report(header: &str, channels: &[Channel]) -> String {
    let mut lines = vec![format!("{header} ({} channel(s)):", channels.len())];
    for channel in channels {
        lines.push(format!("- #{} ({})", channel.name, channel.id));
    }
    lines.join("\n")
}

/// Renders epoch seconds as UTC `YYYY-MM-DD HH:MM:SS`.
pub fn format_ts(epoch_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_secs.to_string())
}

/// Parses a Slack message timestamp (`"1726000000.000200"`) into epoch
/// seconds.
pub fn parse_slack_ts(ts: &str) -> Option<i64> {
    let seconds = ts.split('.').next()?;
    seconds.parse::<i64>().ok()
}

/// Posts a plain-text message with `chat.postMessage`.
pub async fn post_message(client: &SlackClient, channel: &str, text: &str) -> Result<(), Error> {
    client
        .post_json(
            "chat.postMessage",
            &json!({"channel": channel, "text": text}),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn guests(n: usize) -> Vec<AdminUser> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": format!("W{i:03}"),
                    "email": format!("guest{i}@partner.io"),
                    "is_restricted": true
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn report_lists_every_record_once() {
        let violations = guests(5);
        let report = format_guest_report(&violations);

        assert!(report.starts_with("5 guest account(s)"));
        for user in &violations {
            assert_eq!(report.matches(user.id.as_str()).count(), 1);
        }
        assert_eq!(report.lines().count(), 6);
    }

    #[test]
    fn empty_report_is_the_all_clear_line() {
        assert_eq!(
            format_guest_report(&[]),
            "No guests without an expiration date."
        );
    }

    #[test]
    fn report_includes_guest_kind_and_placeholder_email() {
        let violations = vec![
            serde_json::from_value::<AdminUser>(json!({
                "id": "W001", "email": null, "is_ultra_restricted": true
            }))
            .unwrap(),
        ];
        let report = format_guest_report(&violations);

        assert!(report.contains("(no email)"));
        assert!(report.contains("single-channel guest"));
    }

    #[test]
    fn channel_report_names_each_channel() {
        let channels: Vec<Channel> = vec![
            serde_json::from_value(json!({"id": "C1", "name": "alpha"})).unwrap(),
            serde_json::from_value(json!({"id": "C2", "name": "beta"})).unwrap(),
        ];
        let report = format_channel_report("Empty channels", &channels);

        assert!(report.starts_with("Empty channels (2 channel(s)):"));
        assert!(report.contains("#alpha (C1)"));
        assert!(report.contains("#beta (C2)"));
    }

    #[test]
    fn format_ts_renders_utc() {
        assert_eq!(format_ts(0), "1970-01-01 00:00:00");
        assert_eq!(format_ts(1_726_000_000), "2024-09-10 20:26:40");
    }

    #[test]
    fn parse_slack_ts_drops_fraction() {
        assert_eq!(parse_slack_ts("1726000000.000200"), Some(1_726_000_000));
        assert_eq!(parse_slack_ts("not-a-ts"), None);
    }
}
