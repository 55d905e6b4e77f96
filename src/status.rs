//! Connection status shown by the embedded wallet dialog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three states the dialog can report.
///
/// Exactly one status panel is displayed at a time, and it is always the one
/// returned by [`ConnectionStatus::panel_id`] for the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    #[default]
    NotConnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    /// All statuses, in the order their panels appear in the markup.
    pub const ALL: [ConnectionStatus; 3] = [
        ConnectionStatus::NotConnected,
        ConnectionStatus::Connecting,
        ConnectionStatus::Connected,
    ];

    /// Wire name, as used in panel ids and settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConnected => "not-connected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        }
    }

    /// Element id of the status panel for this value.
    pub fn panel_id(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConnected => "status-not-connected",
            ConnectionStatus::Connecting => "status-connecting",
            ConnectionStatus::Connected => "status-connected",
        }
    }

    /// Human readable label shown inside the panel.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConnected => "Not connected",
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status name from untyped input is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connection status `{0}` (expected not-connected, connecting or connected)")]
pub struct ParseStatusError(pub String);

impl FromStr for ConnectionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_connected() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::NotConnected);
    }

    #[test]
    fn test_panel_ids_follow_wire_names() {
        for status in ConnectionStatus::ALL {
            assert_eq!(status.panel_id(), format!("status-{}", status));
        }
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!("connecting".parse(), Ok(ConnectionStatus::Connecting));
        assert_eq!("connected".parse(), Ok(ConnectionStatus::Connected));
        assert_eq!("not-connected".parse(), Ok(ConnectionStatus::NotConnected));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "Connected".parse::<ConnectionStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("Connected".into()));
        assert!("".parse::<ConnectionStatus>().is_err());
        assert!(" connected ".parse::<ConnectionStatus>().is_err());
        assert!(err.to_string().contains("Connected"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ConnectionStatus::NotConnected).unwrap();
        assert_eq!(json, "\"not-connected\"");
        let back: ConnectionStatus = serde_json::from_str("\"connecting\"").unwrap();
        assert_eq!(back, ConnectionStatus::Connecting);
    }
}
