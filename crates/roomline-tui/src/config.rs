//! Config file loading and guest identities.

use std::{io, path::Path};

use chrono::{Local, NaiveTime};
use roomline_core::{Identity, SessionConfig};
use thiserror::Error;

/// Config file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config: {0}")]
    Read(#[from] io::Error),

    /// File is not a valid session config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load a [`SessionConfig`] from `path`, or the defaults when `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<SessionConfig, ConfigError> {
    match path {
        Some(path) => parse(&std::fs::read_to_string(path)?),
        None => Ok(SessionConfig::default()),
    }
}

/// Parse a TOML session config.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] on invalid TOML or unknown values.
pub fn parse(text: &str) -> Result<SessionConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Generate a guest identity: `Guest`, the local `HHMM`, then a random
/// number in `1000..=9999`.
pub fn guest_identity() -> Identity {
    guest_identity_at(Local::now().time(), rand::random_range(1000..=9999))
}

fn guest_identity_at(time: NaiveTime, suffix: u16) -> Identity {
    Identity::new(format!("Guest{}{suffix}", time.format("%H%M")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomline_core::ReconnectPolicy;

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load(None).unwrap(), SessionConfig::default());
    }

    #[test]
    fn parse_reads_rooms_and_policy() {
        let config = parse(
            r#"
            default_room = "Lobby"
            rooms = ["Lobby", "Ops"]
            reconnect = "manual"
            "#,
        )
        .unwrap();
        assert_eq!(config.rooms, ["Lobby", "Ops"]);
        assert_eq!(config.reconnect, ReconnectPolicy::Manual);
    }

    #[test]
    fn parse_rejects_unknown_policy() {
        assert!(matches!(parse(r#"reconnect = "sometimes""#), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unreadable_path_is_read_error() {
        let result = load(Some(Path::new("/nonexistent/roomline.toml")));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn guest_identity_format() {
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(guest_identity_at(time, 4321).as_str(), "Guest09054321");

        let name = guest_identity();
        let digits = name.as_str().strip_prefix("Guest").unwrap();
        assert_eq!(digits.len(), 8);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
