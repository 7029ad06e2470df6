//! Session configuration.

use serde::Deserialize;

/// What the session does when the transport reconnects after a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconnectPolicy {
    /// Join the current room again, without a leave, so the broker
    /// re-subscribes us.
    #[default]
    Rejoin,
    /// Report the reconnect and wait for the user to pick a room.
    Manual,
}

/// Session configuration.
///
/// Every field has a default, so an empty TOML table is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Room joined when the transport first becomes ready.
    pub default_room: String,
    /// Selectable rooms, in display order.
    pub rooms: Vec<String>,
    /// Behaviour on transport reconnect.
    pub reconnect: ReconnectPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_room: "General".into(),
            rooms: ["General", "Random", "Tech", "Games"].map(String::from).to_vec(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Room list with the default room guaranteed to be present.
    pub fn directory(&self) -> Vec<String> {
        let mut rooms = self.rooms.clone();
        if !rooms.contains(&self.default_room) {
            rooms.insert(0, self.default_room.clone());
        }
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let config: SessionConfig = toml::from_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.reconnect, ReconnectPolicy::Rejoin);
    }

    #[test]
    fn partial_table_overrides() {
        let config: SessionConfig = toml::from_str(
            r#"
            default_room = "Lobby"
            reconnect = "manual"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_room, "Lobby");
        assert_eq!(config.reconnect, ReconnectPolicy::Manual);
        assert_eq!(config.rooms.len(), 4);
    }

    #[test]
    fn directory_includes_default_room() {
        let config = SessionConfig { default_room: "Lobby".into(), ..SessionConfig::default() };
        assert_eq!(config.directory().first().map(String::as_str), Some("Lobby"));
        assert_eq!(SessionConfig::default().directory().len(), 4);
    }
}
