//! Presence roster.

use crate::Identity;

/// Latest presence snapshot reported by the broker.
///
/// Each update replaces the member list wholesale; order is whatever the
/// broker sent.
#[derive(Debug, Clone, Default)]
pub struct PresenceRoster {
    members: Vec<String>,
}

/// A roster row as the rendering adapter shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Member identity.
    pub name: String,
    /// Entry is the local identity: annotated, not selectable.
    pub is_self: bool,
}

impl RosterEntry {
    /// Selecting the entry starts a private message.
    pub fn is_actionable(&self) -> bool {
        !self.is_self
    }
}

impl PresenceRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.
    pub fn update(&mut self, members: Vec<String>) {
        self.members = members;
    }

    /// Members in broker order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Rows for rendering, each tagged with whether it is `identity`.
    pub fn entries(&self, identity: &Identity) -> Vec<RosterEntry> {
        self.members
            .iter()
            .map(|name| RosterEntry { name: name.clone(), is_self: identity.is(name) })
            .collect()
    }
}
