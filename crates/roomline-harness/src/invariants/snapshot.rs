//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the system at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use std::collections::BTreeMap;

use roomline_core::{Message, SessionController, SessionView};

/// Snapshot of the entire system state.
///
/// Contains observable state from one or more clients for invariant checking.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Per-client state snapshots.
    pub clients: Vec<ClientSnapshot>,
}

impl SystemSnapshot {
    /// Create an empty snapshot (no clients).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a snapshot with a single client.
    pub fn single(client: ClientSnapshot) -> Self {
        Self { clients: vec![client] }
    }

    /// Create a snapshot from multiple clients.
    pub fn from_clients(clients: Vec<ClientSnapshot>) -> Self {
        Self { clients }
    }
}

/// Snapshot of a single client's observable state.
#[derive(Debug, Clone, Default)]
pub struct ClientSnapshot {
    /// Client identifier.
    pub id: u64,
    /// Session's current room. `None` before the first join.
    pub current_room: Option<String>,
    /// Rooms carrying the active marker in the view.
    pub highlighted: Vec<String>,
    /// Visible transcript.
    pub transcript: Vec<Message>,
    /// Every room log.
    pub logs: BTreeMap<String, Vec<Message>>,
    /// Logs at the previous snapshot, for append-only checks. Empty on the
    /// first capture.
    pub previous_logs: BTreeMap<String, Vec<Message>>,
}

impl ClientSnapshot {
    /// Capture a client from its session and folded view.
    pub fn capture(id: u64, session: &SessionController, view: &SessionView) -> Self {
        let logs = session
            .cache()
            .rooms()
            .map(|room| (room.to_owned(), session.cache().replay(room).to_vec()))
            .collect();

        Self {
            id,
            current_room: session.current_room().map(str::to_owned),
            highlighted: view.rooms().iter().filter(|r| r.active).map(|r| r.name.clone()).collect(),
            transcript: view.transcript().to_vec(),
            logs,
            previous_logs: BTreeMap::new(),
        }
    }

    /// Attach the logs of an earlier capture of the same client.
    #[must_use]
    pub fn after(mut self, previous: &Self) -> Self {
        self.previous_logs.clone_from(&previous.logs);
        self
    }
}
