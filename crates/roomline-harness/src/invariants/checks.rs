//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Exactly the current room carries the active marker.
///
/// Before the first join nothing may be highlighted; afterwards exactly one
/// selector row is, and its label equals the current room.
pub struct ActiveRoomHighlighted;

impl Invariant for ActiveRoomHighlighted {
    fn name(&self) -> &'static str {
        "active_room_highlighted"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let expected: Vec<&str> = client.current_room.as_deref().into_iter().collect();
            let actual: Vec<&str> = client.highlighted.iter().map(String::as_str).collect();
            if actual != expected {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {}: current room {:?} but highlighted {:?}",
                        client.id, client.current_room, client.highlighted
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The visible transcript is the current room's log.
///
/// Holds after every handled event: switches replay the log, and appends to
/// the current room are rendered as they are logged.
pub struct TranscriptMatchesLog;

impl Invariant for TranscriptMatchesLog {
    fn name(&self) -> &'static str {
        "transcript_matches_log"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            let Some(room) = &client.current_room else {
                continue;
            };
            let log = client.logs.get(room).map_or(&[][..], Vec::as_slice);
            if client.transcript != log {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "client {} room {room}: transcript has {} entries, log has {}",
                        client.id,
                        client.transcript.len(),
                        log.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The current room, once set, is never the empty string.
pub struct CurrentRoomNonEmpty;

impl Invariant for CurrentRoomNonEmpty {
    fn name(&self) -> &'static str {
        "current_room_non_empty"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            if client.current_room.as_deref() == Some("") {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("client {}: current room is empty", client.id),
                });
            }
        }
        Ok(())
    }
}

/// Logs only ever grow at the end.
///
/// Every earlier log must be a prefix of the same room's current log.
pub struct LogsAppendOnly;

impl Invariant for LogsAppendOnly {
    fn name(&self) -> &'static str {
        "logs_append_only"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for client in &state.clients {
            for (room, before) in &client.previous_logs {
                let after = client.logs.get(room).map_or(&[][..], Vec::as_slice);
                if !after.starts_with(before) {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!(
                            "client {} room {room}: log of {} entries is not a prefix of {}",
                            client.id,
                            before.len(),
                            after.len()
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use roomline_core::{Classification, Message};

    use super::*;
    use crate::ClientSnapshot;

    fn msg(body: &str) -> Message {
        Message::new("amy", body, Classification::Other)
    }

    fn client() -> ClientSnapshot {
        ClientSnapshot {
            current_room: Some("General".into()),
            highlighted: vec!["General".into()],
            transcript: vec![msg("one")],
            logs: [("General".to_owned(), vec![msg("one")])].into(),
            ..ClientSnapshot::default()
        }
    }

    #[test]
    fn consistent_client_passes_all() {
        let state = SystemSnapshot::single(client());
        assert!(ActiveRoomHighlighted.check(&state).is_ok());
        assert!(TranscriptMatchesLog.check(&state).is_ok());
        assert!(CurrentRoomNonEmpty.check(&state).is_ok());
        assert!(LogsAppendOnly.check(&state).is_ok());
    }

    #[test]
    fn double_highlight_detected() {
        let mut bad = client();
        bad.highlighted.push("Tech".into());
        assert!(ActiveRoomHighlighted.check(&SystemSnapshot::single(bad)).is_err());
    }

    #[test]
    fn stale_transcript_detected() {
        let mut bad = client();
        bad.transcript.clear();
        assert!(TranscriptMatchesLog.check(&SystemSnapshot::single(bad)).is_err());
    }

    #[test]
    fn rewritten_history_detected() {
        let mut bad = client();
        bad.previous_logs = [("General".to_owned(), vec![msg("zero")])].into();
        let violation = LogsAppendOnly.check(&SystemSnapshot::single(bad)).unwrap_err();
        assert_eq!(violation.invariant, "logs_append_only");
    }
}
