//! In-process simulated broker.
//!
//! Runs a [`SimBroker`] on a tokio task so the client can be used without a
//! network. Two idle peers are always online; they answer private messages
//! so the private path can be exercised by hand.

use std::collections::VecDeque;

use chrono::Local;
use roomline_harness::{Delivery, SessionId, SimBroker};
use roomline_proto::{Inbound, Outbound, payloads::SendMessage};
use tokio::sync::mpsc;

use crate::transport::Connection;

const CHANNEL_CAPACITY: usize = 64;

/// Session id of the local client on the simulated broker.
const LOCAL: SessionId = 1;

/// Always-online peers: session id, username, room they sit in.
const PEERS: [(SessionId, &str, &str); 2] = [(2, "ada", "General"), (3, "grace", "Tech")];

/// Spawn a simulated broker serving `rooms` and connect `username` to it.
///
/// Must be called inside a tokio runtime.
pub fn spawn_server(username: &str, rooms: Vec<String>) -> Connection {
    let (to_server_tx, to_server_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (from_server_tx, from_server_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handle =
        tokio::spawn(run_server(username.to_owned(), rooms, to_server_rx, from_server_tx));

    Connection::new(to_server_tx, from_server_rx, handle.abort_handle())
}

async fn run_server(
    username: String,
    rooms: Vec<String>,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<String>,
) {
    let mut broker = SimBroker::new(rooms);
    for (session, name, room) in PEERS {
        broker.connect(session, name);
        broker.handle(session, Outbound::join(room), &timestamp());
    }

    let mut pending: VecDeque<Delivery> = broker.connect(LOCAL, username).into();
    tracing::debug!(peers = PEERS.len(), "simulated broker started");

    loop {
        while let Some(delivery) = pending.pop_front() {
            if delivery.session == LOCAL {
                if !deliver(&from_server, &delivery.event).await {
                    return;
                }
            } else if let Some(reply) = peer_reply(&delivery) {
                pending.extend(broker.handle(delivery.session, reply, &timestamp()));
            }
        }

        let Some(frame) = to_server.recv().await else {
            break;
        };
        match Outbound::decode(&frame) {
            Ok(event) => {
                tracing::debug!(event = event.name(), "simulated broker received");
                pending.extend(broker.handle(LOCAL, event, &timestamp()));
            },
            Err(error) => tracing::warn!(%error, "dropping malformed client frame"),
        }
    }

    broker.disconnect(LOCAL);
    tracing::debug!("simulated broker stopped");
}

/// Encode and push an event to the client. `false` once the client is gone.
async fn deliver(from_server: &mpsc::Sender<String>, event: &Inbound) -> bool {
    match event.encode() {
        Ok(frame) => from_server.send(frame).await.is_ok(),
        Err(error) => {
            tracing::warn!(%error, event = event.name(), "failed to encode broker event");
            true
        },
    }
}

/// Peers answer private messages addressed to them.
fn peer_reply(delivery: &Delivery) -> Option<Outbound> {
    let Inbound::PrivateMessage(direct) = &delivery.event else {
        return None;
    };
    let (_, name, _) = PEERS.iter().find(|(session, ..)| *session == delivery.session)?;
    let body = format!("{name} got your message: {}", direct.msg);
    Some(Outbound::Message(SendMessage::private(body, direct.from.clone())))
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use roomline_core::SessionConfig;

    use super::*;

    async fn next_event(conn: &mut Connection) -> Inbound {
        let frame = tokio::time::timeout(Duration::from_secs(5), conn.from_server.recv())
            .await
            .expect("timed out waiting for broker")
            .expect("broker stopped");
        Inbound::decode(&frame).unwrap()
    }

    async fn send(conn: &Connection, event: &Outbound) {
        conn.to_server.send(event.encode().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn connect_reports_presence_with_peers() {
        let mut conn = spawn_server("me", SessionConfig::default().rooms);

        assert_eq!(next_event(&mut conn).await, Inbound::Connect);
        let Inbound::ActiveUsers(active) = next_event(&mut conn).await else {
            panic!("expected presence after connect");
        };
        assert_eq!(active.users, ["me", "ada", "grace"]);

        conn.stop();
    }

    #[tokio::test]
    async fn join_and_public_message_echo_back() {
        let mut conn = spawn_server("me", SessionConfig::default().rooms);
        next_event(&mut conn).await;
        next_event(&mut conn).await;

        send(&conn, &Outbound::join("General")).await;
        let Inbound::Status(joined) = next_event(&mut conn).await else {
            panic!("expected join notice");
        };
        assert_eq!(joined.msg, "me has joined the room");

        send(&conn, &Outbound::Message(SendMessage::public("hello", "General"))).await;
        let Inbound::Message(broadcast) = next_event(&mut conn).await else {
            panic!("expected broadcast");
        };
        assert_eq!(broadcast.username, "me");
        assert_eq!(broadcast.room.as_deref(), Some("General"));
        assert!(broadcast.timestamp.is_some());

        conn.stop();
    }

    #[tokio::test]
    async fn peers_answer_private_messages() {
        let mut conn = spawn_server("me", SessionConfig::default().rooms);
        next_event(&mut conn).await;
        next_event(&mut conn).await;

        send(&conn, &Outbound::Message(SendMessage::private("ping", "grace"))).await;
        let Inbound::PrivateMessage(reply) = next_event(&mut conn).await else {
            panic!("expected private reply");
        };
        assert_eq!(reply.from, "grace");
        assert_eq!(reply.msg, "grace got your message: ping");

        conn.stop();
    }

    #[tokio::test]
    async fn malformed_frames_are_ignored() {
        let mut conn = spawn_server("me", SessionConfig::default().rooms);
        next_event(&mut conn).await;
        next_event(&mut conn).await;

        conn.to_server.send("{not json".into()).await.unwrap();
        send(&conn, &Outbound::join("Tech")).await;
        let Inbound::Status(joined) = next_event(&mut conn).await else {
            panic!("expected join notice");
        };
        assert_eq!(joined.msg, "me has joined the room");

        conn.stop();
    }
}
