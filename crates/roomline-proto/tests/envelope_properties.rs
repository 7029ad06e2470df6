//! Property-based tests for event envelopes.
//!
//! Decoding must never panic on hostile input, and an outgoing message must
//! always name exactly one destination.

use proptest::prelude::*;
use roomline_proto::{
    Inbound, Outbound,
    payloads::{ActiveUsers, Broadcast, DirectMessage, SendMessage, StatusKind, StatusNotice},
};

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,16}"
}

fn body() -> impl Strategy<Value = String> {
    any::<String>()
}

fn timestamp() -> impl Strategy<Value = Option<String>> {
    prop::option::of("2024-0[1-9]-[12][0-9]T[01][0-9]:[0-5][0-9]:[0-5][0-9]")
}

fn outbound() -> impl Strategy<Value = Outbound> {
    prop_oneof![
        name().prop_map(Outbound::join),
        name().prop_map(Outbound::leave),
        (body(), name()).prop_map(|(b, r)| Outbound::Message(SendMessage::public(b, r))),
        (body(), name()).prop_map(|(b, t)| Outbound::Message(SendMessage::private(b, t))),
    ]
}

fn inbound() -> impl Strategy<Value = Inbound> {
    prop_oneof![
        Just(Inbound::Connect),
        Just(Inbound::Disconnect),
        (body(), name(), prop::option::of(name()), timestamp()).prop_map(
            |(msg, username, room, timestamp)| {
                Inbound::Message(Broadcast { msg, username, room, timestamp })
            }
        ),
        (body(), name(), prop::option::of(name()), timestamp()).prop_map(
            |(msg, from, to, timestamp)| {
                Inbound::PrivateMessage(DirectMessage { msg, from, to, timestamp })
            }
        ),
        (body(), prop::option::of(prop_oneof![Just(StatusKind::Join), Just(StatusKind::Leave)]))
            .prop_map(|(msg, kind)| Inbound::Status(StatusNotice { msg, kind, timestamp: None })),
        prop::collection::vec(name(), 0..8)
            .prop_map(|users| Inbound::ActiveUsers(ActiveUsers { users })),
    ]
}

proptest! {
    #[test]
    fn prop_message_sets_exactly_one_destination(event in outbound()) {
        if let Outbound::Message(message) = event {
            prop_assert!(message.room.is_some() ^ message.target.is_some());
        }
    }

    #[test]
    fn prop_envelope_carries_event_name(event in inbound()) {
        let text = event.encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(value["event"].as_str(), Some(event.name()));
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Inbound::decode_bytes(&bytes);
    }
}
