//! Fuzz target for inbound event decoding
//!
//! Harden the JSON envelope decoder against hostile broker frames.
//!
//! # Strategy
//!
//! - Random bytes: arbitrary data, often not UTF-8
//! - Deeply nested: `data` nested to arbitrary depth
//! - Type confusion: a known event name with another event's payload
//! - Raw envelope: arbitrary event name and payload text
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - A frame that decodes re-encodes, and the result decodes to the same
//!   event

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use roomline_proto::Inbound;

const EVENT_NAMES: [&str; 6] =
    ["connect", "disconnect", "message", "private_message", "status", "active_users"];

const PAYLOADS: [&str; 5] = [
    r#"{"msg":"hi","username":"bob"}"#,
    r#"{"msg":"hi","from":"bob","to":"me"}"#,
    r#"{"msg":"bob has joined the room","type":"join"}"#,
    r#"{"users":["bob","me"]}"#,
    "null",
];

#[derive(Debug, Clone, Arbitrary)]
enum DecodeAttack {
    RandomBytes { bytes: Vec<u8> },
    DeeplyNested { event: u8, depth: u8 },
    TypeConfusion { event: u8, payload: u8 },
    RawEnvelope { event: String, data: String },
}

fuzz_target!(|attack: DecodeAttack| {
    match attack {
        DecodeAttack::RandomBytes { bytes } => check(&bytes),

        DecodeAttack::DeeplyNested { event, depth } => {
            let name = EVENT_NAMES[usize::from(event) % EVENT_NAMES.len()];
            let depth = usize::from(depth);
            let data = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
            check(format!(r#"{{"event":"{name}","data":{data}}}"#).as_bytes());
        }

        DecodeAttack::TypeConfusion { event, payload } => {
            let name = EVENT_NAMES[usize::from(event) % EVENT_NAMES.len()];
            let data = PAYLOADS[usize::from(payload) % PAYLOADS.len()];
            check(format!(r#"{{"event":"{name}","data":{data}}}"#).as_bytes());
        }

        DecodeAttack::RawEnvelope { event, data } => {
            check(format!(r#"{{"event":{event:?},"data":{data}}}"#).as_bytes());
        }
    }
});

fn check(bytes: &[u8]) {
    let Ok(event) = Inbound::decode_bytes(bytes) else {
        return;
    };

    let encoded = event.encode().expect("decoded event must re-encode");
    let decoded = Inbound::decode(&encoded).expect("re-encoded event must decode");
    assert_eq!(decoded, event, "re-encoding changed the event");
}
