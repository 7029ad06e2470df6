//! Property-based tests for multi-client sessions.
//!
//! Tests verify that invariants hold under arbitrary operation sequences.
//! This ensures behavioral correctness across all possible execution paths.

use proptest::prelude::*;
use roomline_core::{KeyInput, SessionConfig};
use roomline_harness::SimWorld;

const ROOMS: [&str; 5] = ["General", "Random", "Tech", "Games", "Lobby"];
const TEXTS: [&str; 6] = ["hi", "  spaced out  ", "", "@bob psst", "@amy", "@zed lost"];

#[derive(Debug, Clone)]
enum Op {
    Submit { client: usize, text: usize },
    Switch { client: usize, room: usize },
    Key { client: usize, key: KeyInput },
    Bounce { client: usize },
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        Just(KeyInput::Tab),
        Just(KeyInput::BackTab),
        Just(KeyInput::Up),
        Just(KeyInput::Down),
        Just(KeyInput::Mention),
        prop::char::range('a', 'z').prop_map(KeyInput::Char),
        Just(KeyInput::Enter),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..2usize, 0..TEXTS.len()).prop_map(|(client, text)| Op::Submit { client, text }),
        2 => (0..2usize, 0..ROOMS.len()).prop_map(|(client, room)| Op::Switch { client, room }),
        3 => (0..2usize, key_strategy()).prop_map(|(client, key)| Op::Key { client, key }),
        1 => (0..2usize).prop_map(|client| Op::Bounce { client }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Session invariants hold for two clients under arbitrary operations.
    #[test]
    fn prop_world_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let violations = rt.block_on(async {
            let mut world = SimWorld::default();
            let ids = [
                world.spawn("amy", SessionConfig::default()).await.unwrap(),
                world.spawn("bob", SessionConfig::default()).await.unwrap(),
            ];

            for op in ops {
                match op {
                    Op::Submit { client, text } => world.submit(ids[client], TEXTS[text]).await,
                    Op::Switch { client, room } => world.switch_room(ids[client], ROOMS[room]).await,
                    Op::Key { client, key } => world.key(ids[client], key).await,
                    Op::Bounce { client } => {
                        world.disconnect(ids[client]).await.unwrap();
                        world.reconnect(ids[client]).await
                    },
                }
                .unwrap();
            }
            world.violations().to_vec()
        });

        prop_assert!(violations.is_empty(), "{:?}", violations);
    }
}
