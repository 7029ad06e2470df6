//! End-to-end scenarios: real sessions and runtimes against the broker model.

use roomline_core::{ConnectionState, KeyInput, ReconnectPolicy, SessionConfig};
use roomline_harness::{SessionId, SimWorld};

fn transcript(world: &SimWorld, session: SessionId) -> String {
    world
        .client(session)
        .map(|client| {
            client
                .view()
                .transcript()
                .iter()
                .map(|m| format!("{:?} {}: {}", m.classification, m.sender, m.body))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

async fn pair() -> (SimWorld, SessionId, SessionId) {
    let mut world = SimWorld::default();
    let amy = world.spawn("amy", SessionConfig::default()).await.unwrap();
    let bob = world.spawn("bob", SessionConfig::default()).await.unwrap();
    (world, amy, bob)
}

#[tokio::test]
async fn connect_joins_general_and_announces() {
    let (world, amy, bob) = pair().await;

    assert_eq!(world.broker().members_of("General"), [amy, bob]);
    insta::assert_snapshot!(transcript(&world, amy), @r"
    System System: amy has joined the room
    System System: bob has joined the room
    ");
    assert_eq!(world.client(bob).map(|c| c.view().active_room()), Some(Some("General")));
    assert!(world.violations().is_empty(), "{:?}", world.violations());
}

#[tokio::test]
async fn public_message_is_own_for_sender_other_for_peers() {
    let (mut world, amy, bob) = pair().await;
    world.submit(amy, "hello").await.unwrap();

    insta::assert_snapshot!(transcript(&world, amy), @r"
    System System: amy has joined the room
    System System: bob has joined the room
    Own amy: hello
    ");
    insta::assert_snapshot!(transcript(&world, bob), @r"
    System System: bob has joined the room
    Other amy: hello
    ");
    assert!(world.violations().is_empty(), "{:?}", world.violations());
}

#[tokio::test]
async fn private_message_echoes_locally_and_reaches_target_once() {
    let (mut world, amy, bob) = pair().await;
    world.submit(amy, "@bob   psst   there").await.unwrap();

    let amy_view = transcript(&world, amy);
    assert!(amy_view.ends_with("Private To bob: psst there"), "{amy_view}");
    assert_eq!(amy_view.matches("psst").count(), 1);

    let bob_view = transcript(&world, bob);
    assert!(bob_view.ends_with("Private amy: psst there"), "{bob_view}");
}

#[tokio::test]
async fn rooms_are_isolated_and_replayed() {
    let (mut world, amy, bob) = pair().await;
    world.send(amy, "before").await.unwrap();
    let general_before = transcript(&world, bob);

    world.switch_room(bob, "Tech").await.unwrap();
    assert_eq!(world.broker().members_of("General"), [amy]);
    world.send(amy, "while away").await.unwrap();
    world.send(bob, "in tech").await.unwrap();
    assert!(!transcript(&world, bob).contains("while away"));

    world.switch_room(bob, "General").await.unwrap();
    let general_after = transcript(&world, bob);
    assert!(general_after.starts_with(&general_before));
    assert!(!general_after.contains("while away"));
    assert!(!general_after.contains("in tech"));
    assert!(world.violations().is_empty(), "{:?}", world.violations());
}

#[tokio::test]
async fn reconnect_rejoins_current_room() {
    let (mut world, amy, bob) = pair().await;
    world.switch_room(bob, "Games").await.unwrap();

    world.disconnect(bob).await.unwrap();
    let state = world.client(bob).map(|c| c.session().connection_state());
    assert_eq!(state, Some(ConnectionState::Disconnected));
    assert_eq!(world.client(amy).map(|c| c.session().roster().len()), Some(1));

    world.reconnect(bob).await.unwrap();
    assert_eq!(world.broker().members_of("Games"), [bob]);
    assert_eq!(world.client(bob).and_then(|c| c.session().current_room()), Some("Games"));
    assert!(world.violations().is_empty(), "{:?}", world.violations());
}

#[tokio::test]
async fn reconnect_does_not_announce_a_departure() {
    let (mut world, amy, bob) = pair().await;

    world.disconnect(bob).await.unwrap();
    world.reconnect(bob).await.unwrap();
    world.settle().await.unwrap();

    let seen = transcript(&world, amy);
    assert!(!seen.contains("bob has left the room"), "{seen}");
    assert!(seen.ends_with("bob has joined the room"), "{seen}");
    assert_eq!(world.broker().members_of("General"), [amy, bob]);
    assert!(world.violations().is_empty(), "{:?}", world.violations());
}

#[tokio::test]
async fn manual_reconnect_waits_for_user() {
    let mut world = SimWorld::default();
    let config = SessionConfig { reconnect: ReconnectPolicy::Manual, ..SessionConfig::default() };
    let amy = world.spawn("amy", config).await.unwrap();

    world.disconnect(amy).await.unwrap();
    world.reconnect(amy).await.unwrap();
    assert!(world.broker().members_of("General").is_empty());

    world.key(amy, KeyInput::Tab).await.unwrap();
    assert_eq!(world.broker().members_of("Random"), [amy]);
}

#[tokio::test]
async fn roster_mention_starts_private_reply() {
    let (mut world, amy, bob) = pair().await;

    world.key(amy, KeyInput::Down).await.unwrap();
    world.key(amy, KeyInput::Mention).await.unwrap();
    let composer = world.client(amy).map(|c| c.view().composer().to_owned());
    assert_eq!(composer.as_deref(), Some(""), "own entry is not actionable");

    world.key(amy, KeyInput::Down).await.unwrap();
    world.key(amy, KeyInput::Mention).await.unwrap();
    let composer = world.client(amy).map(|c| c.view().composer().to_owned());
    assert_eq!(composer.as_deref(), Some("@bob "));

    world.submit(amy, "hey").await.unwrap();
    assert!(transcript(&world, bob).ends_with("Private amy: hey"));
}
