//! Several sessions wired to one simulated broker.
//!
//! `SimWorld` owns a [`SimBroker`] and one production [`Runtime`] per client,
//! each on a [`SimDriver`]. Stepping the world moves frames between clients
//! and broker until nothing is in flight, checking the registered invariants
//! after every cycle.

use std::collections::BTreeMap;

use roomline_core::{
    Identity, KeyInput, Runtime, SessionAction, SessionConfig, SessionController, SessionEvent,
};
use roomline_proto::{Inbound, Outbound};

use crate::{
    ClientSnapshot, Delivery, InvariantRegistry, SessionId, SimBroker, SimDriver, SimDriverError,
    SystemSnapshot, Violation,
};

/// Upper bound on settle rounds before giving up on quiescence.
const MAX_ROUNDS: usize = 256;

/// Simulated clients sharing one broker.
pub struct SimWorld {
    broker: SimBroker,
    clients: BTreeMap<SessionId, Runtime<SimDriver>>,
    snapshots: BTreeMap<SessionId, ClientSnapshot>,
    invariants: InvariantRegistry,
    violations: Vec<Violation>,
    next_session: SessionId,
    clock: u64,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(SimBroker::default())
    }
}

impl SimWorld {
    /// Create a world around `broker` with the standard invariants.
    pub fn new(broker: SimBroker) -> Self {
        Self {
            broker,
            clients: BTreeMap::new(),
            snapshots: BTreeMap::new(),
            invariants: InvariantRegistry::standard(),
            violations: Vec::new(),
            next_session: 1,
            clock: 0,
        }
    }

    /// Start a client named `identity` and connect it to the broker.
    pub async fn spawn(
        &mut self,
        identity: &str,
        config: SessionConfig,
    ) -> Result<SessionId, SimDriverError> {
        let session = self.next_session;
        self.next_session += 1;

        let controller = SessionController::new(Identity::new(identity), config);
        let mut runtime = Runtime::new(SimDriver::new(), controller);
        runtime.start().await?;
        self.clients.insert(session, runtime);

        let deliveries = self.broker.connect(session, identity);
        self.route(deliveries);
        self.settle().await?;
        Ok(session)
    }

    /// Drop `session`'s transport. The client sees `disconnect`, the others a
    /// new presence list.
    pub async fn disconnect(&mut self, session: SessionId) -> Result<(), SimDriverError> {
        self.route(vec![Delivery { session, event: Inbound::Disconnect }]);
        let deliveries = self.broker.disconnect(session);
        self.route(deliveries);
        self.settle().await
    }

    /// Re-establish `session`'s transport under the same identity.
    pub async fn reconnect(&mut self, session: SessionId) -> Result<(), SimDriverError> {
        let Some(identity) = self.clients.get(&session).map(|c| c.session().identity().to_string())
        else {
            return Ok(());
        };
        let deliveries = self.broker.connect(session, identity);
        self.route(deliveries);
        self.settle().await
    }

    /// Feed a key press to `session`.
    pub async fn key(&mut self, session: SessionId, key: KeyInput) -> Result<(), SimDriverError> {
        if let Some(client) = self.clients.get_mut(&session) {
            client.driver_mut().inject_event(SessionEvent::Key(key));
        }
        self.settle().await
    }

    /// Type `text` into `session`'s composer and press Enter.
    pub async fn submit(&mut self, session: SessionId, text: &str) -> Result<(), SimDriverError> {
        if let Some(client) = self.clients.get_mut(&session) {
            for c in text.chars() {
                client.driver_mut().inject_event(SessionEvent::Key(KeyInput::Char(c)));
            }
            client.driver_mut().inject_event(SessionEvent::Key(KeyInput::Enter));
        }
        self.settle().await
    }

    /// Call [`SessionController::send`] on `session` directly.
    pub async fn send(&mut self, session: SessionId, text: &str) -> Result<(), SimDriverError> {
        self.operate(session, |controller| controller.send(text)).await
    }

    /// Call [`SessionController::switch_room`] on `session` directly.
    pub async fn switch_room(&mut self, session: SessionId, room: &str) -> Result<(), SimDriverError> {
        self.operate(session, |controller| controller.switch_room(room)).await
    }

    async fn operate(
        &mut self,
        session: SessionId,
        op: impl FnOnce(&mut SessionController) -> Vec<SessionAction>,
    ) -> Result<(), SimDriverError> {
        if let Some(client) = self.clients.get_mut(&session) {
            let actions = op(client.session_mut());
            client.execute(actions).await?;
        }
        self.settle().await
    }

    /// Run every client and the broker until no frames are in flight.
    pub async fn settle(&mut self) -> Result<(), SimDriverError> {
        for _ in 0..MAX_ROUNDS {
            let mut outbound = Vec::new();
            for (&session, client) in &mut self.clients {
                while client.driver().has_pending() {
                    client.process_cycle().await?;
                }
                outbound.extend(client.driver_mut().take_outgoing().into_iter().map(|f| (session, f)));
            }
            self.check_invariants();

            if outbound.is_empty() {
                return Ok(());
            }
            for (session, frame) in outbound {
                self.forward(session, &frame);
            }
        }
        tracing::warn!(rounds = MAX_ROUNDS, "world did not settle");
        Ok(())
    }

    fn forward(&mut self, session: SessionId, frame: &str) {
        match Outbound::decode(frame) {
            Ok(event) => {
                self.clock += 1;
                let timestamp = format!("T+{:06}", self.clock);
                let deliveries = self.broker.handle(session, event, &timestamp);
                self.route(deliveries);
            },
            Err(error) => tracing::warn!(session, %error, "client sent undecodable frame"),
        }
    }

    fn route(&mut self, deliveries: Vec<Delivery>) {
        for Delivery { session, event } in deliveries {
            let Some(client) = self.clients.get_mut(&session) else {
                continue;
            };
            match event.encode() {
                Ok(frame) => client.driver_mut().inject_frame(frame),
                Err(error) => tracing::warn!(session, %error, "dropping unencodable delivery"),
            }
        }
    }

    fn check_invariants(&mut self) {
        let mut clients = Vec::with_capacity(self.clients.len());
        for (&session, client) in &self.clients {
            let mut snapshot = ClientSnapshot::capture(session, client.session(), client.view());
            if let Some(previous) = self.snapshots.get(&session) {
                snapshot = snapshot.after(previous);
            }
            self.snapshots.insert(session, snapshot.clone());
            clients.push(snapshot);
        }

        if let Err(found) = self.invariants.check_all(&SystemSnapshot::from_clients(clients)) {
            self.violations.extend(found);
        }
    }

    /// Runtime of `session`.
    pub fn client(&self, session: SessionId) -> Option<&Runtime<SimDriver>> {
        self.clients.get(&session)
    }

    /// The broker model.
    pub fn broker(&self) -> &SimBroker {
        &self.broker
    }

    /// Invariant violations observed so far.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}
