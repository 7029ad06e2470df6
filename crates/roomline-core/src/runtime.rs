//! Generic runtime for session orchestration.
//!
//! The Runtime drives the client event loop, coordinating between:
//! - [`SessionController`]: session state machine
//! - [`ConnectionAdapter`]: frame codec and send queue
//! - [`SessionView`]: view model folded from emitted changes
//! - [`Driver`]: platform-specific I/O

use crate::{
    ConnectionAdapter, Driver, SessionAction, SessionController, SessionEvent, SessionView,
};

/// Generic runtime that orchestrates session, adapter, view and driver.
pub struct Runtime<D: Driver> {
    driver: D,
    session: SessionController,
    adapter: ConnectionAdapter,
    view: SessionView,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime around an existing session.
    pub fn new(driver: D, session: SessionController) -> Self {
        let view = session.initial_view();
        Self { driver, session, adapter: ConnectionAdapter::new(), view }
    }

    /// Run the main event loop until the session asks to quit.
    ///
    /// Each cycle:
    /// 1. Polls the driver for a local input event
    /// 2. Drains buffered frames from the transport
    /// 3. Feeds both through the session and executes the resulting actions
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.start().await?;

        loop {
            if self.process_cycle().await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the session should quit.
    pub async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await?
            && self.dispatch(event).await?
        {
            return Ok(true);
        }

        if self.driver.is_connected() {
            while let Some(frame) = self.driver.recv_frame().await {
                let Some(event) = self.adapter.receive(&frame) else {
                    continue;
                };
                if self.dispatch(event).await? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Feed one event through the session and execute the result.
    ///
    /// Returns `true` if the session should quit.
    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<bool, D::Error> {
        let actions = self.session.handle(event);
        self.execute(actions).await
    }

    /// Execute session actions: queue transmissions, fold view changes, then
    /// flush frames and render once.
    ///
    /// Returns `true` if a [`SessionAction::Quit`] was seen.
    pub async fn execute(&mut self, actions: Vec<SessionAction>) -> Result<bool, D::Error> {
        let mut dirty = false;
        let mut quit = false;

        for action in actions {
            match action {
                SessionAction::Transmit(event) => self.adapter.send(event),
                SessionAction::View(change) => {
                    self.view.apply(change);
                    dirty = true;
                },
                SessionAction::Quit => {
                    quit = true;
                    break;
                },
            }
        }

        self.send_outgoing_frames().await?;
        if dirty && !quit {
            self.driver.render(&self.view)?;
        }
        Ok(quit)
    }

    /// Render the initial view, report the connection attempt, then start
    /// the transport. [`Runtime::run`] calls this first; step-driven callers
    /// call it once before [`Runtime::process_cycle`].
    pub async fn start(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.view)?;
        let actions = self.session.handle(SessionEvent::Connecting);
        self.execute(actions).await?;
        self.driver.connect().await
    }

    /// Send all pending outgoing frames to the broker.
    async fn send_outgoing_frames(&mut self) -> Result<(), D::Error> {
        for frame in self.adapter.take_outgoing() {
            self.driver.send_frame(frame).await?;
        }
        Ok(())
    }

    /// Session state machine.
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Mutable session, for calling user operations directly.
    pub fn session_mut(&mut self) -> &mut SessionController {
        &mut self.session
    }

    /// Current view model.
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable underlying driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
