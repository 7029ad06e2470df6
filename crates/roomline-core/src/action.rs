//! Session side-effects and intents.
//!
//! This module defines the [`SessionAction`] enum, which represents
//! instructions produced by the [`crate::SessionController`] for the runtime
//! to execute.

use roomline_proto::Outbound;

use crate::ViewChange;

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Hand an outbound event to the transport. Fire-and-forget.
    Transmit(Outbound),

    /// Apply a change to the rendered view.
    View(ViewChange),

    /// Quit the application.
    Quit,
}

impl SessionAction {
    /// Outbound event carried by a [`SessionAction::Transmit`].
    pub fn as_transmit(&self) -> Option<&Outbound> {
        match self {
            Self::Transmit(event) => Some(event),
            Self::View(_) | Self::Quit => None,
        }
    }

    /// View change carried by a [`SessionAction::View`].
    pub fn as_view(&self) -> Option<&ViewChange> {
        match self {
            Self::View(change) => Some(change),
            Self::Transmit(_) | Self::Quit => None,
        }
    }
}
