//! Display backends.
//!
//! A backend owns the actual display hardware (or its emulation): it
//! enumerates connectors and their modes, validates and applies output
//! state, and raises hotplug and frame events. The compositor core drives a
//! backend exclusively through the [`Backend`] trait; everything below the
//! trait (DRM, a nested session, headless buffers) is out of scope here.

use anyhow::Result;
use umbra_ipc::{Mode, Transform};

#[cfg(test)]
pub mod fake;
pub mod headless;

pub use headless::Headless;

/// Identity of an output, allocated by the backend.
///
/// Ids are monotonically increasing and never reused, so looking one up
/// after its output was destroyed is a defined "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(u64);

impl OutputId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Static description of a connector reported at hotplug.
#[derive(Debug, Clone)]
pub struct ConnectorInfo {
    /// Connector name, for example `DP-1` or `HEADLESS-1`.
    pub name: String,
    pub make: String,
    pub model: String,
    /// Supported modes in backend-reported order.
    pub modes: Vec<Mode>,
    /// Mode the connector is already driving, if any (for example after a
    /// session handoff).
    pub current_mode: Option<Mode>,
    /// Whether the output supports variable refresh rate.
    pub vrr_supported: bool,
    /// Synthetic output without hardware behind it.
    pub is_virtual: bool,
    /// Connector not meant for desktop use, for example a VR headset.
    pub non_desktop: bool,
}

impl ConnectorInfo {
    pub fn preferred_mode(&self) -> Option<Mode> {
        self.modes
            .iter()
            .copied()
            .find(|mode| mode.is_preferred)
            .or_else(|| self.modes.first().copied())
    }
}

/// Output state proposed for a trial or real commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposedState {
    pub enabled: bool,
    pub mode: Option<Mode>,
    pub scale: f64,
    pub transform: Transform,
    pub adaptive_sync: bool,
}

impl Default for ProposedState {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: None,
            scale: 1.,
            transform: Transform::Normal,
            adaptive_sync: false,
        }
    }
}

/// Event raised by a backend.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A new connector became available.
    Added {
        output: OutputId,
        connector: ConnectorInfo,
    },
    /// A connector was disconnected or destroyed.
    Removed { output: OutputId },
    /// An output is ready to display a frame.
    Frame { output: OutputId },
    /// The backend asks for a new state to be applied, for example a nested
    /// session resized by its host.
    StateRequested {
        output: OutputId,
        state: ProposedState,
    },
}

/// Interface to the display hardware.
///
/// Trial and real commits are synchronous and bounded; a failing commit is a
/// returned failure, never a blocking retry.
pub trait Backend {
    /// Validates `state` against hardware constraints without applying it.
    fn test(&mut self, output: OutputId, state: &ProposedState) -> bool;

    /// Applies `state` so that it takes visible effect.
    fn commit(&mut self, output: OutputId, state: &ProposedState) -> Result<()>;

    /// Commits the pending gamma tables for `output`.
    fn commit_gamma(&mut self, output: OutputId) -> Result<()>;

    /// Asks the backend to materialize a synthetic output.
    ///
    /// The backend reports it back through [`BackendEvent::Added`].
    fn create_virtual_output(&mut self, width: u16, height: u16);

    /// Destroys an output; the backend reports [`BackendEvent::Removed`].
    fn destroy_output(&mut self, output: OutputId);

    /// Schedules a frame event for `output`.
    fn schedule_frame(&mut self, output: OutputId);

    /// Takes the queued events, oldest first.
    fn drain_events(&mut self) -> Vec<BackendEvent>;
}
