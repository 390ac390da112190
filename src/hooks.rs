//! Hooks into the desktop collaborators.
//!
//! The window placement policy, reserved-region (layer shell) handling,
//! session lock, seat and DRM leasing all live outside this core. They
//! observe and react to output topology through this trait; every method has
//! a no-op default so collaborators implement only what they care about.

use crate::backend::OutputId;
use crate::utils::{Point, Rect};

pub trait DesktopHooks {
    /// Current position of the seat's logical pointer in layout coordinates.
    fn pointer_position(&self) -> Point {
        Point::default()
    }

    /// A physical output became available for DRM leasing.
    fn offer_for_lease(&mut self, _output: OutputId) {}

    /// An output gained scene presence and layout placement. Reserved
    /// regions and, when a session lock is active, its lock surface are
    /// created here.
    fn output_added(&mut self, _output: OutputId) {}

    /// Move region and window assignments off an output. Called before the
    /// output loses its layout placement.
    fn evacuate_output(&mut self, _output: OutputId) {}

    /// The output entity is going away; drop any remaining references.
    fn output_destroyed(&mut self, _output: OutputId) {}

    /// Reserved-region geometry needs recomputing for this output.
    fn update_region_geometry(&mut self, _output: OutputId) {}

    /// Shrink the usable area further for legacy clients that do not speak
    /// the layer protocol.
    fn adjust_usable_area(&mut self, _output: OutputId, _area: &mut Rect) {}

    /// Re-run window arrangement across all outputs.
    fn arrange_outputs(&mut self) {}

    /// The layout settled; `snapshot` is the new client-visible
    /// configuration.
    fn layout_published(&mut self, _snapshot: &[umbra_ipc::Output]) {}

    /// Realign the per-output cursor representations with the seat pointer
    /// so the cursor stays visible after topology changes.
    fn realign_pointer(&mut self) {}
}

/// Hooks implementation that ignores everything.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl DesktopHooks for NoopHooks {}
