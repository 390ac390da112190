//! Creating and destroying virtual (headless) outputs.

use tracing::debug;

use crate::backend::Backend;

use super::Umbra;

/// Virtual outputs come up at a fixed size; clients reconfigure them
/// afterwards like any other output.
const VIRTUAL_OUTPUT_SIZE: (u16, u16) = (1920, 1080);

impl Umbra {
    /// Asks the backend to materialize a virtual output.
    ///
    /// The requested name is parked in a single pending slot; the backend's
    /// hotplug event consumes it to label the new output. Only one creation
    /// can be pending at a time, so a second request overwrites the slot.
    ///
    /// The duplicate check is a case-sensitive exact match over virtual
    /// outputs, unlike the case-insensitive general name lookup. This
    /// asymmetry is deliberate and mirrors the duplicate check clients
    /// already rely on.
    pub fn add_virtual_output(&mut self, backend: &mut dyn Backend, name: Option<&str>) {
        if let Some(name) = name {
            if self
                .outputs
                .iter()
                .any(|output| output.is_virtual && output.name == name)
            {
                debug!("refusing to create virtual output with duplicate name");
                return;
            }
            self.pending_virtual_name = Some(name.to_owned());
        } else {
            self.pending_virtual_name = None;
        }

        backend.create_virtual_output(VIRTUAL_OUTPUT_SIZE.0, VIRTUAL_OUTPUT_SIZE.1);
    }

    /// Destroys the virtual output with the given name, or the first one
    /// found when no name is given. A missing name is a silent no-op.
    pub fn remove_virtual_output(&mut self, backend: &mut dyn Backend, name: Option<&str>) {
        let target = self
            .outputs
            .iter()
            .find(|output| output.is_virtual && name.map_or(true, |name| output.name == name));
        if let Some(output) = target {
            backend.destroy_output(output.id);
        }
    }
}
