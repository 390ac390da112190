//! Power and gamma control.
//!
//! Power requests arrive out of band (an idle daemon, a power button) and
//! apply enable/disable plus a real commit. Gamma changes are never applied
//! from the request itself; the request only marks the output dirty and the
//! actual table commit rides the next frame event, avoiding tearing.

use tracing::warn;
use umbra_ipc::PowerMode;

use crate::backend::{Backend, OutputId};

use super::Umbra;

impl Umbra {
    /// Applies an out-of-band power mode request.
    ///
    /// Powered-off outputs keep their entity, layout placement and enabled
    /// flag; only the hardware state changes. A failed power-on trial rolls
    /// back instead of committing bad state.
    pub fn set_power_mode(&mut self, backend: &mut dyn Backend, id: OutputId, mode: PowerMode) {
        let Some(output) = self.outputs.get_mut(id) else {
            return;
        };

        match mode {
            PowerMode::Off => {
                output.power_on = false;
                let state = output.proposed_state();
                if let Err(err) = backend.commit(id, &state) {
                    warn!("failed to power off output {}: {err:?}", output.name);
                    output.power_on = true;
                }
            }
            PowerMode::On => {
                output.power_on = true;
                let state = output.proposed_state();
                if !backend.test(id, &state) {
                    warn!("power-on state rejected for output {}", output.name);
                    output.power_on = false;
                    return;
                }
                if let Err(err) = backend.commit(id, &state) {
                    warn!("failed to power on output {}: {err:?}", output.name);
                    output.power_on = false;
                    return;
                }
                // Re-align the cursor so it isn't invisible on the newly
                // enabled output.
                self.hooks.realign_pointer();
            }
        }
    }

    /// Records that new gamma tables are pending for an output.
    pub fn mark_gamma_dirty(&mut self, backend: &mut dyn Backend, id: OutputId) {
        let Some(output) = self.outputs.get_mut(id) else {
            return;
        };
        if !output.is_usable() {
            return;
        }
        output.gamma_dirty = true;
        backend.schedule_frame(id);
    }

    /// Frame event handler. Pending gamma tables take the frame's commit;
    /// normal presentation belongs to the renderer and happens elsewhere.
    pub fn on_frame(&mut self, backend: &mut dyn Backend, id: OutputId) {
        let Some(output) = self.outputs.get_mut(id) else {
            return;
        };
        if !output.is_usable() || !output.power_on {
            return;
        }

        if output.gamma_dirty {
            output.gamma_dirty = false;
            if let Err(err) = backend.commit_gamma(id) {
                warn!("failed to commit gamma for output {}: {err:?}", output.name);
            }
        }
    }
}
