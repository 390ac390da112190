//! Backend event handling: hotplug, external state requests, dispatch.

use tracing::{debug, warn};

use crate::backend::{Backend, BackendEvent, ConnectorInfo, OutputId, ProposedState};
use crate::scene::OutputTrees;

use super::negotiate::negotiate_mode;
use super::subsystems::Output;
use super::Umbra;

impl Umbra {
    /// Drains and dispatches every queued backend event.
    pub fn dispatch_pending(&mut self, backend: &mut dyn Backend) {
        for event in backend.drain_events() {
            self.dispatch(backend, event);
        }
    }

    /// Routes one backend event to its handler.
    pub fn dispatch(&mut self, backend: &mut dyn Backend, event: BackendEvent) {
        match event {
            BackendEvent::Added { output, connector } => {
                self.on_output_added(backend, output, connector);
            }
            BackendEvent::Removed { output } => self.on_output_removed(output),
            BackendEvent::Frame { output } => self.on_frame(backend, output),
            BackendEvent::StateRequested { output, state } => {
                self.on_state_requested(backend, output, state);
            }
        }
    }

    /// A new output (display or monitor) became available.
    pub fn on_output_added(
        &mut self,
        backend: &mut dyn Backend,
        id: OutputId,
        mut connector: ConnectorInfo,
    ) {
        if connector.is_virtual {
            if let Some(name) = self.pending_virtual_name.take() {
                connector.name = name;
            }
        } else {
            // Any physical display is offered for lease; some clients want
            // to take ownership of a display to present directly.
            self.hooks.offer_for_lease(id);
        }

        // Don't configure non-desktop displays, such as VR headsets.
        if connector.non_desktop {
            debug!("not configuring non-desktop output {}", connector.name);
            return;
        }

        let negotiated = negotiate_mode(
            backend,
            id,
            &connector,
            self.reuse_output_mode,
            self.adaptive_sync,
        );

        let trees = OutputTrees::new(&mut self.scene);
        let mut output = Output::new(id, &connector, trees);
        if let Some(negotiated) = negotiated {
            output.enabled = true;
            output.current_mode = Some(negotiated.mode);
            output.adaptive_sync_requested = self.adaptive_sync;
            output.adaptive_sync_active = negotiated.adaptive_sync;
        }
        output.usable_area = output.full_geometry();
        let enabled = output.enabled;
        self.outputs.register(output);

        self.with_layout_change(|umbra| {
            if enabled {
                umbra.add_output_to_layout(id);
            }
            // Reserved regions and, under a session lock, the lock surface
            // are created once the output has its scene presence.
            umbra.hooks.output_added(id);
        });
    }

    /// An output was disconnected or destroyed.
    ///
    /// Safe to call from within an event raised by the output being
    /// destroyed: the entity is detached from every structure before the
    /// bracket settles, and later lookups by its id return `None`.
    pub fn on_output_removed(&mut self, id: OutputId) {
        if !self.outputs.contains(id) {
            return;
        }

        self.with_layout_change(|umbra| {
            umbra.hooks.evacuate_output(id);
            umbra.remove_output_from_layout(id);
            if let Some(output) = umbra.outputs.unregister(id) {
                output.trees.destroy(&mut umbra.scene);
            }
            umbra.hooks.output_destroyed(id);
        });
    }

    /// The backend asks for a new state, for example a nested session
    /// resized by its host. Always obeyed if the proposed state validates.
    pub fn on_state_requested(
        &mut self,
        backend: &mut dyn Backend,
        id: OutputId,
        state: ProposedState,
    ) {
        if !self.outputs.contains(id) {
            return;
        }
        if let Err(err) = backend.commit(id, &state) {
            warn!("backend requested a new state that could not be applied: {err:?}");
            return;
        }

        self.with_layout_change(|umbra| {
            let Some(output) = umbra.outputs.get_mut(id) else {
                return;
            };
            let was_enabled = output.enabled;
            output.enabled = state.enabled;
            if state.enabled {
                if let Some(mode) = state.mode {
                    output.current_mode = Some(mode);
                }
                output.scale = state.scale;
                output.transform = state.transform;
            }
            let size = output.logical_size();

            if state.enabled {
                if !was_enabled {
                    umbra.add_output_to_layout(id);
                }
                umbra.layout.set_size(id, size);
            } else if was_enabled {
                umbra.hooks.evacuate_output(id);
                umbra.remove_output_from_layout(id);
            }
        });
    }
}
