//! Applying client reconfiguration batches.
//!
//! A [`PendingConfiguration`] is the transient batch of per-output states a
//! configuration client submitted. The whole batch is applied inside a
//! single layout-change bracket so that every per-output commit settles
//! together; within the batch, each head is isolated: one failing commit is
//! logged and the remaining heads still apply.

use tracing::warn;
use umbra_ipc::{Mode, Transform};

use crate::backend::{Backend, OutputId, ProposedState};

use super::Umbra;

/// Mode requested by resolution and refresh rather than picked from the
/// advertised list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomMode {
    pub width: u16,
    pub height: u16,
    /// Millihertz; zero lets the backend pick.
    pub refresh: u32,
}

/// Desired state for one output.
#[derive(Debug, Clone)]
pub struct HeadState {
    pub output: OutputId,
    pub enabled: bool,
    /// A mode from the output's advertised list.
    pub mode: Option<Mode>,
    /// Used when `mode` is `None`.
    pub custom_mode: Option<CustomMode>,
    pub scale: f64,
    pub transform: Transform,
    pub adaptive_sync: bool,
    /// Desired position in the layout.
    pub x: i32,
    pub y: i32,
}

/// Transient batch of desired per-output states.
#[derive(Debug, Clone, Default)]
pub struct PendingConfiguration {
    pub heads: Vec<HeadState>,
}

impl HeadState {
    fn requested_mode(&self) -> Option<Mode> {
        self.mode.or(self.custom_mode.map(|custom| Mode {
            width: custom.width,
            height: custom.height,
            refresh_rate: custom.refresh,
            is_preferred: false,
        }))
    }
}

impl Umbra {
    /// Verifies and applies a reconfiguration batch.
    ///
    /// Returns whether the batch was accepted. Per-head commit failures do
    /// not reject the batch; only verification does.
    pub fn handle_output_config(
        &mut self,
        backend: &mut dyn Backend,
        config: PendingConfiguration,
    ) -> bool {
        if !self.verify_output_config(&config) {
            warn!("rejecting invalid output configuration");
            return false;
        }
        self.apply_output_config(backend, &config);
        true
    }

    /// Every head must name a live output and carry a usable scale.
    ///
    /// Scale feeds logical-size division, so zero, negative, or non-finite
    /// values would corrupt every placement computed from it.
    fn verify_output_config(&self, config: &PendingConfiguration) -> bool {
        config.heads.iter().all(|head| {
            self.outputs.contains(head.output) && head.scale.is_finite() && head.scale > 0.
        })
    }

    /// Applies each head independently under one layout-change bracket.
    pub fn apply_output_config(&mut self, backend: &mut dyn Backend, config: &PendingConfiguration) {
        self.with_layout_change(|umbra| {
            for head in &config.heads {
                umbra.apply_head(backend, head);
            }
        });
    }

    fn apply_head(&mut self, backend: &mut dyn Backend, head: &HeadState) {
        let Some(output) = self.outputs.get(head.output) else {
            return;
        };

        // Leased outputs can never be enabled through this path.
        let enabling = head.enabled && !output.leased;
        let need_to_add = enabling && !output.enabled;
        let need_to_remove = !enabling && output.enabled;

        let mut state = ProposedState {
            enabled: enabling,
            mode: output.current_mode,
            scale: output.scale,
            transform: output.transform,
            adaptive_sync: output.adaptive_sync_active,
        };
        if enabling {
            if let Some(mode) = head.requested_mode() {
                state.mode = Some(mode);
            }
            state.scale = head.scale;
            state.transform = head.transform;
            state.adaptive_sync = head.adaptive_sync;
        }

        if let Err(err) = backend.commit(head.output, &state) {
            // A single bad output must not abort the batch.
            warn!(
                "output config commit failed for {}: {err:?}",
                output.name
            );
            return;
        }

        // Layout-specific actions only after the commit went through.
        if let Some(output) = self.outputs.get_mut(head.output) {
            output.enabled = enabling;
            if enabling {
                output.current_mode = state.mode;
                output.scale = head.scale;
                output.transform = head.transform;
                output.adaptive_sync_requested = head.adaptive_sync;
                output.adaptive_sync_active = state.adaptive_sync;
                output.power_on = true;
            }
        }

        if need_to_add {
            self.add_output_to_layout(head.output);
        }

        if enabling {
            let size = self
                .outputs
                .get(head.output)
                .map_or((0, 0), |o| o.logical_size());
            self.layout.set_size(head.output, size);
            // An explicit position overrides the automatic layout.
            if self.layout.position(head.output) != Some((head.x, head.y)) {
                self.layout.move_explicit(head.output, head.x, head.y);
            }
        }

        if need_to_remove {
            self.hooks.evacuate_output(head.output);
            self.remove_output_from_layout(head.output);
        }
    }
}
