//! Compositor core: output lifecycle and layout coordination.
//!
//! [`Umbra`] is the composition root. It owns the output registry, the
//! shared coordinate space and the scene handle table, and it drives a
//! [`Backend`](crate::backend::Backend) while notifying the desktop
//! collaborators through [`DesktopHooks`](crate::hooks::DesktopHooks).
//!
//! Many independent triggers mutate the topology: hotplug, protocol-driven
//! reconfiguration, power and gamma events, virtual output management. Every
//! mutation that can change global placement runs inside
//! [`Umbra::with_layout_change`]; when the outermost bracket closes, the
//! layout *settles* exactly once: usable areas are recomputed, windows are
//! re-arranged, the configuration snapshot is republished and the pointer is
//! realigned. Consumers never observe a state between nested brackets.

use umbra_ipc::LogicalOutput;

use crate::backend::OutputId;
use crate::hooks::DesktopHooks;
use crate::scene::Scene;

pub mod apply;
mod hotplug;
pub mod layout;
pub mod negotiate;
mod outputs;
pub mod power;
pub mod subsystems;
pub mod usable_area;
mod virtual_outputs;


use self::layout::LayoutSpace;
use self::subsystems::OutputSubsystem;

/// The compositor's output-coordination state.
pub struct Umbra {
    pub outputs: OutputSubsystem,
    pub layout: LayoutSpace,
    pub scene: Scene,
    pub(crate) hooks: Box<dyn DesktopHooks>,
    /// Name for the next virtual output to materialize. Single slot: a
    /// second create request before the hotplug event lands overwrites it.
    pub(crate) pending_virtual_name: Option<String>,
    /// Prefer to keep the mode a connector is already driving.
    pub reuse_output_mode: bool,
    /// Request adaptive sync on new outputs.
    pub adaptive_sync: bool,
}

impl Umbra {
    pub fn new(hooks: Box<dyn DesktopHooks>) -> Self {
        Self {
            outputs: OutputSubsystem::new(),
            layout: LayoutSpace::new(),
            scene: Scene::new(),
            hooks,
            pending_virtual_name: None,
            reuse_output_mode: false,
            adaptive_sync: false,
        }
    }

    /// Runs `f` inside a layout-change bracket.
    ///
    /// Brackets nest; settlement runs once, when the outermost bracket
    /// closes, on every exit path of `f` that returns.
    pub fn with_layout_change<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layout.begin_change();
        let result = f(self);
        if self.layout.end_change() {
            self.settle();
        }
        result
    }

    /// The consolidated re-derivation step after a batch of mutations.
    ///
    /// Safe to run with zero outputs. Collaborators that size surfaces to
    /// whole outputs (session-lock backdrops and the like) resize from the
    /// [`DesktopHooks::layout_published`] snapshot; there is no separate
    /// per-output resize signal.
    ///
    /// [`DesktopHooks::layout_published`]: crate::hooks::DesktopHooks::layout_published
    pub(crate) fn settle(&mut self) {
        let layout_changed = self.layout.take_shape_dirty();
        self.update_all_usable_areas(layout_changed);

        let snapshot = self.layout_snapshot();
        self.hooks.layout_published(&snapshot);

        self.hooks.realign_pointer();
    }

    /// The client-visible configuration of all outputs.
    pub fn layout_snapshot(&self) -> Vec<umbra_ipc::Output> {
        self.outputs
            .iter()
            .map(|output| {
                let logical = self.layout.geometry(output.id).and_then(|geo| {
                    output.is_usable().then_some(LogicalOutput {
                        x: geo.x,
                        y: geo.y,
                        width: geo.width.max(0) as u32,
                        height: geo.height.max(0) as u32,
                        scale: output.scale,
                        transform: output.transform,
                    })
                });
                umbra_ipc::Output {
                    name: output.name.clone(),
                    make: output.make.clone(),
                    model: output.model.clone(),
                    modes: output.modes.clone(),
                    current_mode: output.current_mode_index(),
                    vrr_supported: output.vrr_supported,
                    vrr_enabled: output.adaptive_sync_active,
                    logical,
                }
            })
            .collect()
    }

    /// Hands an output to an external consumer or takes it back.
    ///
    /// Leased outputs keep their entity but lose scene presence and layout
    /// placement; they cannot be enabled through reconfiguration while the
    /// lease lasts.
    pub fn set_output_leased(&mut self, id: OutputId, leased: bool) {
        let Some(output) = self.outputs.get_mut(id) else {
            return;
        };
        if output.leased == leased {
            return;
        }
        output.leased = leased;
        let enabled = output.enabled;

        self.with_layout_change(|umbra| {
            if leased {
                umbra.hooks.evacuate_output(id);
                umbra.remove_output_from_layout(id);
            } else if enabled {
                umbra.add_output_to_layout(id);
            }
        });
    }

    /// Inserts an enabled output into the layout with automatic placement,
    /// creating its render target on first insertion.
    ///
    /// Creating the render target twice is not safe, so it is created only
    /// when missing.
    pub(crate) fn add_output_to_layout(&mut self, id: OutputId) {
        let Some(output) = self.outputs.get(id) else {
            return;
        };
        let size = output.logical_size();
        let has_scene = output.scene_output.is_some();

        if self.layout.contains(id) {
            self.layout.set_size(id, size);
        } else {
            self.layout.add_auto(id, size);
        }

        if !has_scene {
            let scene_output = self.scene.create_output();
            if let Some(output) = self.outputs.get_mut(id) {
                output.scene_output = Some(scene_output);
            }
        }
    }

    /// Removes an output's render target and layout placement.
    ///
    /// Callers evacuate region and window assignments first. The render
    /// target is destroyed explicitly before the placement goes away to
    /// leave no doubt between a leak and a double-free.
    pub(crate) fn remove_output_from_layout(&mut self, id: OutputId) {
        let scene_output = self.outputs.get_mut(id).and_then(|o| o.scene_output.take());
        if let Some(scene_output) = scene_output {
            self.scene.destroy_output(scene_output);
        }
        self.layout.remove(id);
    }
}
