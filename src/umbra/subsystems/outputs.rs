//! Output registry subsystem.
//!
//! Owns every [`Output`] entity for its whole lifetime. The backend only
//! ever refers to outputs by [`OutputId`]; since ids are never reused, a
//! lookup for a destroyed output is a plain `None` rather than a dangling
//! reference.

use std::collections::HashMap;

use umbra_ipc::{Mode, Transform};

use crate::backend::{ConnectorInfo, OutputId, ProposedState};
use crate::scene::{OutputTrees, SceneOutputId};
use crate::umbra::usable_area::ExclusiveZone;
use crate::utils::{logical_size, Rect};

/// One display sink, physical or virtual.
#[derive(Debug)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    pub make: String,
    pub model: String,
    pub is_virtual: bool,
    /// Supported modes in backend-reported order.
    pub modes: Vec<Mode>,
    /// Current mode; `None` while the output is unconfigured.
    pub current_mode: Option<Mode>,
    pub enabled: bool,
    /// Output handed to an external consumer; unavailable for compositing.
    pub leased: bool,
    pub scale: f64,
    pub transform: Transform,
    pub vrr_supported: bool,
    /// Whether adaptive sync was requested for this output.
    pub adaptive_sync_requested: bool,
    /// Whether adaptive sync actually passed a trial and is in effect.
    pub adaptive_sync_active: bool,
    /// Power state; powered-off outputs keep their layout placement.
    pub power_on: bool,
    /// A gamma-table change is waiting for the next frame.
    pub gamma_dirty: bool,
    /// Usable area in output-local logical pixels.
    pub usable_area: Rect,
    /// Reserved regions claimed by panel/dock surfaces.
    pub reserved: Vec<ExclusiveZone>,
    /// Scene trees owned by this output, fixed stacking.
    pub trees: OutputTrees,
    /// Render target; present exactly while the output is in the layout.
    pub scene_output: Option<SceneOutputId>,
}

impl Output {
    pub fn new(id: OutputId, connector: &ConnectorInfo, trees: OutputTrees) -> Self {
        Self {
            id,
            name: connector.name.clone(),
            make: connector.make.clone(),
            model: connector.model.clone(),
            is_virtual: connector.is_virtual,
            modes: connector.modes.clone(),
            current_mode: None,
            enabled: false,
            leased: false,
            scale: 1.,
            transform: Transform::Normal,
            vrr_supported: connector.vrr_supported,
            adaptive_sync_requested: false,
            adaptive_sync_active: false,
            power_on: true,
            gamma_dirty: false,
            usable_area: Rect::default(),
            reserved: Vec::new(),
            trees,
            scene_output: None,
        }
    }

    /// Whether the output participates in normal compositing.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.leased
    }

    /// Effective resolution: the current mode transformed and scaled.
    pub fn logical_size(&self) -> (i32, i32) {
        match self.current_mode {
            Some(mode) => logical_size((mode.width, mode.height), self.transform, self.scale),
            None => (0, 0),
        }
    }

    /// Full geometry in output-local logical pixels.
    pub fn full_geometry(&self) -> Rect {
        let (w, h) = self.logical_size();
        Rect::from_size(w, h)
    }

    /// The output's current state as a commit proposal.
    pub fn proposed_state(&self) -> ProposedState {
        ProposedState {
            enabled: self.enabled && self.power_on,
            mode: self.current_mode,
            scale: self.scale,
            transform: self.transform,
            adaptive_sync: self.adaptive_sync_active,
        }
    }

    pub fn current_mode_index(&self) -> Option<usize> {
        let current = self.current_mode?;
        self.modes.iter().position(|mode| *mode == current)
    }
}

/// Registry of output entities in insertion order.
#[derive(Debug, Default)]
pub struct OutputSubsystem {
    outputs: HashMap<OutputId, Output>,
    order: Vec<OutputId>,
}

impl OutputSubsystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, output: Output) {
        let id = output.id;
        debug_assert!(!self.outputs.contains_key(&id), "output registered twice");
        self.outputs.insert(id, output);
        self.order.push(id);
    }

    pub fn unregister(&mut self, id: OutputId) -> Option<Output> {
        self.order.retain(|o| *o != id);
        self.outputs.remove(&id)
    }

    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(&id)
    }

    pub fn get_mut(&mut self, id: OutputId) -> Option<&mut Output> {
        self.outputs.get_mut(&id)
    }

    pub fn contains(&self, id: OutputId) -> bool {
        self.outputs.contains_key(&id)
    }

    /// Outputs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.order.iter().filter_map(|id| self.outputs.get(id))
    }

    pub fn ids(&self) -> Vec<OutputId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
