//! Handle bookkeeping for the scene graph.
//!
//! The actual scene graph (node contents, damage, rendering) belongs to the
//! compositing engine. This module only tracks which per-output trees and
//! render targets exist, so that output teardown can destroy them
//! synchronously and tests can assert on stacking and lifetime.

use std::collections::HashSet;

/// Handle to a scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

/// Handle to a per-output render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneOutputId(u64);

/// Scene-graph handle table.
#[derive(Debug, Default)]
pub struct Scene {
    next_id: u64,
    /// Trees in stacking order, bottom to top.
    stacking: Vec<TreeId>,
    outputs: HashSet<SceneOutputId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree stacked above all existing trees.
    pub fn create_tree(&mut self) -> TreeId {
        self.next_id += 1;
        let id = TreeId(self.next_id);
        self.stacking.push(id);
        id
    }

    pub fn destroy_tree(&mut self, id: TreeId) {
        self.stacking.retain(|tree| *tree != id);
    }

    pub fn contains_tree(&self, id: TreeId) -> bool {
        self.stacking.contains(&id)
    }

    /// Position of a tree in the stacking order, bottom to top.
    pub fn stacking_position(&self, id: TreeId) -> Option<usize> {
        self.stacking.iter().position(|tree| *tree == id)
    }

    pub fn create_output(&mut self) -> SceneOutputId {
        self.next_id += 1;
        let id = SceneOutputId(self.next_id);
        self.outputs.insert(id);
        id
    }

    pub fn destroy_output(&mut self, id: SceneOutputId) {
        self.outputs.remove(&id);
    }

    pub fn contains_output(&self, id: SceneOutputId) -> bool {
        self.outputs.contains(&id)
    }
}

/// Scene trees owned by one output.
///
/// Stacking among them is fixed at creation (bottom to top): background,
/// bottom, views, top, overlay, layer-shell popups, session lock, OSD. It is
/// never reordered by reconfiguration.
#[derive(Debug, Clone, Copy)]
pub struct OutputTrees {
    pub background: TreeId,
    pub bottom: TreeId,
    pub views: TreeId,
    pub top: TreeId,
    pub overlay: TreeId,
    pub layer_popups: TreeId,
    pub session_lock: TreeId,
    pub osd: TreeId,
}

impl OutputTrees {
    pub fn new(scene: &mut Scene) -> Self {
        Self {
            background: scene.create_tree(),
            bottom: scene.create_tree(),
            views: scene.create_tree(),
            top: scene.create_tree(),
            overlay: scene.create_tree(),
            layer_popups: scene.create_tree(),
            session_lock: scene.create_tree(),
            osd: scene.create_tree(),
        }
    }

    pub fn destroy(&self, scene: &mut Scene) {
        for tree in self.all() {
            scene.destroy_tree(tree);
        }
    }

    pub fn all(&self) -> [TreeId; 8] {
        [
            self.background,
            self.bottom,
            self.views,
            self.top,
            self.overlay,
            self.layer_popups,
            self.session_lock,
            self.osd,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trees_stack_bottom_to_top_at_creation() {
        let mut scene = Scene::new();
        let trees = OutputTrees::new(&mut scene);

        let positions: Vec<_> = trees
            .all()
            .iter()
            .map(|tree| scene.stacking_position(*tree).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "creation order must be stacking order");
    }

    #[test]
    fn destroy_detaches_every_tree() {
        let mut scene = Scene::new();
        let trees = OutputTrees::new(&mut scene);
        let other = scene.create_tree();

        trees.destroy(&mut scene);
        for tree in trees.all() {
            assert!(!scene.contains_tree(tree));
        }
        assert!(scene.contains_tree(other));
    }
}
