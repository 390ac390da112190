//! Shared coordinate space for enabled outputs.
//!
//! Placement is either automatic (packed left to right in insertion order)
//! or explicit (caller-specified coordinates). Explicit placement overrides
//! automatic placement until the output is removed from the layout.
//!
//! The layout also carries the "change in progress" nesting counter: every
//! mutation that can change global placement runs inside a
//! `begin_change`/`end_change` bracket, and only the outermost `end_change`
//! reports that the layout should settle. This lets one mutation trigger
//! another (enabling an output while applying a whole-layout configuration)
//! without consumers observing intermediate states.

use crate::backend::OutputId;
use crate::utils::{Point, Rect};

#[derive(Debug, Clone, Copy)]
struct Placement {
    output: OutputId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    explicit: bool,
}

impl Placement {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Aggregate placement of all enabled outputs.
#[derive(Debug, Default)]
pub struct LayoutSpace {
    placements: Vec<Placement>,
    /// Nesting depth of in-progress layout changes.
    pending_changes: u32,
    /// A placement was added, removed, moved or resized since the last
    /// settlement.
    shape_dirty: bool,
}

impl LayoutSpace {
    pub fn new() -> Self {
        Self::default()
    }

    // === Change bracket ===

    pub fn begin_change(&mut self) {
        self.pending_changes += 1;
    }

    /// Closes one bracket. Returns `true` when this was the outermost
    /// bracket and the layout should settle now.
    pub fn end_change(&mut self) -> bool {
        debug_assert!(self.pending_changes > 0, "unbalanced end_change");
        self.pending_changes = self.pending_changes.saturating_sub(1);
        self.pending_changes == 0
    }

    pub fn change_in_progress(&self) -> bool {
        self.pending_changes > 0
    }

    /// Returns and clears whether the layout shape changed.
    pub fn take_shape_dirty(&mut self) -> bool {
        std::mem::take(&mut self.shape_dirty)
    }

    // === Placement ===

    /// Inserts an output with automatic placement: packed to the right of
    /// all existing placements.
    pub fn add_auto(&mut self, output: OutputId, size: (i32, i32)) {
        debug_assert!(!self.contains(output), "output already in layout");
        let x = self
            .placements
            .iter()
            .map(|p| p.rect().right())
            .max()
            .unwrap_or(0);
        self.placements.push(Placement {
            output,
            x,
            y: 0,
            width: size.0,
            height: size.1,
            explicit: false,
        });
        self.shape_dirty = true;
    }

    /// Sets explicit placement, inserting the output if necessary.
    ///
    /// Idempotent: issuing the same coordinates again changes nothing and
    /// returns `false`.
    pub fn move_explicit(&mut self, output: OutputId, x: i32, y: i32) -> bool {
        if let Some(p) = self.placements.iter_mut().find(|p| p.output == output) {
            let moved = p.x != x || p.y != y;
            p.x = x;
            p.y = y;
            p.explicit = true;
            self.shape_dirty |= moved;
            return moved;
        }
        self.placements.push(Placement {
            output,
            x,
            y,
            width: 0,
            height: 0,
            explicit: true,
        });
        self.shape_dirty = true;
        true
    }

    pub fn remove(&mut self, output: OutputId) -> bool {
        let len = self.placements.len();
        self.placements.retain(|p| p.output != output);
        let removed = self.placements.len() != len;
        self.shape_dirty |= removed;
        removed
    }

    pub fn set_size(&mut self, output: OutputId, size: (i32, i32)) {
        if let Some(p) = self.placements.iter_mut().find(|p| p.output == output) {
            if (p.width, p.height) != size {
                p.width = size.0;
                p.height = size.1;
                self.shape_dirty = true;
            }
        }
    }

    // === Queries ===

    pub fn contains(&self, output: OutputId) -> bool {
        self.placements.iter().any(|p| p.output == output)
    }

    pub fn position(&self, output: OutputId) -> Option<(i32, i32)> {
        self.placements
            .iter()
            .find(|p| p.output == output)
            .map(|p| (p.x, p.y))
    }

    pub fn geometry(&self, output: OutputId) -> Option<Rect> {
        self.placements
            .iter()
            .find(|p| p.output == output)
            .map(|p| p.rect())
    }

    /// The output whose placement contains `point`.
    pub fn output_at(&self, point: Point) -> Option<OutputId> {
        self.placements
            .iter()
            .find(|p| p.rect().contains(point))
            .map(|p| p.output)
    }

    /// The output whose placement is nearest to `point`, by nearest-edge
    /// distance. Ties go to the earlier insertion.
    pub fn nearest_output(&self, point: Point) -> Option<OutputId> {
        self.placements
            .iter()
            .min_by(|a, b| {
                a.rect()
                    .distance_sq(point)
                    .total_cmp(&b.rect().distance_sq(point))
            })
            .map(|p| p.output)
    }

    pub fn outputs(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.placements.iter().map(|p| p.output)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
