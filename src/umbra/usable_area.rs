//! Usable-area computation.
//!
//! The usable area of an output is its full geometry minus every reserved
//! strip claimed by panel/dock-like surfaces, further shrunk by the
//! legacy-client adjustment the windowing collaborator contributes. It is
//! recomputed when the output's geometry changes, when its reserved regions
//! change, and on every layout-wide settlement.

use crate::backend::OutputId;
use crate::utils::Rect;

use super::Umbra;

/// Edge of an output a reserved region is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// A strip of the output claimed by an anchored surface, excluded from the
/// usable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusiveZone {
    pub edge: Edge,
    pub thickness: i32,
}

/// Shrinks `full` by every zone's inset. Over-reservation collapses the
/// rectangle to empty rather than inverting it.
pub fn apply_zones(full: Rect, zones: &[ExclusiveZone]) -> Rect {
    let mut area = full;
    for zone in zones {
        let inset = zone.thickness.max(0);
        match zone.edge {
            Edge::Top => {
                area.y += inset;
                area.height -= inset;
            }
            Edge::Bottom => area.height -= inset,
            Edge::Left => {
                area.x += inset;
                area.width -= inset;
            }
            Edge::Right => area.width -= inset,
        }
    }
    if area.is_empty() {
        area.width = 0;
        area.height = 0;
        area.x = area.x.clamp(full.x, full.right());
        area.y = area.y.clamp(full.y, full.bottom());
    }
    area
}

impl Umbra {
    /// Replaces the reserved regions of an output and reacts to the change.
    pub fn set_reserved_regions(&mut self, id: OutputId, zones: Vec<ExclusiveZone>) {
        let Some(output) = self.outputs.get_mut(id) else {
            return;
        };
        output.reserved = zones;
        self.output_update_usable_area(id);
    }

    /// Recomputes one output's usable area. Returns whether it changed.
    pub(crate) fn update_usable_area(&mut self, id: OutputId) -> bool {
        let Some(output) = self.outputs.get(id) else {
            return false;
        };
        let old = output.usable_area;
        let full = output.full_geometry();

        let mut area = apply_zones(full, &output.reserved);
        self.hooks.adjust_usable_area(id, &mut area);
        // Collaborator adjustments cannot grow past the full geometry.
        if !full.contains_rect(area) {
            area = full.intersection(area);
        }

        if let Some(output) = self.outputs.get_mut(id) {
            output.usable_area = area;
        }
        old != area
    }

    /// Recomputes one output's usable area and, if it changed, re-runs the
    /// dependent region geometry and window arrangement.
    pub fn output_update_usable_area(&mut self, id: OutputId) {
        if self.update_usable_area(id) {
            self.hooks.update_region_geometry(id);
            self.hooks.arrange_outputs();
        }
    }

    /// Recomputes every enabled output's usable area, then re-runs window
    /// arrangement once if anything changed or the layout shape itself did.
    pub(crate) fn update_all_usable_areas(&mut self, layout_changed: bool) {
        let mut usable_area_changed = false;

        for id in self.outputs.ids() {
            let enabled = self.outputs.get(id).is_some_and(|o| o.enabled);
            if !enabled {
                continue;
            }
            if self.update_usable_area(id) {
                usable_area_changed = true;
                self.hooks.update_region_geometry(id);
            } else if layout_changed {
                self.hooks.update_region_geometry(id);
            }
        }

        if usable_area_changed || layout_changed {
            self.hooks.arrange_outputs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_shrink_each_edge() {
        let full = Rect::from_size(1920, 1080);
        let zones = [
            ExclusiveZone {
                edge: Edge::Top,
                thickness: 30,
            },
            ExclusiveZone {
                edge: Edge::Left,
                thickness: 50,
            },
            ExclusiveZone {
                edge: Edge::Bottom,
                thickness: 20,
            },
        ];
        let area = apply_zones(full, &zones);
        assert_eq!(area, Rect::new(50, 30, 1870, 1030));
        assert!(full.contains_rect(area));
    }

    #[test]
    fn over_reservation_collapses_to_empty() {
        let full = Rect::from_size(800, 600);
        let zones = [
            ExclusiveZone {
                edge: Edge::Top,
                thickness: 400,
            },
            ExclusiveZone {
                edge: Edge::Bottom,
                thickness: 400,
            },
        ];
        let area = apply_zones(full, &zones);
        assert!(area.is_empty());
        assert!(full.contains_rect(area));
    }

    #[test]
    fn negative_thickness_is_ignored() {
        let full = Rect::from_size(800, 600);
        let zones = [ExclusiveZone {
            edge: Edge::Left,
            thickness: -10,
        }];
        assert_eq!(apply_zones(full, &zones), full);
    }
}
