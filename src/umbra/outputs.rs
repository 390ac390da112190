//! Output queries.
//!
//! Lookups over the registry and the layout. None of these raise errors:
//! "not found" is an empty result and callers handle it.

use crate::backend::OutputId;
use crate::utils::{output_matches_name, Point, Rect};

use super::subsystems::Output;
use super::Umbra;

impl Umbra {
    /// Returns the output with the given name, skipping disabled and leased
    /// outputs. The match is case-insensitive.
    pub fn output_by_name(&self, name: &str) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|output| output.is_usable() && output_matches_name(&output.name, name))
    }

    /// Returns the output whose placement contains `point`.
    pub fn output_under(&self, point: Point) -> Option<&Output> {
        let id = self.layout.output_at(point)?;
        self.outputs.get(id)
    }

    /// Returns the output whose placement is nearest to `point`.
    pub fn output_nearest_to(&self, point: Point) -> Option<&Output> {
        let id = self.layout.nearest_output(point)?;
        self.outputs.get(id)
    }

    /// Returns the output nearest to the seat's pointer.
    pub fn output_nearest_to_pointer(&self) -> Option<&Output> {
        self.output_nearest_to(self.hooks.pointer_position())
    }

    /// Whether the output exists, is enabled and is not leased.
    pub fn output_is_usable(&self, id: OutputId) -> bool {
        self.outputs.get(id).is_some_and(Output::is_usable)
    }

    /// Usable area in output-local coordinates; zero when unknown.
    pub fn usable_area(&self, id: OutputId) -> Rect {
        self.outputs
            .get(id)
            .map(|output| output.usable_area)
            .unwrap_or_default()
    }

    /// Usable area translated into layout coordinates; zero when the output
    /// has no placement.
    pub fn usable_area_in_layout_coords(&self, id: OutputId) -> Rect {
        let Some(position) = self.layout.position(id) else {
            return Rect::default();
        };
        let mut area = self.usable_area(id);
        area.x += position.0;
        area.y += position.1;
        area
    }
}
