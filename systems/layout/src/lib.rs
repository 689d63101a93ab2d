#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives pixel geometry from grid dimensions.

use contribution_canon_core::{ContributionGrid, GeometrySpec, LayoutConstants, DAYS_PER_WEEK};
use glam::Vec2;

/// Layout system that maps week and day counts onto canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEngine {
    constants: LayoutConstants,
}

impl LayoutEngine {
    /// Creates a layout engine using the provided constants.
    #[must_use]
    pub const fn new(constants: LayoutConstants) -> Self {
        Self { constants }
    }

    /// Computes geometry for a grid with full seven-day columns.
    #[must_use]
    pub fn layout_grid(&self, grid: &ContributionGrid) -> GeometrySpec {
        self.layout(grid.week_count(), DAYS_PER_WEEK)
    }

    /// Computes geometry for `week_count` columns of `day_count` rows.
    ///
    /// The turret sits left of the grid, vertically centred on it, and its
    /// travel ends past the last column by the configured overshoot so the
    /// visual path fully crosses the grid. A zero-week grid yields a
    /// zero-width grid area.
    #[must_use]
    pub fn layout(&self, week_count: usize, day_count: usize) -> GeometrySpec {
        let constants = &self.constants;
        let pitch = constants.cell_size + constants.gap;
        let grid_width = week_count as f32 * pitch;
        let grid_height = day_count as f32 * pitch;

        let turret_origin = Vec2::new(
            constants.turret_x,
            constants.grid_origin.y + (grid_height / 2.0).floor(),
        );
        let travel_end_x = constants.grid_origin.x + grid_width + constants.travel_overshoot;

        GeometrySpec {
            cell_size: constants.cell_size,
            gap: constants.gap,
            canvas_width: constants.canvas_width,
            canvas_height: constants.canvas_height,
            grid_origin: constants.grid_origin,
            grid_width,
            grid_height,
            turret_origin,
            travel_end_x,
            muzzle_offset: constants.muzzle_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contribution_canon_core::CellIndex;

    #[test]
    fn default_layout_matches_reference_geometry() {
        let geometry = LayoutEngine::default().layout(53, DAYS_PER_WEEK);

        assert_eq!(geometry.grid_width, 636.0);
        assert_eq!(geometry.grid_height, 84.0);
        assert_eq!(geometry.grid_origin, Vec2::new(50.0, 50.0));
        assert_eq!(geometry.turret_origin, Vec2::new(20.0, 92.0));
        assert_eq!(geometry.travel_end_x, 736.0);
        assert_eq!(geometry.muzzle(), Vec2::new(55.0, 92.0));
        assert_eq!(
            (geometry.canvas_width, geometry.canvas_height),
            (800.0, 200.0)
        );
    }

    #[test]
    fn zero_weeks_produce_zero_width_grid() {
        let geometry = LayoutEngine::default().layout(0, DAYS_PER_WEEK);

        assert_eq!(geometry.grid_width, 0.0);
        assert_eq!(geometry.travel_end_x, 100.0);
        assert!(geometry.travel_distance() > 0.0);
    }

    #[test]
    fn layout_is_reproducible() {
        let engine = LayoutEngine::default();
        assert_eq!(engine.layout(12, 7), engine.layout(12, 7));
        assert_eq!(
            engine.layout_grid(&ContributionGrid::empty()),
            engine.layout(0, 7)
        );
    }

    #[test]
    fn custom_pitch_moves_cells_and_turret() {
        let constants = LayoutConstants {
            cell_size: 14.0,
            gap: 3.0,
            ..LayoutConstants::DEFAULT
        };
        let geometry = LayoutEngine::new(constants).layout(4, 7);

        assert_eq!(geometry.grid_width, 68.0);
        assert_eq!(geometry.grid_height, 119.0);
        assert_eq!(geometry.turret_origin.y, 50.0 + 59.0);
        assert_eq!(
            geometry.cell_center(CellIndex::new(2, 1)),
            Vec2::new(50.0 + 34.0 + 7.0, 50.0 + 17.0 + 7.0)
        );
    }
}
