use std::time::Duration;

use glam::Vec2;

use crate::CellIndex;

/// Fixed layout constants feeding the geometry arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstants {
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
    /// Gap between neighbouring cells in pixels.
    pub gap: f32,
    /// Width of the document canvas in pixels.
    pub canvas_width: f32,
    /// Height of the document canvas in pixels.
    pub canvas_height: f32,
    /// Top-left corner of the grid relative to the canvas.
    pub grid_origin: Vec2,
    /// Horizontal position of the turret before it starts travelling.
    pub turret_x: f32,
    /// Distance the turret keeps travelling past the last grid column.
    pub travel_overshoot: f32,
    /// Offset from the turret origin to the muzzle that launches projectiles.
    pub muzzle_offset: Vec2,
}

impl LayoutConstants {
    /// Constants used for regular contribution documents.
    pub const DEFAULT: Self = Self {
        cell_size: 10.0,
        gap: 2.0,
        canvas_width: 800.0,
        canvas_height: 200.0,
        grid_origin: Vec2::new(50.0, 50.0),
        turret_x: 20.0,
        travel_overshoot: 50.0,
        muzzle_offset: Vec2::new(35.0, 0.0),
    };
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pixel geometry derived from the grid dimensions and layout constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySpec {
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
    /// Gap between neighbouring cells in pixels.
    pub gap: f32,
    /// Width of the document canvas in pixels.
    pub canvas_width: f32,
    /// Height of the document canvas in pixels.
    pub canvas_height: f32,
    /// Top-left corner of the first cell.
    pub grid_origin: Vec2,
    /// Total width spanned by the week columns.
    pub grid_width: f32,
    /// Total height spanned by the day rows.
    pub grid_height: f32,
    /// Anchor point of the turret body at the start of its travel.
    pub turret_origin: Vec2,
    /// Horizontal position the turret reaches at the end of its travel.
    pub travel_end_x: f32,
    /// Offset from the turret origin to its muzzle.
    pub muzzle_offset: Vec2,
}

impl GeometrySpec {
    /// Distance between the origins of two neighbouring cells.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.gap
    }

    /// Top-left corner of the cell at `index`.
    #[must_use]
    pub fn cell_origin(&self, index: CellIndex) -> Vec2 {
        let pitch = self.pitch();
        self.grid_origin + Vec2::new(index.week() as f32 * pitch, index.day() as f32 * pitch)
    }

    /// Centre point of the cell at `index`.
    #[must_use]
    pub fn cell_center(&self, index: CellIndex) -> Vec2 {
        self.cell_origin(index) + Vec2::splat(self.cell_size / 2.0)
    }

    /// Point projectiles are launched from.
    #[must_use]
    pub fn muzzle(&self) -> Vec2 {
        self.turret_origin + self.muzzle_offset
    }

    /// Horizontal distance the turret covers during one travel loop.
    #[must_use]
    pub fn travel_distance(&self) -> f32 {
        self.travel_end_x - self.turret_origin.x
    }
}

/// Scheduled launch and impact of one projectile aimed at a non-empty cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireEvent {
    /// Grid cell the projectile is aimed at.
    pub cell: CellIndex,
    /// Centre of the target cell in canvas pixels.
    pub target: Vec2,
    /// Time after document start at which the projectile leaves the muzzle.
    pub launch_delay: Duration,
    /// Time the projectile spends travelling to its target.
    pub flight_duration: Duration,
}

impl FireEvent {
    /// Time after document start at which the projectile reaches its target.
    #[must_use]
    pub fn impact_time(&self) -> Duration {
        self.launch_delay + self.flight_duration
    }
}
