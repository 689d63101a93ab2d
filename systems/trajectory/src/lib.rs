#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that schedules one projectile per non-empty grid cell.
//!
//! Projectiles leave the turret muzzle on a fixed cadence in (week, day)
//! order. The cadence only advances when a projectile is emitted, so empty
//! cells never introduce pauses. Flight time is straight-line distance over
//! a constant velocity, scaled by the speed preset.

use std::time::Duration;

use contribution_canon_core::{ContributionGrid, FireEvent, GeometrySpec, SpeedPreset};
use glam::Vec2;
use tracing::debug;

/// Projectile velocity in pixels per second before speed scaling.
pub const VELOCITY: f64 = 100.0;

/// Delay inserted between two consecutive launches.
pub const STAGGER_STEP: Duration = Duration::from_millis(200);

/// Trajectory system that turns a grid and its geometry into fire events.
#[derive(Debug, Default)]
pub struct TrajectoryScheduler;

impl TrajectoryScheduler {
    /// Creates a new trajectory scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the firing schedule for `grid`.
    #[must_use]
    pub fn schedule(
        &self,
        grid: &ContributionGrid,
        geometry: &GeometrySpec,
        speed: SpeedPreset,
    ) -> Vec<FireEvent> {
        let mut out = Vec::new();
        self.handle(grid, geometry, speed, &mut out);
        out
    }

    /// Computes the firing schedule for `grid` into `out`.
    ///
    /// The output buffer is cleared before populating it. Events appear in
    /// (week, day) order with strictly increasing launch delays.
    pub fn handle(
        &self,
        grid: &ContributionGrid,
        geometry: &GeometrySpec,
        speed: SpeedPreset,
        out: &mut Vec<FireEvent>,
    ) {
        out.clear();

        let muzzle = geometry.muzzle();
        let mut launch_delay = Duration::ZERO;

        for (cell, day) in grid.cells() {
            if !day.is_active() {
                continue;
            }

            let target = geometry.cell_center(cell);
            out.push(FireEvent {
                cell,
                target,
                launch_delay,
                flight_duration: flight_duration(muzzle, target, speed),
            });
            launch_delay += STAGGER_STEP;
        }

        debug!(
            projectiles = out.len(),
            speed = speed.factor(),
            last_impact_secs = out.last().map(|event| event.impact_time().as_secs_f64()),
            "scheduled projectile volley"
        );
    }
}

/// Time a projectile needs to travel from `from` to `to` at the given speed.
#[must_use]
pub fn flight_duration(from: Vec2, to: Vec2, speed: SpeedPreset) -> Duration {
    let distance = f64::from(from.distance(to));
    let seconds = distance / VELOCITY * speed.factor();
    Duration::try_from_secs_f64(seconds).unwrap_or_default()
}
