#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Contribution Canon pipeline.
//!
//! This crate defines the value objects that flow between the pure systems
//! and the adapters. A contribution source produces a flat run of
//! [`ActivityDay`] values, the [`GridNormalizer`] batches them into a
//! [`ContributionGrid`], the layout system derives a [`GeometrySpec`], the
//! trajectory system turns grid and geometry into ordered [`FireEvent`]
//! values, and the rendering adapter serialises all of it into a
//! self-animating vector document. Every value here is created fresh per
//! generation request and is immutable once handed to the next stage.

mod activity;
mod geometry;
mod grid;
mod options;

pub use activity::{ActivityDay, ActivityRecord, Level, Summary};
pub use geometry::{FireEvent, GeometrySpec, LayoutConstants};
pub use grid::{CellIndex, ContributionGrid, GridNormalizer, GridShapeError, DAYS_PER_WEEK};
pub use options::{HexColor, NamedPreset, RenderOptions, SpeedPreset, Theme, TurretVariant};

/// Product name interpolated into generated documents and CLI output.
pub const PRODUCT_NAME: &str = "Contribution Canon";
