#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Self-contained animated vector documents for Contribution Canon.
//!
//! [`DocumentRenderer`] binds a grid, its geometry and the shared fire
//! schedule into a typed [`Element`] tree and serialises it last. Projectiles
//! and explosions are both driven by the same [`FireEvent`]s, so every
//! explosion starts exactly when its projectile arrives.

mod effects;
mod markup;
mod palette;
mod turret;

use std::time::Duration;

use contribution_canon_core::{
    CellIndex, ContributionGrid, FireEvent, GeometrySpec, RenderOptions, Summary, PRODUCT_NAME,
};
use thiserror::Error;
use tracing::debug;

pub use effects::{explosion, projectile, EXPLOSION_DURATION, PROJECTILE_FADE, SPARK_DURATION};
pub use markup::{Element, Node};
pub use palette::Palette;
pub use turret::{turret, ACCENT_CLASS, BODY_CLASS, TRAVEL_PERIOD};

/// Width of the error document.
pub const ERROR_DOCUMENT_WIDTH: u32 = 480;

/// Height of the error document.
pub const ERROR_DOCUMENT_HEIGHT: u32 = 120;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const CELL_CORNER_RADIUS: f32 = 2.0;

/// Structural inconsistencies that make a document impossible to draw.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The summary was not derived from the grid it accompanies.
    #[error("summary reports {summary_total} contributions but the grid holds {grid_total}")]
    SummaryMismatch {
        /// Total carried by the summary.
        summary_total: u64,
        /// Total computed from the grid.
        grid_total: u64,
    },
    /// A fire event targets a cell the grid does not contain.
    #[error("fire event targets missing cell (week {week}, day {day})")]
    TargetOutsideGrid {
        /// Week column of the target.
        week: usize,
        /// Day row of the target.
        day: usize,
    },
}

/// Renderer producing the animated contribution document.
#[derive(Debug, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Creates a new document renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders the document to text.
    pub fn render(
        &self,
        grid: &ContributionGrid,
        summary: &Summary,
        geometry: &GeometrySpec,
        schedule: &[FireEvent],
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        self.build(grid, summary, geometry, schedule, options)
            .map(|document| document.to_markup())
    }

    /// Builds the document tree without serialising it.
    ///
    /// Fails only when the inputs contradict each other; user customisation
    /// has already been resolved to valid values in `options`.
    pub fn build(
        &self,
        grid: &ContributionGrid,
        summary: &Summary,
        geometry: &GeometrySpec,
        schedule: &[FireEvent],
        options: &RenderOptions,
    ) -> Result<Element, RenderError> {
        validate(grid, summary, schedule)?;

        let palette = Palette::for_theme(options.theme);
        let muzzle = geometry.muzzle();

        let mut document = Element::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .attr("width", geometry.canvas_width)
            .attr("height", geometry.canvas_height)
            .attr(
                "viewBox",
                format!("0 0 {} {}", geometry.canvas_width, geometry.canvas_height),
            )
            .child(defs(&palette))
            .child(
                Element::new("rect")
                    .attr("width", "100%")
                    .attr("height", "100%")
                    .attr("fill", palette.background),
            )
            .child(header(summary))
            .child(grid_group(grid, geometry, &palette))
            .child(turret(options.turret, geometry, &palette))
            .child(
                Element::new("g")
                    .attr("id", "projectiles")
                    .children(
                        schedule
                            .iter()
                            .map(|event| projectile(event, muzzle, &palette)),
                    ),
            )
            .child(
                Element::new("g")
                    .attr("id", "explosions")
                    .children(schedule.iter().map(|event| explosion(event, &palette))),
            );

        if let Some(color) = options.color_override {
            document.visit_mut(&mut |element| {
                if element.has_class(BODY_CLASS) {
                    element.set_attr("fill", color);
                }
            });
        }

        debug!(
            cells = grid.day_count(),
            projectiles = schedule.len(),
            theme = ?options.theme,
            turret = ?options.turret,
            "built contribution document"
        );

        Ok(document)
    }
}

/// Small fixed-size document reporting `message` in place of the animation.
#[must_use]
pub fn render_error_document(message: &str) -> String {
    let line = |y: u32, size: u32, color: &str, text: String| {
        Element::new("text")
            .attr("x", 20)
            .attr("y", y)
            .attr("font-family", "Arial, sans-serif")
            .attr("font-size", size)
            .attr("fill", color)
            .text(text)
    };

    Element::new("svg")
        .attr("xmlns", SVG_NAMESPACE)
        .attr("width", ERROR_DOCUMENT_WIDTH)
        .attr("height", ERROR_DOCUMENT_HEIGHT)
        .attr(
            "viewBox",
            format!("0 0 {ERROR_DOCUMENT_WIDTH} {ERROR_DOCUMENT_HEIGHT}"),
        )
        .child(
            Element::new("rect")
                .attr("width", "100%")
                .attr("height", "100%")
                .attr("fill", "#f8f8f8"),
        )
        .child(line(40, 16, "#d73a49", format!("Error: {message}")))
        .child(line(
            70,
            12,
            "#586069",
            "Please check the username and try again.".to_owned(),
        ))
        .child(line(
            90,
            12,
            "#586069",
            "Make sure the GitHub profile is public.".to_owned(),
        ))
        .to_markup()
}

/// Formats `duration` as an exact decimal number of seconds.
fn seconds(duration: Duration) -> String {
    let whole = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        return format!("{whole}s");
    }
    let fraction = format!("{nanos:09}");
    format!("{whole}.{}s", fraction.trim_end_matches('0'))
}

fn validate(
    grid: &ContributionGrid,
    summary: &Summary,
    schedule: &[FireEvent],
) -> Result<(), RenderError> {
    if !summary.matches(grid) {
        return Err(RenderError::SummaryMismatch {
            summary_total: summary.total(),
            grid_total: grid.total(),
        });
    }

    match schedule.iter().find(|event| grid.get(event.cell).is_none()) {
        Some(event) => Err(RenderError::TargetOutsideGrid {
            week: event.cell.week(),
            day: event.cell.day(),
        }),
        None => Ok(()),
    }
}

fn defs(palette: &Palette) -> Element {
    let text = palette.text;
    let style = format!(
        ".title {{ font-family: Arial, sans-serif; font-size: 14px; font-weight: bold; fill: {text}; }} \
         .subtitle {{ font-family: Arial, sans-serif; font-size: 12px; fill: {text}; opacity: 0.8; }} \
         .contribution-cell {{ stroke: none; }} \
         .explosion {{ opacity: 0.8; }}"
    );

    Element::new("defs")
        .child(Element::new("style").attr("type", "text/css").text(style))
        .child(
            Element::new("filter")
                .attr("id", "glow")
                .child(
                    Element::new("feGaussianBlur")
                        .attr("stdDeviation", 3)
                        .attr("result", "coloredBlur"),
                )
                .child(
                    Element::new("feMerge")
                        .child(Element::new("feMergeNode").attr("in", "coloredBlur"))
                        .child(Element::new("feMergeNode").attr("in", "SourceGraphic")),
                ),
        )
}

fn header(summary: &Summary) -> Element {
    Element::new("g")
        .attr("id", "header")
        .child(
            Element::new("text")
                .attr("class", "title")
                .attr("x", 10)
                .attr("y", 25)
                .text(format!("{}'s {PRODUCT_NAME}", summary.username())),
        )
        .child(
            Element::new("text")
                .attr("class", "subtitle")
                .attr("x", 10)
                .attr("y", 40)
                .text(format!("{} contributions destroyed!", summary.total())),
        )
}

fn grid_group(grid: &ContributionGrid, geometry: &GeometrySpec, palette: &Palette) -> Element {
    let backdrop = Element::new("rect")
        .attr("class", "grid-backdrop")
        .attr("x", geometry.grid_origin.x - geometry.gap)
        .attr("y", geometry.grid_origin.y - geometry.gap)
        .attr("width", geometry.grid_width + geometry.gap)
        .attr("height", geometry.grid_height + geometry.gap)
        .attr("rx", 3)
        .attr("fill", palette.grid_background)
        .attr("opacity", 0.5);

    Element::new("g")
        .attr("id", "grid")
        .child(backdrop)
        .children(grid.cells().map(|(index, day)| {
            let origin = geometry.cell_origin(index);
            let tooltip = format!("{}: {} contributions", day.date(), day.count());
            Element::new("rect")
                .attr("id", cell_id(index))
                .attr("class", "contribution-cell")
                .attr("x", origin.x)
                .attr("y", origin.y)
                .attr("width", geometry.cell_size)
                .attr("height", geometry.cell_size)
                .attr("rx", CELL_CORNER_RADIUS)
                .attr("fill", palette.level_color(day.level()))
                .attr("data-date", day.date())
                .attr("data-count", day.count())
                .attr("data-level", day.level().get())
                .child(Element::new("title").text(tooltip))
        }))
}

fn cell_id(index: CellIndex) -> String {
    format!("cell-{}-{}", index.week(), index.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contribution_canon_core::{ActivityDay, HexColor, LayoutConstants, Theme};
    use glam::Vec2;

    fn grid() -> ContributionGrid {
        let start = NaiveDate::from_ymd_opt(2024, 6, 2).expect("valid date");
        let days = start
            .iter_days()
            .take(14)
            .enumerate()
            .map(|(offset, date)| ActivityDay::new(date, if offset == 10 { 5 } else { 0 }));
        ContributionGrid::from_days(days)
    }

    fn geometry(weeks: usize) -> GeometrySpec {
        let constants = LayoutConstants::DEFAULT;
        let pitch = constants.cell_size + constants.gap;
        GeometrySpec {
            cell_size: constants.cell_size,
            gap: constants.gap,
            canvas_width: constants.canvas_width,
            canvas_height: constants.canvas_height,
            grid_origin: constants.grid_origin,
            grid_width: weeks as f32 * pitch,
            grid_height: 7.0 * pitch,
            turret_origin: Vec2::new(20.0, 92.0),
            travel_end_x: constants.grid_origin.x + weeks as f32 * pitch + 50.0,
            muzzle_offset: constants.muzzle_offset,
        }
    }

    fn event() -> FireEvent {
        FireEvent {
            cell: CellIndex::new(1, 3),
            target: Vec2::new(67.0, 91.0),
            launch_delay: Duration::ZERO,
            flight_duration: Duration::from_nanos(843_036_185),
        }
    }

    #[test]
    fn seconds_are_exact_decimals() {
        assert_eq!(seconds(Duration::ZERO), "0s");
        assert_eq!(seconds(Duration::from_secs(30)), "30s");
        assert_eq!(seconds(Duration::from_millis(200)), "0.2s");
        assert_eq!(seconds(Duration::from_nanos(1_000_000_001)), "1.000000001s");
    }

    #[test]
    fn cells_carry_inspectable_metadata() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &grid);
        let options = RenderOptions::default();
        let document = DocumentRenderer::new()
            .build(&grid, &summary, &geometry(2), &[event()], &options)
            .expect("consistent inputs");

        let cell = document.find_by_id("cell-1-3").expect("cell rendered");
        assert_eq!(cell.get_attr("data-count"), Some("5"));
        assert_eq!(cell.get_attr("data-level"), Some("2"));
        assert_eq!(cell.get_attr("data-date"), Some("2024-06-12"));
        assert_eq!(cell.get_attr("x"), Some("62"));
        assert_eq!(cell.get_attr("y"), Some("86"));
        let tooltip = cell.child_elements().next().expect("tooltip present");
        assert_eq!(tooltip.text_content(), "2024-06-12: 5 contributions");
        assert_eq!(
            cell.get_attr("fill"),
            Some(Palette::default().levels[2].to_string().as_str())
        );
    }

    #[test]
    fn header_interpolates_summary() {
        let grid = grid();
        let summary = Summary::from_grid("<octo&cat>", &grid);
        let options = RenderOptions::default();
        let markup = DocumentRenderer::new()
            .render(&grid, &summary, &geometry(2), &[event()], &options)
            .expect("consistent inputs");

        assert!(markup.contains("&lt;octo&amp;cat&gt;'s Contribution Canon"));
        assert!(markup.contains("5 contributions destroyed!"));
        assert!(!markup.contains("<octo&cat>"));
    }

    #[test]
    fn explosion_starts_when_projectile_arrives() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &grid);
        let event = event();
        let options = RenderOptions::default();
        let document = DocumentRenderer::new()
            .build(&grid, &summary, &geometry(2), &[event], &options)
            .expect("consistent inputs");

        let explosions = document.find_by_id("explosions").expect("explosions group");
        let begins: Vec<&str> = explosions
            .descendants()
            .into_iter()
            .filter_map(|element| element.get_attr("begin"))
            .collect();
        assert_eq!(begins, vec!["0.843036185s"; 3]);
        assert_eq!(seconds(event.impact_time()), "0.843036185s");
    }

    #[test]
    fn theme_selects_palette() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &grid);
        let options = RenderOptions {
            theme: Theme::Retro,
            ..RenderOptions::default()
        };
        let markup = DocumentRenderer::new()
            .render(&grid, &summary, &geometry(2), &[event()], &options)
            .expect("consistent inputs");

        assert!(markup.contains(r##"fill="#2e2e2e""##));
        assert!(markup.contains(r##"fill="#d2691e""##));
        assert!(!markup.contains("#ffffff"));
    }

    #[test]
    fn override_recolours_only_turret_body() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &grid);
        let options = RenderOptions {
            color_override: HexColor::parse("00ff00"),
            ..RenderOptions::default()
        };
        let document = DocumentRenderer::new()
            .build(&grid, &summary, &geometry(2), &[event()], &options)
            .expect("consistent inputs");

        let recoloured: Vec<&Element> = document
            .descendants()
            .into_iter()
            .filter(|element| element.get_attr("fill") == Some("#00ff00"))
            .collect();
        assert_eq!(recoloured.len(), 4);
        assert!(recoloured
            .iter()
            .all(|element| element.has_class(BODY_CLASS)));
    }

    #[test]
    fn inconsistent_summary_is_rejected() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &ContributionGrid::empty());
        let options = RenderOptions::default();
        let error = DocumentRenderer::new()
            .render(&grid, &summary, &geometry(2), &[], &options)
            .expect_err("summary does not describe grid");

        assert_eq!(
            error,
            RenderError::SummaryMismatch {
                summary_total: 0,
                grid_total: 5,
            }
        );
    }

    #[test]
    fn schedule_outside_grid_is_rejected() {
        let grid = grid();
        let summary = Summary::from_grid("octocat", &grid);
        let stray = FireEvent {
            cell: CellIndex::new(9, 0),
            ..event()
        };
        let options = RenderOptions::default();
        let error = DocumentRenderer::new()
            .render(&grid, &summary, &geometry(2), &[stray], &options)
            .expect_err("target missing from grid");

        assert_eq!(error, RenderError::TargetOutsideGrid { week: 9, day: 0 });
    }

    #[test]
    fn error_document_is_small_and_escaped() {
        let markup = render_error_document("user <nobody> & friends");

        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"width="480" height="120""#));
        assert!(markup.contains("Error: user &lt;nobody&gt; &amp; friends"));
        assert!(markup.contains("Please check the username and try again."));
        assert!(markup.contains("Make sure the GitHub profile is public."));
    }
}
