//! Projectile and explosion primitives driven by the shared fire schedule.

use std::{fmt::Display, time::Duration};

use contribution_canon_core::FireEvent;
use glam::Vec2;

use crate::{markup::Element, palette::Palette, seconds};

/// Extra time after arrival over which a projectile fades out.
pub const PROJECTILE_FADE: Duration = Duration::from_millis(100);

/// Length of the explosion flash.
pub const EXPLOSION_DURATION: Duration = Duration::from_millis(500);

/// Length of the spark burst.
pub const SPARK_DURATION: Duration = Duration::from_millis(300);

const PROJECTILE_RADIUS: f32 = 2.0;
const EXPLOSION_RADIUS: f32 = 8.0;
const SPARK_REACH: f32 = 5.0;

/// Projectile travelling from `muzzle` to the event's target.
///
/// The projectile is hidden until launch, holds its final position, and
/// fades out just after arrival.
#[must_use]
pub fn projectile(event: &FireEvent, muzzle: Vec2, palette: &Palette) -> Element {
    let offset = event.target - muzzle;
    let begin = seconds(event.launch_delay);

    Element::new("circle")
        .attr("class", "bullet")
        .attr("data-cell", cell_label(event))
        .attr("cx", muzzle.x)
        .attr("cy", muzzle.y)
        .attr("r", PROJECTILE_RADIUS)
        .attr("fill", palette.projectile)
        .attr("filter", "url(#glow)")
        .attr("opacity", 0)
        .child(
            Element::new("animateTransform")
                .attr("attributeName", "transform")
                .attr("type", "translate")
                .attr("values", format!("0,0; {},{}", offset.x, offset.y))
                .attr("begin", &begin)
                .attr("dur", seconds(event.flight_duration))
                .attr("fill", "freeze"),
        )
        .child(
            Element::new("animate")
                .attr("attributeName", "opacity")
                .attr("values", "1; 1; 0")
                .attr("begin", &begin)
                .attr("dur", seconds(event.flight_duration + PROJECTILE_FADE))
                .attr("fill", "freeze"),
        )
}

/// Flash and sparks at the event's target, starting at its impact time.
#[must_use]
pub fn explosion(event: &FireEvent, palette: &Palette) -> Element {
    let begin = seconds(event.impact_time());
    let center = event.target;

    let flash = Element::new("circle")
        .attr("cx", center.x)
        .attr("cy", center.y)
        .attr("r", 0)
        .attr("fill", palette.explosion)
        .attr("opacity", 0)
        .child(pulse(
            "r",
            format!("0; {EXPLOSION_RADIUS}; 0"),
            &begin,
            EXPLOSION_DURATION,
        ))
        .child(pulse("opacity", "0; 1; 0", &begin, EXPLOSION_DURATION));

    let sparks = Element::new("g")
        .attr("opacity", 0)
        .children(
            [
                Vec2::new(-SPARK_REACH, -SPARK_REACH),
                Vec2::new(SPARK_REACH, -SPARK_REACH),
                Vec2::new(-SPARK_REACH, SPARK_REACH),
                Vec2::new(SPARK_REACH, SPARK_REACH),
            ]
            .into_iter()
            .map(|direction| spark(center, center + direction, palette)),
        )
        .child(pulse("opacity", "0; 1; 0", &begin, SPARK_DURATION));

    Element::new("g")
        .attr("class", "explosion")
        .attr("data-cell", cell_label(event))
        .child(flash)
        .child(sparks)
}

fn pulse(attribute: &'static str, values: impl Display, begin: &str, length: Duration) -> Element {
    Element::new("animate")
        .attr("attributeName", attribute)
        .attr("values", values)
        .attr("begin", begin)
        .attr("dur", seconds(length))
        .attr("fill", "freeze")
}

fn spark(from: Vec2, to: Vec2, palette: &Palette) -> Element {
    Element::new("line")
        .attr("x1", from.x)
        .attr("y1", from.y)
        .attr("x2", to.x)
        .attr("y2", to.y)
        .attr("stroke", palette.explosion)
        .attr("stroke-width", 1)
}

fn cell_label(event: &FireEvent) -> String {
    format!("{}-{}", event.cell.week(), event.cell.day())
}
