//! Static turret shapes and their shared travel animation.

use std::time::Duration;

use contribution_canon_core::{GeometrySpec, NamedPreset, TurretVariant};

use crate::{markup::Element, palette::Palette, seconds};

/// Time the turret takes to cross the canvas once.
pub const TRAVEL_PERIOD: Duration = Duration::from_secs(30);

/// Class carried by every primitive the colour override may restyle.
pub const BODY_CLASS: &str = "canon-body";

/// Class carried by decorative primitives the colour override leaves alone.
pub const ACCENT_CLASS: &str = "canon-accent";

/// Builds the turret group for `variant`.
///
/// Every variant shares one looping translation from the turret origin to
/// the end of its travel; only the static shapes differ.
#[must_use]
pub fn turret(variant: TurretVariant, geometry: &GeometrySpec, palette: &Palette) -> Element {
    let x = geometry.turret_origin.x;
    let y = geometry.turret_origin.y;

    let parts = match variant {
        TurretVariant::Classic => classic(x, y, palette),
        TurretVariant::Tank => tank(x, y, palette),
        TurretVariant::Spaceship => spaceship(x, y, palette),
    };

    Element::new("g")
        .attr("id", "turret")
        .attr("data-variant", variant.name())
        .children(parts)
        .child(travel(geometry.travel_distance()))
}

fn travel(distance: f32) -> Element {
    Element::new("animateTransform")
        .attr("attributeName", "transform")
        .attr("type", "translate")
        .attr("values", format!("0,0; {distance},0"))
        .attr("dur", seconds(TRAVEL_PERIOD))
        .attr("repeatCount", "indefinite")
}

fn body(name: &'static str, palette: &Palette) -> Element {
    Element::new(name)
        .attr("class", BODY_CLASS)
        .attr("fill", palette.turret)
}

fn rect(x: f32, y: f32, width: f32, height: f32, palette: &Palette) -> Element {
    body("rect", palette)
        .attr("x", x)
        .attr("y", y)
        .attr("width", width)
        .attr("height", height)
}

fn circle(cx: f32, cy: f32, r: f32, palette: &Palette) -> Element {
    body("circle", palette)
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
}

fn classic(x: f32, y: f32, palette: &Palette) -> Vec<Element> {
    vec![
        circle(x + 5.0, y + 10.0, 3.0, palette),
        circle(x + 15.0, y + 10.0, 3.0, palette),
        rect(x, y, 20.0, 8.0, palette).attr("rx", 2),
        rect(x + 20.0, y + 2.0, 15.0, 4.0, palette),
    ]
}

fn tank(x: f32, y: f32, palette: &Palette) -> Vec<Element> {
    vec![
        rect(x - 2.0, y + 8.0, 24.0, 6.0, palette)
            .attr("rx", 3)
            .attr("opacity", 0.8),
        rect(x, y - 2.0, 20.0, 12.0, palette).attr("rx", 3),
        circle(x + 10.0, y + 2.0, 6.0, palette),
        rect(x + 16.0, y + 1.0, 18.0, 2.0, palette),
    ]
}

fn spaceship(x: f32, y: f32, palette: &Palette) -> Vec<Element> {
    let hull = format!(
        "{x},{} {},{} {},{} {x},{}",
        y + 8.0,
        x + 25.0,
        y + 4.0,
        x + 25.0,
        y - 4.0,
        y - 8.0
    );

    vec![
        body("polygon", palette).attr("points", hull),
        engine(x + 2.0, y + 4.0, palette),
        engine(x + 2.0, y - 4.0, palette),
    ]
}

fn engine(cx: f32, cy: f32, palette: &Palette) -> Element {
    Element::new("circle")
        .attr("class", ACCENT_CLASS)
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", 2)
        .attr("fill", palette.projectile)
        .attr("opacity", 0.7)
        .child(
            Element::new("animate")
                .attr("attributeName", "opacity")
                .attr("values", "0.3;1;0.3")
                .attr("dur", "0.5s")
                .attr("repeatCount", "indefinite"),
        )
}
