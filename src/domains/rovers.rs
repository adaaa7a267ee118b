use std::collections::BTreeSet;

use crate::assets::store::AssetKind;
use crate::config::RoversConfig;
use crate::domains::DrawCtx;
use crate::effects::capture_waypoint;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::render::surface::{Stroke, TextAlign, TextBaseline, TextStyle};
use crate::scene::index::SceneIndex;
use crate::scene::model::RenderedState;

/// Side of one background grid cell.
pub const GRID: f64 = 100.0;
const WAYPOINT_RADIUS: f64 = 18.0;
const ROVER_SIZE: f64 = 48.0;
const WAYPOINT_COLOR: Color = Color::rgb(0x66, 0xbb, 0x6a);
const PATH_COLOR: Color = Color::rgb(0xb0, 0xbe, 0xc5);
const TEXT_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);

/// A waypoint placed on the synthetic grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaypointGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Grid column.
    pub col: u32,
    /// Grid row.
    pub row: u32,
}

impl WaypointGeom<'_> {
    /// Centre of the node.
    pub fn center(&self) -> Point {
        Point::new(
            self.col as f64 * GRID + GRID / 2.0,
            self.row as f64 * GRID + GRID / 2.0,
        )
    }

    /// The grid cell holding the node.
    pub fn cell(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.col as f64 * GRID, self.row as f64 * GRID),
            Size::new(GRID, GRID),
        )
    }
}

/// Resolved rovers frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoversLayout<'a> {
    /// Waypoints sorted by id.
    pub waypoints: Vec<WaypointGeom<'a>>,
    /// `connected` edges between known waypoints, in relation order.
    pub edges: Vec<(&'a str, &'a str)>,
    /// Waypoints carrying an `at-target` caption.
    pub targets: Vec<&'a str>,
    /// `(rover, waypoint)` from `at-rover`, in relation order.
    pub rovers: Vec<(&'a str, &'a str)>,
}

impl<'a> RoversLayout<'a> {
    /// Waypoint by id.
    pub fn waypoint(&self, id: &str) -> Option<&WaypointGeom<'a>> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// Where a camera flash belongs: the waypoint named by a capture `action` (one starting with
    /// `marker`), else the first rover's waypoint.
    pub fn flash_cell(&self, action: Option<&str>, marker: &str) -> Option<Rect> {
        let named = action
            .filter(|a| a.trim_start().starts_with(marker))
            .and_then(capture_waypoint)
            .and_then(|w| self.waypoint(w));
        let fallback = || self.rovers.first().and_then(|(_, w)| self.waypoint(w));
        named.or_else(fallback).map(WaypointGeom::cell)
    }
}

fn is_placeholder(s: &str) -> bool {
    s.eq_ignore_ascii_case("rover") || s.eq_ignore_ascii_case("waypoint")
}

/// Lay waypoints out on a near-square grid in id order and collect edges, targets and rovers.
pub fn layout<'a>(state: &'a RenderedState, cfg: &RoversConfig) -> RoversLayout<'a> {
    let idx = SceneIndex::new(state);

    let mut ids: Vec<&str> = idx
        .objects_of("waypoint")
        .filter(|o| !is_placeholder(&o.id) && !is_placeholder(&o.label))
        .map(|o| o.id.as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let per_row = (ids.len() as f64).sqrt().ceil().max(1.0) as u32;
    let waypoints: Vec<WaypointGeom<'a>> = ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let i = i as u32;
            WaypointGeom {
                id,
                col: (i % per_row).saturating_mul(cfg.cell_step_x).saturating_add(1),
                row: (i / per_row).saturating_mul(cfg.cell_step_y).saturating_add(1),
            }
        })
        .collect();
    let known: BTreeSet<&str> = waypoints.iter().map(|w| w.id).collect();

    let edges = idx
        .pairs_of("connected")
        .filter(|(a, b)| known.contains(a) && known.contains(b))
        .collect();
    let targets = idx
        .pairs_of("at-target")
        .map(|(_, w)| w)
        .filter(|w| known.contains(w))
        .collect();
    let rovers = idx
        .pairs_of("at-rover")
        .filter(|(_, w)| {
            let ok = known.contains(w);
            if !ok {
                tracing::debug!(waypoint = w, "rover at unknown waypoint omitted");
            }
            ok
        })
        .collect();

    RoversLayout {
        waypoints,
        edges,
        targets,
        rovers,
    }
}

/// Draw grid, edges, waypoints, captions and rovers; then the camera flash on top when visible.
pub fn draw(layout: &RoversLayout<'_>, cx: &mut DrawCtx<'_>, flash: Option<Rect>) {
    let view = cx.view;
    cx.surface
        .fill_rect(Rect::from_origin_size(Point::ORIGIN, view), Color::WHITE);
    let grid_edge = Stroke::new(Color::rgba(0, 0, 0, 20), 1.0);
    let (cols, rows) = (
        (view.width / GRID).ceil().max(0.0) as u32,
        (view.height / GRID).ceil().max(0.0) as u32,
    );
    for y in 0..rows {
        for x in 0..cols {
            cx.surface.stroke_rect(
                Rect::from_origin_size(
                    Point::new(x as f64 * GRID, y as f64 * GRID),
                    Size::new(GRID, GRID),
                ),
                &grid_edge,
            );
        }
    }

    let path = Stroke::new(PATH_COLOR, 4.0);
    for (a, b) in &layout.edges {
        if let (Some(a), Some(b)) = (layout.waypoint(a), layout.waypoint(b)) {
            cx.surface.line(a.center(), b.center(), &path);
        }
    }

    let wp_label = TextStyle::new(12.0, TEXT_COLOR)
        .bold()
        .anchor(TextAlign::Center, TextBaseline::Top);
    for w in &layout.waypoints {
        let c = w.center();
        cx.surface.fill_circle(c, WAYPOINT_RADIUS, WAYPOINT_COLOR);
        cx.surface.fill_text(
            &w.id.to_uppercase(),
            Point::new(c.x, c.y + WAYPOINT_RADIUS + 4.0),
            &wp_label,
        );
    }

    let target_label = TextStyle::new(10.0, Color::rgb(0x66, 0x66, 0x66))
        .anchor(TextAlign::Center, TextBaseline::Bottom);
    for t in &layout.targets {
        if let Some(w) = layout.waypoint(t) {
            let cell = w.cell();
            cx.surface.fill_text(
                "TARGET",
                Point::new(cell.center().x, cell.y1 - 6.0),
                &target_label,
            );
        }
    }

    let rover_label = TextStyle::new(11.0, TEXT_COLOR)
        .bold()
        .anchor(TextAlign::Left, TextBaseline::Middle);
    for (rover, at) in &layout.rovers {
        let Some(w) = layout.waypoint(at) else {
            continue;
        };
        let c = w.center();
        cx.asset(
            AssetKind::Rover,
            Rect::from_center_size(c, Size::new(ROVER_SIZE, ROVER_SIZE)),
        );
        cx.surface.fill_text(
            &rover.to_uppercase(),
            Point::new(c.x + ROVER_SIZE / 2.0 + 6.0, c.y),
            &rover_label,
        );
    }

    if let Some(cell) = flash {
        cx.asset(AssetKind::Camera, cell);
    }
}

/// Render one rovers state. `flash_visible` comes from the dispatcher's camera-flash timer.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>, flash_visible: bool) {
    let layout = layout(state, &cx.config.rovers);
    let flash = if flash_visible {
        layout.flash_cell(state.action(), &cx.config.effects.capture_marker)
    } else {
        None
    };
    draw(&layout, cx, flash);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/rovers.rs"]
mod tests;
