use std::collections::{BTreeMap, BTreeSet};

use crate::assets::store::AssetKind;
use crate::config::DepotConfig;
use crate::domains::DrawCtx;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::render::surface::{Geom, Stroke, TextAlign, TextBaseline, TextStyle, approx_text_width};
use crate::scene::index::SceneIndex;
use crate::scene::model::RenderedState;

/// Side of one grid cell.
pub const GRID: f64 = 100.0;
/// Upper bound on grid columns and rows; farther locations are pulled onto the last cell.
pub const MAX_GRID_CELLS: u32 = 256;
const PADDING: f64 = 20.0;
const TRUCK: Size = Size::new(70.0, 44.0);
const PACKAGE: Size = Size::new(32.0, 32.0);
const TILE_INSET: f64 = 8.0;
const TILE_COLOR: Color = Color::rgb(0xdd, 0xdd, 0xdd);
const BACKDROP: Color = Color::rgb(0xf6, 0xf7, 0xfb);
const BADGE_RED: Color = Color::rgb(0xe5, 0x39, 0x35);
const BADGE_RADIUS: f64 = 12.0;
const PILE_STEP: f64 = 6.0;

/// A depot or distributor cell.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Chip text.
    pub label: &'a str,
    /// Grid column and row.
    pub cell: (u32, u32),
    /// Top-left of the cell in world units.
    pub origin: Point,
    /// Tile fill.
    pub color: Color,
    /// Packages lying here and not inside any truck, in relation order.
    pub packages: Vec<&'a str>,
}

/// A truck resolved to a location through its `at-truck` relation.
#[derive(Clone, Debug, PartialEq)]
pub struct TruckGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Location it stands at.
    pub location: &'a str,
    /// Centre of the truck icon.
    pub center: Point,
    /// Packages inside, in relation order.
    pub cargo: Vec<&'a str>,
}

/// Resolved depot frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepotLayout<'a> {
    /// Column count, at least the configured minimum.
    pub cols: u32,
    /// Row count, at least the configured minimum.
    pub rows: u32,
    /// Top-left of the grid, centred in the view.
    pub origin: Point,
    /// Locations with a position, in state order.
    pub locations: Vec<LocationGeom<'a>>,
    /// Trucks whose location resolved, in state order.
    pub trucks: Vec<TruckGeom<'a>>,
}

impl DepotLayout<'_> {
    /// Bounds of the whole grid.
    pub fn grid_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(self.cols as f64 * GRID, self.rows as f64 * GRID),
        )
    }

    /// Every package id placed this frame, with where it went.
    pub fn placements(&self) -> BTreeMap<&str, &str> {
        let mut out = BTreeMap::new();
        for t in &self.trucks {
            for p in &t.cargo {
                out.insert(*p, t.id);
            }
        }
        for l in &self.locations {
            for p in &l.packages {
                out.insert(*p, l.id);
            }
        }
        out
    }
}

fn grid_coord(v: f64) -> u32 {
    let last = MAX_GRID_CELLS - 2;
    if !(v.is_finite() && v > 0.0) {
        return 0;
    }
    if v >= last as f64 {
        if v >= (last + 1) as f64 {
            tracing::debug!(coord = v, clamped = last, "depot grid coordinate clamped");
        }
        return last;
    }
    v.floor() as u32
}

/// Resolve grid size, truck cells and package membership.
///
/// A package listed by any `in-truck` relation belongs to that truck only; its `at` relations
/// are ignored. Every other package is counted once, at the first location its `at` relations
/// name.
pub fn layout<'a>(state: &'a RenderedState, view: Size, cfg: &DepotConfig) -> DepotLayout<'a> {
    let idx = SceneIndex::new(state);
    let is_location =
        |kind: &str| kind.eq_ignore_ascii_case("depot") || kind.eq_ignore_ascii_case("distributor");

    let placed: Vec<_> = state
        .objects
        .iter()
        .filter(|o| is_location(&o.kind))
        .filter_map(|o| Some((o, o.position?)))
        .collect();

    let max_x = placed.iter().map(|(_, p)| grid_coord(p.x)).max().unwrap_or(0);
    let max_y = placed.iter().map(|(_, p)| grid_coord(p.y)).max().unwrap_or(0);
    let cols = cfg.min_cols.max(max_x.saturating_add(2)).min(MAX_GRID_CELLS);
    let rows = cfg.min_rows.max(max_y.saturating_add(2)).min(MAX_GRID_CELLS);
    let origin = Point::new(
        PADDING.max((view.width - cols as f64 * GRID) / 2.0),
        PADDING.max((view.height - rows as f64 * GRID) / 2.0),
    );

    let truck_ids: BTreeSet<&str> = idx.objects_of("truck").map(|t| t.id.as_str()).collect();

    let mut in_truck: BTreeMap<&str, &str> = BTreeMap::new();
    let mut cargo: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (pkg, truck) in idx.pairs_of("in-truck") {
        if in_truck.contains_key(pkg) {
            continue;
        }
        in_truck.insert(pkg, truck);
        cargo.entry(truck).or_default().push(pkg);
    }

    let location_ids: BTreeSet<&str> = placed.iter().map(|(o, _)| o.id.as_str()).collect();
    let mut on_ground: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut grounded: BTreeSet<&str> = BTreeSet::new();
    for (pkg, loc) in idx.pairs_of("at") {
        if in_truck.contains_key(pkg) || truck_ids.contains(pkg) || grounded.contains(pkg) {
            continue;
        }
        if !location_ids.contains(loc) {
            tracing::debug!(package = pkg, location = loc, "package at unknown location skipped");
            continue;
        }
        grounded.insert(pkg);
        on_ground.entry(loc).or_default().push(pkg);
    }

    let cell_origin =
        |x: u32, y: u32| Point::new(origin.x + x as f64 * GRID, origin.y + y as f64 * GRID);

    let locations: Vec<LocationGeom<'a>> = placed
        .iter()
        .map(|(o, at)| {
            let cell = (grid_coord(at.x), grid_coord(at.y));
            LocationGeom {
                id: &o.id,
                label: o.display_label(),
                cell,
                origin: cell_origin(cell.0, cell.1),
                color: o.props().color_or("color", TILE_COLOR),
                packages: on_ground.remove(o.id.as_str()).unwrap_or_default(),
            }
        })
        .collect();

    let trucks = idx
        .objects_of("truck")
        .filter_map(|t| {
            let Some(loc_id) = idx.target_of("at-truck", &t.id) else {
                tracing::debug!(id = %t.id, "truck without at-truck relation omitted");
                return None;
            };
            let loc = locations.iter().find(|l| l.id == loc_id)?;
            Some(TruckGeom {
                id: &t.id,
                location: loc.id,
                center: Point::new(loc.origin.x + GRID * 0.3, loc.origin.y + GRID * 0.6),
                cargo: cargo.get(t.id.as_str()).cloned().unwrap_or_default(),
            })
        })
        .collect();

    DepotLayout {
        cols,
        rows,
        origin,
        locations,
        trucks,
    }
}

fn draw_badge(cx: &mut DrawCtx<'_>, at: Point, text: &str) {
    cx.surface.fill_circle(at, BADGE_RADIUS, BADGE_RED);
    cx.surface
        .fill_text(text, at, &TextStyle::centered(13.0, Color::WHITE).bold());
}

fn draw_chip(cx: &mut DrawCtx<'_>, cell: Point, text: &str) {
    let style = TextStyle::new(12.0, Color::WHITE)
        .bold()
        .anchor(TextAlign::Left, TextBaseline::Top);
    let pad = 4.0;
    let chip = Rect::from_origin_size(
        Point::new(cell.x + 6.0, cell.y + 6.0),
        Size::new(approx_text_width(text, style.size) + pad * 2.0, 16.0),
    );
    cx.surface.fill_rect(chip, Color::rgba(0, 0, 0, 140));
    cx.surface
        .fill_text(text, Point::new(chip.x0 + pad, chip.y0 + 2.0), &style);
}

/// Draw the grid, location tiles, trucks with cargo badges, then ground packages.
pub fn draw(layout: &DepotLayout<'_>, cx: &mut DrawCtx<'_>, max_visible: u32) {
    let view = Rect::from_origin_size(Point::ORIGIN, cx.view);
    cx.surface.fill_rect(view, BACKDROP);
    let cell_edge = Stroke::new(Color::rgba(0, 0, 0, 20), 1.0);
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let cell = Rect::from_origin_size(
                Point::new(
                    layout.origin.x + col as f64 * GRID,
                    layout.origin.y + row as f64 * GRID,
                ),
                Size::new(GRID, GRID),
            );
            cx.surface.fill_rect(cell, Color::WHITE);
            cx.surface.stroke_rect(cell, &cell_edge);
        }
    }

    for loc in &layout.locations {
        let tile = Rect::from_origin_size(
            Point::new(loc.origin.x + TILE_INSET, loc.origin.y + TILE_INSET),
            Size::new(GRID - TILE_INSET * 2.0, GRID - TILE_INSET * 2.0),
        );
        cx.surface.fill(&Geom::round_rect(tile, 10.0), loc.color);
        draw_chip(cx, loc.origin, loc.label);
    }

    for truck in &layout.trucks {
        let c = truck.center;
        cx.asset(AssetKind::Truck, Rect::from_center_size(c, TRUCK));
        if truck.cargo.is_empty() {
            continue;
        }
        draw_badge(
            cx,
            Point::new(c.x, c.y - TRUCK.height / 2.0 - 12.0),
            &truck.cargo.len().to_string(),
        );
        cx.asset(
            AssetKind::Package,
            Rect::from_origin_size(
                Point::new(c.x + TRUCK.width * 0.15, c.y - PACKAGE.height / 2.0),
                Size::new(PACKAGE.width * 0.9, PACKAGE.height * 0.9),
            ),
        );
    }

    for loc in &layout.locations {
        if loc.packages.is_empty() {
            continue;
        }
        let c = Point::new(loc.origin.x + GRID * 0.75, loc.origin.y + GRID * 0.6);
        let shown = loc.packages.len().min(max_visible as usize);
        // Piled bottom-up, each icon a little higher than the one before.
        for i in 0..shown {
            let at = Point::new(c.x, c.y - i as f64 * PILE_STEP);
            cx.asset(AssetKind::Package, Rect::from_center_size(at, PACKAGE));
        }
        let rest = loc.packages.len() - shown;
        if rest > 0 {
            let top = c.y - (shown.saturating_sub(1)) as f64 * PILE_STEP;
            draw_badge(
                cx,
                Point::new(c.x, top - PACKAGE.height / 2.0 - 10.0),
                &format!("+{rest}"),
            );
        }
    }
}

/// Render one depot state.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>) {
    let cfg = cx.config.depot;
    let layout = layout(state, cx.view, &cfg);
    draw(&layout, cx, cfg.max_visible_packages);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/depot.rs"]
mod tests;
