//! Fallback strategy for domains without dedicated geometry.
//!
//! Everything is inferred from the open property bags: shape from which dimensional keys are
//! present, colour from an explicit property, a type-name table or a hash of the type string,
//! and placement from literal positions, containment relations or an automatic flow grid.
//! Literal positions are object centres here.

use std::collections::{BTreeMap, BTreeSet};

use crate::domains::DrawCtx;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::foundation::math::fnv1a64_str;
use crate::render::surface::{Geom, Stroke, TextAlign, TextBaseline, TextStyle};
use crate::scene::index::{HOLD_RELATIONS, SceneIndex};
use crate::scene::model::{RenderedState, VisualObject, VisualRelation};
use crate::scene::props::Props;

/// Relation tags whose meaning is already carried by placement; no arrow is drawn for them.
pub const CONTAINMENT_RELATIONS: [&str; 6] = ["in", "inside", "contains", "at", "on", "ontable"];

const DEFAULT_RECT: Size = Size::new(60.0, 40.0);
const DEFAULT_SIDE: f64 = 40.0;
const DEFAULT_RADIUS: f64 = 20.0;
const DEFAULT_ELLIPSE: (f64, f64) = (30.0, 20.0);
const HEADER_ORIGIN: Point = Point::new(20.0, 20.0);
const LEGEND_TOP: f64 = 70.0;
const LEGEND_ROW: f64 = 20.0;
const FLOW_LEFT: f64 = 220.0;
const FLOW_TOP: f64 = 90.0;
const FLOW_CELL: Size = Size::new(110.0, 100.0);
const ARROW_HEAD: f64 = 10.0;
const INK: Color = Color::rgb(0x33, 0x33, 0x33);
const ARROW_COLOR: Color = Color::rgb(0x55, 0x55, 0x55);
const HELD_OUTLINE: Color = Color::rgb(0xff, 0xd5, 0x4f);

/// Colours for well-known type names, matched by substring in order.
const TYPE_COLORS: [(&str, Color); 16] = [
    ("robot", Color::rgb(0x60, 0x7d, 0x8b)),
    ("gripper", Color::rgb(0x55, 0x55, 0x55)),
    ("truck", Color::rgb(0x00, 0xbf, 0xff)),
    ("airplane", Color::rgb(0x90, 0xca, 0xf9)),
    ("package", Color::rgb(0xff, 0xd7, 0x00)),
    ("crate", Color::rgb(0xc6, 0x9c, 0x6d)),
    ("ball", Color::rgb(0xff, 0x6b, 0x6b)),
    ("block", Color::rgb(0x95, 0xa5, 0xa6)),
    ("room", Color::rgb(0xf0, 0xf0, 0xf0)),
    ("table", Color::rgb(0x8b, 0x45, 0x13)),
    ("surface", Color::rgb(0x8b, 0x45, 0x13)),
    ("waypoint", Color::rgb(0x66, 0xbb, 0x6a)),
    ("rover", Color::rgb(0x8d, 0x6e, 0x63)),
    ("satellite", Color::rgb(0x7e, 0x57, 0xc2)),
    ("depot", Color::rgb(0xdd, 0xdd, 0xdd)),
    ("location", Color::rgb(0xdd, 0xdd, 0xdd)),
];

/// Inferred outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Width x height rectangle.
    Rect,
    /// Equal-sided rectangle.
    Square,
    /// Circle.
    Circle,
    /// Ellipse with independent radii.
    Ellipse,
    /// Upward-pointing triangle in the bounding box.
    Triangle,
    /// Rhombus in the bounding box.
    Diamond,
}

impl ShapeKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" | "box" => Some(Self::Rect),
            "square" => Some(Self::Square),
            "circle" => Some(Self::Circle),
            "ellipse" | "oval" => Some(Self::Ellipse),
            "triangle" => Some(Self::Triangle),
            "diamond" | "rhombus" => Some(Self::Diamond),
            _ => None,
        }
    }
}

/// Shape for a property bag: an explicit `shape` wins, otherwise radius means circle, paired
/// radii mean ellipse, `size` means square, equal width/height mean square, and anything else
/// is a rectangle.
pub fn infer_shape(p: &Props<'_>) -> ShapeKind {
    if let Some(shape) = p.str("shape").and_then(ShapeKind::parse) {
        return shape;
    }
    if p.dim("radius").is_some() {
        return ShapeKind::Circle;
    }
    if p.dim("rx").is_some() && p.dim("ry").is_some() {
        return ShapeKind::Ellipse;
    }
    if p.dim("size").is_some() {
        return ShapeKind::Square;
    }
    match (p.dim("width"), p.dim("height")) {
        (Some(w), Some(h)) if w == h => ShapeKind::Square,
        _ => ShapeKind::Rect,
    }
}

/// Full extents of `shape` given the property bag.
fn shape_size(shape: ShapeKind, p: &Props<'_>) -> Size {
    match shape {
        ShapeKind::Circle => {
            let r = p
                .dim("radius")
                .or_else(|| p.dim("size").map(|s| s / 2.0))
                .unwrap_or(DEFAULT_RADIUS);
            Size::new(r * 2.0, r * 2.0)
        }
        ShapeKind::Ellipse => Size::new(
            p.dim("rx").unwrap_or(DEFAULT_ELLIPSE.0) * 2.0,
            p.dim("ry").unwrap_or(DEFAULT_ELLIPSE.1) * 2.0,
        ),
        ShapeKind::Square => {
            let side = p.dim_any(&["size", "width", "height"]).unwrap_or(DEFAULT_SIDE);
            Size::new(side, side)
        }
        ShapeKind::Rect | ShapeKind::Triangle | ShapeKind::Diamond => Size::new(
            p.dim("width").unwrap_or(DEFAULT_RECT.width),
            p.dim("height").unwrap_or(DEFAULT_RECT.height),
        ),
    }
}

/// Stable colour for a type name: table match by substring, else a hue hashed from the name.
pub fn type_color(kind: &str) -> Color {
    let lower = kind.to_ascii_lowercase();
    if let Some((_, c)) = TYPE_COLORS.iter().find(|(k, _)| lower.contains(k)) {
        return *c;
    }
    let hue = (fnv1a64_str(kind) % 360) as f64;
    Color::from_hsl(hue, 0.55, 0.6)
}

/// Fill for one object: its `color` property, else [`type_color`].
pub fn object_color(obj: &VisualObject) -> Color {
    obj.props()
        .color("color")
        .unwrap_or_else(|| type_color(&obj.kind))
}

/// One placed, styled object.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Type tag.
    pub kind: &'a str,
    /// Text drawn in the middle.
    pub label: &'a str,
    /// Outline.
    pub shape: ShapeKind,
    /// Centre.
    pub center: Point,
    /// Full extents.
    pub size: Size,
    /// Fill.
    pub fill: Color,
    /// Label colour, contrasting with the fill.
    pub text: Color,
    /// In the held set.
    pub held: bool,
    /// Draw-order key.
    pub z: f64,
}

impl NodeGeom<'_> {
    /// Bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Distance from the centre to the outline along unit direction `dir`.
    pub fn boundary_distance(&self, dir: Vec2) -> f64 {
        let (hw, hh) = (self.size.width / 2.0, self.size.height / 2.0);
        let (dx, dy) = (dir.x.abs(), dir.y.abs());
        match self.shape {
            ShapeKind::Circle | ShapeKind::Ellipse => {
                let q = (dx / hw).powi(2) + (dy / hh).powi(2);
                if q > 0.0 { 1.0 / q.sqrt() } else { 0.0 }
            }
            ShapeKind::Diamond => {
                let q = dx / hw + dy / hh;
                if q > 0.0 { 1.0 / q } else { 0.0 }
            }
            ShapeKind::Rect | ShapeKind::Square | ShapeKind::Triangle => {
                let tx = if dx > 0.0 { hw / dx } else { f64::INFINITY };
                let ty = if dy > 0.0 { hh / dy } else { f64::INFINITY };
                let t = tx.min(ty);
                if t.is_finite() { t } else { 0.0 }
            }
        }
    }

    fn geom(&self) -> Geom {
        let r = self.bounds();
        match self.shape {
            ShapeKind::Rect | ShapeKind::Square => Geom::round_rect(r, 4.0),
            ShapeKind::Circle => Geom::circle(self.center, self.size.width / 2.0),
            ShapeKind::Ellipse => {
                Geom::ellipse(self.center, self.size.width / 2.0, self.size.height / 2.0)
            }
            ShapeKind::Triangle => Geom::polygon(vec![
                Point::new(r.center().x, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
            ]),
            ShapeKind::Diamond => Geom::polygon(vec![
                Point::new(r.center().x, r.y0),
                Point::new(r.x1, r.center().y),
                Point::new(r.center().x, r.y1),
                Point::new(r.x0, r.center().y),
            ]),
        }
    }
}

/// A relation drawn as an arrowed line.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowGeom<'a> {
    /// Relation tag.
    pub kind: &'a str,
    /// Start, on the source outline.
    pub from: Point,
    /// Tip, on the target outline.
    pub to: Point,
    /// Line colour.
    pub color: Color,
    /// Dashed line.
    pub dashed: bool,
    /// Text at the midpoint.
    pub label: Option<&'a str>,
}

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry<'a> {
    /// Type tag.
    pub kind: &'a str,
    /// Swatch colour.
    pub color: Color,
    /// Instances in this state.
    pub count: usize,
}

/// Resolved fallback frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenericLayout<'a> {
    /// Domain name for the header.
    pub domain: &'a str,
    /// Number of objects in the state.
    pub object_count: usize,
    /// Types in first-appearance order.
    pub legend: Vec<LegendEntry<'a>>,
    /// Placed objects, sorted by ascending z (stable).
    pub nodes: Vec<NodeGeom<'a>>,
    /// Non-containment relations between placed objects.
    pub arrows: Vec<ArrowGeom<'a>>,
}

impl<'a> GenericLayout<'a> {
    /// Placed node by id.
    pub fn node(&self, id: &str) -> Option<&NodeGeom<'a>> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn is_containment(rel: &VisualRelation) -> bool {
    CONTAINMENT_RELATIONS.iter().any(|k| rel.is(k))
}

/// `(content, container, stacked)` for a containment relation; `contains` points the other way.
fn containment_pair(rel: &VisualRelation) -> Option<(&str, &str, bool)> {
    let target = rel.target.as_deref()?;
    if rel.is("contains") {
        Some((target, rel.source.as_str(), false))
    } else if rel.is("on") {
        Some((rel.source.as_str(), target, true))
    } else if is_containment(rel) && !rel.is("ontable") {
        Some((rel.source.as_str(), target, false))
    } else {
        None
    }
}

/// Resolve shapes, colours, placement, draw order, arrows and the legend.
pub fn layout(state: &RenderedState, view: Size) -> GenericLayout<'_> {
    let idx = SceneIndex::new(state);
    let held = idx.held_set(&HOLD_RELATIONS);

    let mut legend: Vec<LegendEntry<'_>> = Vec::new();
    for obj in &state.objects {
        match legend.iter_mut().find(|e| e.kind == obj.kind) {
            Some(e) => e.count += 1,
            None => legend.push(LegendEntry {
                kind: &obj.kind,
                color: object_color(obj),
                count: 1,
            }),
        }
    }

    // Duplicate ids keep the first object, as the index does.
    let mut seen = BTreeSet::new();
    let objects: Vec<&VisualObject> = state
        .objects
        .iter()
        .filter(|o| seen.insert(o.id.as_str()))
        .collect();

    let shapes: Vec<(ShapeKind, Size)> = objects
        .iter()
        .map(|o| {
            let p = o.props();
            let shape = infer_shape(&p);
            (shape, shape_size(shape, &p))
        })
        .collect();

    let mut centers: BTreeMap<&str, Point> = objects
        .iter()
        .filter_map(|o| Some((o.id.as_str(), o.position?)))
        .collect();

    place_by_containment(state, &objects, &shapes, &mut centers);

    let mut flow = 0usize;
    let per_row = (((view.width - FLOW_LEFT) / FLOW_CELL.width).floor() as usize).max(1);
    for o in &objects {
        if centers.contains_key(o.id.as_str()) {
            continue;
        }
        let (col, row) = (flow % per_row, flow / per_row);
        flow += 1;
        centers.insert(
            &o.id,
            Point::new(
                FLOW_LEFT + (col as f64 + 0.5) * FLOW_CELL.width,
                FLOW_TOP + (row as f64 + 0.5) * FLOW_CELL.height,
            ),
        );
    }

    let mut nodes: Vec<NodeGeom<'_>> = objects
        .iter()
        .zip(&shapes)
        .filter_map(|(o, (shape, size))| {
            let center = *centers.get(o.id.as_str())?;
            let p = o.props();
            let fill = object_color(o);
            Some(NodeGeom {
                id: &o.id,
                kind: &o.kind,
                label: o.display_label(),
                shape: *shape,
                center,
                size: *size,
                fill,
                text: fill.contrasting_text(),
                held: held.contains(o.id.as_str()),
                z: p.f64_any(&["z_index", "zIndex", "z"]).unwrap_or(0.0),
            })
        })
        .collect();
    nodes.sort_by(|a, b| a.z.total_cmp(&b.z));

    let by_id: BTreeMap<&str, &NodeGeom<'_>> = nodes.iter().map(|n| (n.id, n)).collect();
    let arrows = state
        .relations
        .iter()
        .filter(|r| !is_containment(r))
        .filter_map(|r| {
            let target = r.target.as_deref()?;
            let (Some(a), Some(b)) = (by_id.get(r.source.as_str()), by_id.get(target)) else {
                tracing::debug!(
                    kind = %r.kind,
                    source = %r.source,
                    target,
                    "dangling relation skipped"
                );
                return None;
            };
            let delta = b.center - a.center;
            let len = delta.hypot();
            if len <= f64::EPSILON {
                return None;
            }
            let dir = delta / len;
            let from = a.center + dir * a.boundary_distance(dir).min(len / 2.0);
            let to = b.center - dir * b.boundary_distance(dir).min(len / 2.0);
            let p = r.props();
            Some(ArrowGeom {
                kind: &r.kind,
                from,
                to,
                color: p.color_or("color", ARROW_COLOR),
                dashed: p.flag("dashed")
                    || p.str("style").is_some_and(|s| s.eq_ignore_ascii_case("dashed")),
                label: p.str("label"),
            })
        })
        .collect();

    GenericLayout {
        domain: &state.domain,
        object_count: state.objects.len(),
        legend,
        nodes,
        arrows,
    }
}

/// Place unpositioned objects onto already-placed containers, repeating until nothing changes
/// so chains (a in b in c) resolve.
fn place_by_containment<'a>(
    state: &'a RenderedState,
    objects: &[&'a VisualObject],
    shapes: &[(ShapeKind, Size)],
    centers: &mut BTreeMap<&'a str, Point>,
) {
    let size_of = |id: &str| {
        objects
            .iter()
            .position(|o| o.id == id)
            .map(|i| shapes[i].1)
    };
    let pairs: Vec<(&'a str, &'a str, bool)> =
        state.relations.iter().filter_map(containment_pair).collect();
    let mut children: BTreeMap<&str, usize> = BTreeMap::new();

    for _ in 0..objects.len() {
        let mut progressed = false;
        for &(content, container, stacked) in &pairs {
            if centers.contains_key(content) {
                continue;
            }
            let (Some(base), Some(own), Some(host)) =
                (centers.get(container).copied(), size_of(content), size_of(container))
            else {
                continue;
            };
            let k = children.entry(container).or_insert(0);
            let center = if stacked {
                let step = own.height;
                Point::new(
                    base.x,
                    base.y - host.height / 2.0 - own.height / 2.0 - *k as f64 * step,
                )
            } else {
                let left = base.x - host.width / 2.0 + 6.0 + own.width / 2.0;
                Point::new(left + *k as f64 * (own.width + 6.0), base.y)
            };
            *k += 1;
            centers.insert(content, center);
            progressed = true;
        }
        if !progressed {
            break;
        }
    }
}

fn draw_arrow(cx: &mut DrawCtx<'_>, arrow: &ArrowGeom<'_>) {
    let mut stroke = Stroke::new(arrow.color, 2.0);
    if arrow.dashed {
        stroke = stroke.dashed(&[6.0, 4.0]);
    }
    let delta = arrow.to - arrow.from;
    let len = delta.hypot();
    if len <= f64::EPSILON {
        return;
    }
    let dir = delta / len;
    let normal = Vec2::new(-dir.y, dir.x);
    let head = ARROW_HEAD.min(len);
    let neck = arrow.to - dir * head;
    cx.surface.line(arrow.from, neck, &stroke);
    cx.surface.fill(
        &Geom::polygon(vec![
            arrow.to,
            neck + normal * (head / 2.0),
            neck - normal * (head / 2.0),
        ]),
        arrow.color,
    );
    if let Some(label) = arrow.label {
        let mid = arrow.from.midpoint(arrow.to);
        cx.surface.fill_text(
            label,
            mid - Vec2::new(0.0, 4.0),
            &TextStyle::new(11.0, INK).anchor(TextAlign::Center, TextBaseline::Bottom),
        );
    }
}

/// Draw objects in z-order, then arrows, then the header and legend.
pub fn draw(layout: &GenericLayout<'_>, cx: &mut DrawCtx<'_>) {
    let outline = Stroke::new(Color::rgba(0, 0, 0, 90), 1.5);
    let held = Stroke::new(HELD_OUTLINE, 3.0).dashed(&[4.0, 4.0]);
    for node in &layout.nodes {
        let geom = node.geom();
        cx.surface.fill(&geom, node.fill);
        cx.surface.stroke(&geom, &outline);
        if node.held {
            cx.surface.stroke_rect(node.bounds().inflate(4.0, 4.0), &held);
        }
        cx.surface.fill_text(
            node.label,
            node.center,
            &TextStyle::centered(12.0, node.text).bold(),
        );
    }

    for arrow in &layout.arrows {
        draw_arrow(cx, arrow);
    }

    let header = TextStyle::new(16.0, INK).anchor(TextAlign::Left, TextBaseline::Top);
    cx.surface.fill_text(
        &format!("Domain: {}", layout.domain),
        HEADER_ORIGIN,
        &header,
    );
    cx.surface.fill_text(
        &format!("Objects: {}", layout.object_count),
        HEADER_ORIGIN + Vec2::new(0.0, 24.0),
        &header,
    );

    let entry = TextStyle::new(13.0, INK).anchor(TextAlign::Left, TextBaseline::Middle);
    for (i, e) in layout.legend.iter().enumerate() {
        let y = LEGEND_TOP + i as f64 * LEGEND_ROW;
        let swatch = Rect::from_origin_size(Point::new(HEADER_ORIGIN.x, y), Size::new(14.0, 14.0));
        cx.surface.fill_rect(swatch, e.color);
        cx.surface
            .stroke_rect(swatch, &Stroke::new(Color::rgba(0, 0, 0, 90), 1.0));
        cx.surface.fill_text(
            &format!("{} ({})", e.kind, e.count),
            Point::new(HEADER_ORIGIN.x + 22.0, swatch.center().y),
            &entry,
        );
    }
}

/// Render one state of an unknown domain.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>) {
    let layout = layout(state, cx.view);
    draw(&layout, cx);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/generic.rs"]
mod tests;
