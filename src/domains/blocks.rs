use std::collections::BTreeSet;

use crate::domains::DrawCtx;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::render::surface::{Stroke, TextStyle};
use crate::scene::index::SceneIndex;
use crate::scene::model::{RenderedState, VisualObject};

const BLOCK_SIZE: f64 = 60.0;
const BLOCK_COLOR: Color = Color::rgb(0x99, 0x99, 0x99);
const SURFACE_SIZE: Size = Size::new(400.0, 20.0);
const SURFACE_COLOR: Color = Color::rgb(0x8b, 0x45, 0x13);
const SURFACE_EDGE: Color = Color::rgb(0x65, 0x43, 0x21);
const CLAW_COLOR: Color = Color::rgb(0x55, 0x55, 0x55);
const HELD_OUTLINE: Color = Color::rgb(0xff, 0xd5, 0x4f);

const ARM_HEIGHT: f64 = 80.0;
const MARGIN: f64 = 6.0;
const OPEN_GAP: f64 = 28.0;
const CLAW_LENGTH: f64 = 24.0;
const BAR_DROP: f64 = 10.0;
const IDLE_BAR_RISE: f64 = 12.0;
const IDLE_BAR_HALF: f64 = 18.0;

/// A table or floor segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceGeom {
    /// Bounds, from the literal top-left position.
    pub rect: Rect,
    /// Fill.
    pub color: Color,
}

/// A resolved block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Text drawn in the middle.
    pub label: &'a str,
    /// Bounds, from the literal top-left position.
    pub rect: Rect,
    /// Fill.
    pub color: Color,
    /// Nothing is stacked on it.
    pub clear: bool,
    /// In the held set.
    pub held: bool,
}

/// Gripper line work as segments, in draw order: arm, bar, left claw, right claw.
#[derive(Clone, Debug, PartialEq)]
pub struct ClawGeom<'a> {
    /// Gripper id.
    pub id: &'a str,
    /// Id of the block the claw wraps, if any.
    pub holding: Option<&'a str>,
    /// Stroked segments.
    pub segments: [(Point, Point); 4],
}

/// Resolved blocks-world frame, already in z-order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlocksLayout<'a> {
    /// Surfaces, in state order.
    pub surfaces: Vec<SurfaceGeom>,
    /// Blocks sorted by descending top edge, stable for ties.
    pub blocks: Vec<BlockGeom<'a>>,
    /// Grippers, drawn last.
    pub grippers: Vec<ClawGeom<'a>>,
    /// Ids in the held set.
    pub held: BTreeSet<&'a str>,
}

fn block_rect(obj: &VisualObject, at: Point) -> Rect {
    let p = obj.props();
    Rect::from_origin_size(
        at,
        Size::new(p.dim_or("width", BLOCK_SIZE), p.dim_or("height", BLOCK_SIZE)),
    )
}

/// Resolve positions, the held set and the gripper pose for one state.
pub fn layout(state: &RenderedState) -> BlocksLayout<'_> {
    let idx = SceneIndex::new(state);
    let held = idx.held_set(&["holding"]);

    let surfaces = idx
        .objects_of("surface")
        .filter_map(|o| {
            let at = o.position?;
            let p = o.props();
            Some(SurfaceGeom {
                rect: Rect::from_origin_size(
                    at,
                    Size::new(
                        p.dim_or("width", SURFACE_SIZE.width),
                        p.dim_or("height", SURFACE_SIZE.height),
                    ),
                ),
                color: p.color_or("color", SURFACE_COLOR),
            })
        })
        .collect();

    let mut blocks: Vec<BlockGeom<'_>> = idx
        .objects_of("block")
        .filter_map(|o| {
            let Some(at) = o.position else {
                tracing::debug!(id = %o.id, "block without position omitted");
                return None;
            };
            let p = o.props();
            Some(BlockGeom {
                id: &o.id,
                label: o.display_label(),
                rect: block_rect(o, at),
                color: p.color_or("color", BLOCK_COLOR),
                clear: p.flag("clear"),
                held: held.contains(o.id.as_str()),
            })
        })
        .collect();
    // Lower blocks first so stacked ones paint over them. `sort_by` is stable.
    blocks.sort_by(|a, b| b.rect.y0.total_cmp(&a.rect.y0));

    let held_block = blocks
        .iter()
        .filter(|b| b.held)
        .min_by_key(|b| state.objects.iter().position(|o| o.id == b.id));

    let grippers = idx
        .objects_of("gripper")
        .filter_map(|g| {
            let p = g.props();
            let arm_height = p.f64_any(&["armHeight", "arm_height"]).unwrap_or(ARM_HEIGHT);
            if let Some(block) = held_block {
                let margin = p.f64_any(&["margin"]).unwrap_or(MARGIN);
                let r = block.rect;
                let cx = r.center().x;
                let bar_y = r.y0 - BAR_DROP;
                let (lx, rx) = (r.x0 - margin, r.x1 + margin);
                return Some(ClawGeom {
                    id: &g.id,
                    holding: Some(block.id),
                    segments: [
                        (Point::new(cx, r.y0 - arm_height), Point::new(cx, bar_y)),
                        (Point::new(lx, bar_y), Point::new(rx, bar_y)),
                        (Point::new(lx, bar_y), Point::new(lx, r.y1)),
                        (Point::new(rx, bar_y), Point::new(rx, r.y1)),
                    ],
                });
            }
            let Some(at) = g.position else {
                tracing::debug!(id = %g.id, "idle gripper without position omitted");
                return None;
            };
            let gap = p.f64_any(&["openGap", "open_gap"]).unwrap_or(OPEN_GAP);
            let claw = p.f64_any(&["clawLength", "claw_length"]).unwrap_or(CLAW_LENGTH);
            let bar_y = at.y - IDLE_BAR_RISE;
            let (lx, rx) = (at.x - gap / 2.0, at.x + gap / 2.0);
            Some(ClawGeom {
                id: &g.id,
                holding: None,
                segments: [
                    (Point::new(at.x, at.y - arm_height), Point::new(at.x, bar_y)),
                    (
                        Point::new(at.x - IDLE_BAR_HALF, bar_y),
                        Point::new(at.x + IDLE_BAR_HALF, bar_y),
                    ),
                    (Point::new(lx, bar_y), Point::new(lx, at.y + claw)),
                    (Point::new(rx, bar_y), Point::new(rx, at.y + claw)),
                ],
            })
        })
        .collect();

    for o in &state.objects {
        let known = ["surface", "block", "gripper"]
            .iter()
            .any(|k| o.kind.eq_ignore_ascii_case(k));
        if !known {
            tracing::debug!(id = %o.id, kind = %o.kind, "no blocks-world drawing for object type");
        }
    }

    BlocksLayout {
        surfaces,
        blocks,
        grippers,
        held,
    }
}

/// Draw a resolved layout: surfaces, blocks, then grippers.
pub fn draw(layout: &BlocksLayout<'_>, cx: &mut DrawCtx<'_>) {
    let s = &mut *cx.surface;
    for surf in &layout.surfaces {
        s.fill_rect(surf.rect, surf.color);
        s.stroke_rect(surf.rect, &Stroke::new(SURFACE_EDGE, 2.0));
    }

    let label = TextStyle::centered(24.0, Color::WHITE).bold();
    for b in &layout.blocks {
        s.fill_rect(b.rect, b.color);
        let edge = if b.clear {
            Stroke::new(Color::BLACK, 3.0)
        } else {
            Stroke::new(Color::rgb(0x66, 0x66, 0x66), 2.0)
        };
        s.stroke_rect(b.rect, &edge);
        s.fill_text(b.label, b.rect.center(), &label);
        if b.held {
            s.stroke_rect(
                b.rect.inflate(3.0, 3.0),
                &Stroke::new(HELD_OUTLINE, 3.0).dashed(&[4.0, 4.0]),
            );
        }
    }

    let claw = Stroke::new(CLAW_COLOR, 4.0).round();
    for g in &layout.grippers {
        for (a, b) in g.segments {
            s.line(a, b, &claw);
        }
    }
}

/// Render one blocks-world state.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>) {
    let layout = layout(state);
    draw(&layout, cx);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/blocks.rs"]
mod tests;
