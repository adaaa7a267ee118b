use std::collections::{BTreeMap, HashMap};

use crate::domains::DrawCtx;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::foundation::math::numeric_suffix;
use crate::render::surface::{Geom, TextAlign, TextBaseline, TextStyle};
use crate::scene::index::SceneIndex;
use crate::scene::model::RenderedState;

const PEG_HEIGHT: f64 = 150.0;
const POLE_WIDTH: f64 = 10.0;
const DISK_HEIGHT: f64 = 18.0;
const MIN_DISK_WIDTH: f64 = 50.0;
const MAX_DISK_WIDTH: f64 = 140.0;
const BASE_WIDTH: f64 = 120.0;
const POLE_COLOR: Color = Color::rgb(0x8b, 0x5a, 0x2b);

/// Disk colours, cycled by rank.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0xff, 0x6b, 0x6b),
    Color::rgb(0x4e, 0xcd, 0xc4),
    Color::rgb(0xff, 0xe6, 0x6d),
    Color::rgb(0x95, 0xe1, 0xd3),
    Color::rgb(0xaa, 0x96, 0xda),
    Color::rgb(0xa8, 0xd8, 0xea),
    Color::rgb(0xf3, 0x81, 0x81),
    Color::rgb(0xfc, 0xba, 0xd3),
];

/// A disk placed on a peg.
#[derive(Clone, Debug, PartialEq)]
pub struct DiskGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Numeric rank from the id suffix; `0` is treated as `1`.
    pub rank: u64,
    /// Bounds.
    pub rect: Rect,
    /// Fill.
    pub color: Color,
}

/// A peg with its stack, base first.
#[derive(Clone, Debug, PartialEq)]
pub struct PegGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Horizontal centre.
    pub x: f64,
    /// Disks from the base upward; ranks strictly decrease.
    pub stack: Vec<DiskGeom<'a>>,
}

/// Resolved tower frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HanoiLayout<'a> {
    /// Top of the base plates.
    pub base_y: f64,
    /// Pegs sorted by numeric suffix.
    pub pegs: Vec<PegGeom<'a>>,
}

fn is_placeholder(id: &str) -> bool {
    id.eq_ignore_ascii_case("peg") || id.eq_ignore_ascii_case("disk")
}

/// Width of a disk of `rank` among `total` disks, interpolated from narrowest to widest.
pub fn disk_width(rank: u64, total: usize) -> f64 {
    let span = total.saturating_sub(1).max(1) as f64;
    let t = ((rank.max(1) - 1) as f64 / span).clamp(0.0, 1.0);
    MIN_DISK_WIDTH + (MAX_DISK_WIDTH - MIN_DISK_WIDTH) * t
}

/// Peg a disk ultimately rests on, following disk-on-disk chains.
fn resolve_peg<'a>(
    disk: &'a str,
    on: &HashMap<&'a str, &'a str>,
    pegs: &BTreeMap<&'a str, usize>,
) -> Option<&'a str> {
    let mut cur = disk;
    // A chain longer than the relation count must contain a cycle.
    for _ in 0..=on.len() {
        let below = *on.get(cur)?;
        if pegs.contains_key(below) {
            return Some(below);
        }
        cur = below;
    }
    tracing::debug!(disk, "cyclic on-chain, disk omitted");
    None
}

/// Resolve peg order, stack membership from `on` relations, and disk geometry.
pub fn layout(state: &RenderedState, view: Size) -> HanoiLayout<'_> {
    let idx = SceneIndex::new(state);

    let mut pegs: Vec<&str> = idx
        .objects_of("peg")
        .map(|o| o.id.as_str())
        .filter(|id| !is_placeholder(id))
        .collect();
    pegs.sort_by_key(|id| numeric_suffix(id));

    let mut disks: Vec<&str> = idx
        .objects_of("disk")
        .map(|o| o.id.as_str())
        .filter(|id| !is_placeholder(id))
        .collect();
    disks.sort_by_key(|id| numeric_suffix(id));
    let total = disks.len().max(1);

    let peg_slot: BTreeMap<&str, usize> = pegs.iter().enumerate().map(|(i, p)| (*p, i)).collect();
    let on = idx.target_map("on");

    let mut stacks: Vec<Vec<&str>> = vec![Vec::new(); pegs.len()];
    for &disk in &disks {
        if let Some(peg) = resolve_peg(disk, &on, &peg_slot) {
            if let Some(slot) = peg_slot.get(peg) {
                stacks[*slot].push(disk);
            }
        }
    }

    let spacing = view.width / (pegs.len() as f64 + 1.0);
    let base_y = view.height * 0.7;

    let pegs = pegs
        .into_iter()
        .zip(stacks)
        .enumerate()
        .map(|(i, (peg, mut stack))| {
            let x = spacing * (i as f64 + 1.0);
            // Largest rank at the base, whatever order the relations came in.
            stack.sort_by_key(|d| std::cmp::Reverse(numeric_suffix(d)));
            let mut y = base_y;
            let stack = stack
                .into_iter()
                .map(|d| {
                    let rank = numeric_suffix(d).max(1);
                    let w = disk_width(rank, total);
                    y -= DISK_HEIGHT;
                    DiskGeom {
                        id: d,
                        rank,
                        rect: Rect::from_origin_size(
                            Point::new(x - w / 2.0, y),
                            Size::new(w, DISK_HEIGHT),
                        ),
                        color: PALETTE[((rank - 1) % PALETTE.len() as u64) as usize],
                    }
                })
                .collect();
            PegGeom { id: peg, x, stack }
        })
        .collect();

    HanoiLayout { base_y, pegs }
}

/// Draw base plates, poles, labels, then each stack from the base up.
pub fn draw(layout: &HanoiLayout<'_>, cx: &mut DrawCtx<'_>) {
    let s = &mut *cx.surface;
    s.fill_rect(Rect::from_origin_size(Point::ORIGIN, cx.view), Color::WHITE);

    let peg_label = TextStyle::new(14.0, Color::rgba(0, 0, 0, 166))
        .bold()
        .anchor(TextAlign::Center, TextBaseline::Bottom);
    for peg in &layout.pegs {
        let base = Rect::from_origin_size(
            Point::new(peg.x - BASE_WIDTH / 2.0, layout.base_y + 6.0),
            Size::new(BASE_WIDTH, 12.0),
        );
        s.fill(&Geom::round_rect(base, 6.0), Color::rgba(0, 0, 0, 51));
        let pole = Rect::from_origin_size(
            Point::new(peg.x - POLE_WIDTH / 2.0, layout.base_y - PEG_HEIGHT),
            Size::new(POLE_WIDTH, PEG_HEIGHT),
        );
        s.fill(&Geom::round_rect(pole, 4.0), POLE_COLOR);
        s.fill_text(
            &peg.id.to_uppercase(),
            Point::new(peg.x, layout.base_y - PEG_HEIGHT - 10.0),
            &peg_label,
        );
    }

    let disk_label = TextStyle::centered(11.0, Color::rgba(0, 0, 0, 191)).bold();
    for peg in &layout.pegs {
        for disk in &peg.stack {
            s.fill(
                &Geom::round_rect(disk.rect + Vec2::new(2.0, 2.0), 8.0),
                Color::rgba(0, 0, 0, 31),
            );
            s.fill(&Geom::round_rect(disk.rect, 8.0), disk.color);
            s.fill_text(&format!("D{}", disk.rank), disk.rect.center(), &disk_label);
        }
    }
}

/// Render one tower state.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>) {
    let layout = layout(state, cx.view);
    draw(&layout, cx);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/hanoi.rs"]
mod tests;
