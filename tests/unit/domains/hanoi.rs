use super::*;
use crate::assets::store::AssetManager;
use crate::config::RenderConfig;
use crate::render::ops::Recorder;
use crate::scene::model::{VisualObject, VisualRelation};

const VIEW: Size = Size::new(800.0, 600.0);

fn record(state: &RenderedState) -> Recorder {
    let config = RenderConfig::default();
    let assets = AssetManager::placeholders_only();
    let mut rec = Recorder::new(VIEW);
    let mut cx = DrawCtx {
        surface: &mut rec,
        assets: &assets,
        config: &config,
        view: VIEW,
    };
    render(state, &mut cx);
    rec
}

fn towers(relations: &[(&str, &str)]) -> RenderedState {
    let mut state = RenderedState::new("hanoi")
        .object(VisualObject::new("peg3", "peg"))
        .object(VisualObject::new("peg1", "peg"))
        .object(VisualObject::new("peg2", "peg"))
        .object(VisualObject::new("peg", "peg"))
        .object(VisualObject::new("disk2", "disk"))
        .object(VisualObject::new("disk1", "disk"))
        .object(VisualObject::new("disk3", "disk"));
    for (a, b) in relations {
        state = state.relation(VisualRelation::new("on", *a, *b));
    }
    state
}

fn stack_ids<'a>(l: &HanoiLayout<'a>, peg: usize) -> Vec<&'a str> {
    l.pegs[peg].stack.iter().map(|d| d.id).collect()
}

#[test]
fn disk_width_interpolates_by_rank() {
    assert_eq!(disk_width(1, 3), 50.0);
    assert_eq!(disk_width(2, 3), 95.0);
    assert_eq!(disk_width(3, 3), 140.0);
    assert_eq!(disk_width(0, 1), 50.0);
    assert_eq!(disk_width(9, 3), 140.0);
}

#[test]
fn pegs_sort_numerically_and_skip_placeholders() {
    let state = towers(&[]);
    let l = layout(&state, VIEW);
    let ids: Vec<&str> = l.pegs.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["peg1", "peg2", "peg3"]);
    let xs: Vec<f64> = l.pegs.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![200.0, 400.0, 600.0]);
    assert_eq!(l.base_y, 420.0);
}

#[test]
fn stacks_order_by_descending_rank_whatever_the_relation_order() {
    let forward = towers(&[("disk1", "disk2"), ("disk2", "disk3"), ("disk3", "peg1")]);
    let backward = towers(&[("disk3", "peg1"), ("disk2", "disk3"), ("disk1", "disk2")]);
    let a = layout(&forward, VIEW);
    let b = layout(&backward, VIEW);
    assert_eq!(stack_ids(&a, 0), vec!["disk3", "disk2", "disk1"]);
    assert_eq!(a, b);

    let base = &a.pegs[0].stack[0];
    assert_eq!(base.rect, Rect::new(130.0, 402.0, 270.0, 420.0));
    assert_eq!(a.pegs[0].stack[2].color, PALETTE[0]);
}

#[test]
fn disks_spread_over_pegs() {
    let state = towers(&[("disk1", "peg3"), ("disk2", "peg2"), ("disk3", "peg2")]);
    let l = layout(&state, VIEW);
    assert!(stack_ids(&l, 0).is_empty());
    assert_eq!(stack_ids(&l, 1), vec!["disk3", "disk2"]);
    assert_eq!(stack_ids(&l, 2), vec!["disk1"]);
}

#[test]
fn cyclic_and_unsupported_disks_are_omitted() {
    let state = towers(&[("disk1", "disk2"), ("disk2", "disk1"), ("disk3", "table")]);
    let l = layout(&state, VIEW);
    assert!(l.pegs.iter().all(|p| p.stack.is_empty()));
}

#[test]
fn draws_background_labels_and_disks() {
    let state = towers(&[("disk1", "disk2"), ("disk2", "peg1"), ("disk3", "peg3")]);
    let rec = record(&state);
    assert_eq!(rec.texts(), vec!["PEG1", "PEG2", "PEG3", "D2", "D1", "D3"]);
    assert_eq!(
        rec.fills_of(Color::WHITE)[0],
        &Geom::rect(Rect::new(0.0, 0.0, 800.0, 600.0))
    );
    assert_eq!(rec.fills_of(POLE_COLOR).len(), 3);
}

#[test]
fn rendering_is_idempotent() {
    let state = towers(&[("disk1", "disk2"), ("disk2", "disk3"), ("disk3", "peg2")]);
    assert_eq!(record(&state).commands(), record(&state).commands());
}
