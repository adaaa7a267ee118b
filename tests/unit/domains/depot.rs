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

fn base() -> RenderedState {
    RenderedState::new("depot")
        .object(VisualObject::new("depot0", "depot").at(1.0, 1.0))
        .object(VisualObject::new("dist0", "distributor").at(3.0, 2.0))
        .object(VisualObject::new("t1", "truck"))
        .relation(VisualRelation::new("at-truck", "t1", "depot0"))
}

#[test]
fn grid_respects_minimums_and_centres_in_view() {
    let state = base();
    let l = layout(&state, VIEW, &DepotConfig::default());
    assert_eq!((l.cols, l.rows), (8, 5));
    assert_eq!(l.origin, Point::new(20.0, 50.0));
    assert_eq!(l.grid_rect(), Rect::new(20.0, 50.0, 820.0, 550.0));
    assert_eq!(l.locations[0].cell, (1, 1));
    assert_eq!(l.locations[0].origin, Point::new(120.0, 150.0));
    assert_eq!(l.trucks[0].center, Point::new(150.0, 210.0));

    let far = RenderedState::new("depot").object(VisualObject::new("d", "depot").at(10.0, 0.0));
    let l = layout(&far, VIEW, &DepotConfig::default());
    assert_eq!(l.cols, 12);
}

#[test]
fn far_locations_clamp_onto_a_bounded_grid() {
    let state = RenderedState::new("depot")
        .object(VisualObject::new("d", "depot").at(5.0e9, 0.0))
        .object(VisualObject::new("e", "distributor").at(1.0e7, 1.0e7));
    let l = layout(&state, VIEW, &DepotConfig::default());
    assert_eq!((l.cols, l.rows), (MAX_GRID_CELLS, MAX_GRID_CELLS));
    assert_eq!(l.locations[0].cell, (MAX_GRID_CELLS - 2, 0));
    assert_eq!(
        l.locations[1].cell,
        (MAX_GRID_CELLS - 2, MAX_GRID_CELLS - 2)
    );

    let rec = record(&state);
    assert!(rec.texts().contains(&"d"));

    let huge = DepotConfig {
        min_cols: u32::MAX,
        ..DepotConfig::default()
    };
    let b = base();
    let l = layout(&b, VIEW, &huge);
    assert_eq!((l.cols, l.rows), (MAX_GRID_CELLS, 5));
}

#[test]
fn every_package_is_placed_exactly_once() {
    let state = base()
        .object(VisualObject::new("p1", "package"))
        .object(VisualObject::new("p2", "package"))
        .object(VisualObject::new("p3", "package"))
        .relation(VisualRelation::new("at", "p1", "dist0"))
        .relation(VisualRelation::new("in-truck", "p1", "t1"))
        .relation(VisualRelation::new("at", "p2", "depot0"))
        .relation(VisualRelation::new("at", "p2", "dist0"))
        .relation(VisualRelation::new("at", "p3", "nowhere"))
        .relation(VisualRelation::new("at", "t1", "depot0"));

    let l = layout(&state, VIEW, &DepotConfig::default());
    let placed = l.placements();
    assert_eq!(placed.get("p1"), Some(&"t1"));
    assert_eq!(placed.get("p2"), Some(&"depot0"));
    assert_eq!(placed.get("p3"), None);
    assert_eq!(placed.get("t1"), None);
    assert_eq!(l.trucks[0].cargo, vec!["p1"]);
    assert!(l.locations[1].packages.is_empty());
}

#[test]
fn truck_without_known_location_is_omitted() {
    let state = RenderedState::new("depot")
        .object(VisualObject::new("d", "depot").at(0.0, 0.0))
        .object(VisualObject::new("t1", "truck"))
        .object(VisualObject::new("t2", "truck"))
        .relation(VisualRelation::new("at-truck", "t2", "elsewhere"));
    assert!(layout(&state, VIEW, &DepotConfig::default()).trucks.is_empty());
}

#[test]
fn small_piles_have_no_overflow_badge() {
    let state = base()
        .relation(VisualRelation::new("at", "p1", "dist0"))
        .relation(VisualRelation::new("at", "p2", "dist0"));
    let rec = record(&state);
    assert_eq!(rec.images(AssetKind::Package).len(), 0);
    assert_eq!(rec.fills_of(AssetKind::Package.placeholder()).len(), 2);
    assert!(rec.texts().iter().all(|t| !t.starts_with('+')));
    assert!(rec.fills_of(BADGE_RED).is_empty());
}

#[test]
fn large_piles_show_three_icons_and_the_remainder() {
    let mut state = base();
    for i in 0..5 {
        state = state.relation(VisualRelation::new("at", format!("p{i}"), "dist0"));
    }
    let rec = record(&state);
    assert_eq!(rec.fills_of(AssetKind::Package.placeholder()).len(), 3);
    assert!(rec.texts().contains(&"+2"));
}

#[test]
fn loaded_truck_gets_count_badge_and_mini_package() {
    let state = base()
        .relation(VisualRelation::new("in-truck", "p1", "t1"))
        .relation(VisualRelation::new("in-truck", "p2", "t1"));
    let rec = record(&state);
    assert_eq!(rec.texts(), vec!["depot0", "dist0", "2"]);
    assert_eq!(rec.fills_of(AssetKind::Truck.placeholder()).len(), 1);
    assert_eq!(rec.fills_of(AssetKind::Package.placeholder()).len(), 1);
    assert_eq!(rec.fills_of(BADGE_RED).len(), 1);
}

#[test]
fn rendering_is_idempotent() {
    let state = base()
        .relation(VisualRelation::new("in-truck", "p1", "t1"))
        .relation(VisualRelation::new("at", "p2", "dist0"));
    assert_eq!(record(&state).commands(), record(&state).commands());
}
