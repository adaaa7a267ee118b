use super::*;
use crate::assets::store::{AssetKind, AssetManager};
use crate::config::RenderConfig;
use crate::effects::ManualClock;
use crate::foundation::core::Size;
use crate::render::ops::Recorder;
use crate::scene::model::{VisualObject, VisualRelation};

fn draw_with(dispatcher: &mut Dispatcher, state: &RenderedState) -> Recorder {
    let config = RenderConfig::default();
    let assets = AssetManager::placeholders_only();
    let view = Size::new(800.0, 600.0);
    let mut rec = Recorder::new(view);
    let mut cx = DrawCtx {
        surface: &mut rec,
        assets: &assets,
        config: &config,
        view,
    };
    dispatcher.draw(state, &mut cx);
    rec
}

fn capture_state() -> RenderedState {
    RenderedState::new("rovers")
        .object(VisualObject::new("waypoint0", "waypoint"))
        .relation(VisualRelation::new("at-rover", "rover0", "waypoint0"))
        .with_action("(take-image rover0 objective0 waypoint0 camera0)")
}

fn camera_drawn(rec: &Recorder) -> bool {
    !rec.fills_of(AssetKind::Camera.placeholder()).is_empty()
}

#[test]
fn tags_resolve_case_insensitively_with_aliases() {
    assert_eq!(resolve("blocks-world"), Domain::BlocksWorld);
    assert_eq!(resolve("BlocksWorld"), Domain::BlocksWorld);
    assert_eq!(resolve("  depots "), Domain::Depot);
    assert_eq!(resolve("Towers-Of-Hanoi"), Domain::Hanoi);
    assert_eq!(resolve("rover"), Domain::Rovers);
    assert_eq!(resolve("gripper"), Domain::Gripper);
    assert_eq!(resolve("logistics"), Domain::Generic);
    assert_eq!(resolve(""), Domain::Generic);
}

#[test]
fn each_dedicated_domain_has_one_canonical_tag() {
    for domain in [
        Domain::BlocksWorld,
        Domain::Gripper,
        Domain::Depot,
        Domain::Hanoi,
        Domain::Rovers,
    ] {
        let canonical: Vec<&str> = registry()
            .iter()
            .filter(|r| r.domain == domain && r.canonical)
            .map(|r| r.tag)
            .collect();
        assert_eq!(canonical, vec![domain.tag()]);
    }
    assert!(registry().iter().all(|r| r.domain != Domain::Generic));
}

#[test]
fn camera_flash_expires_on_the_injected_clock() {
    let clock = Arc::new(ManualClock::new());
    let mut dispatcher = Dispatcher::new(clock.clone());
    let state = capture_state();

    assert!(camera_drawn(&draw_with(&mut dispatcher, &state)));
    clock.advance(Duration::from_millis(999));
    assert!(camera_drawn(&draw_with(&mut dispatcher, &state)));
    clock.advance(Duration::from_millis(1));
    assert!(!camera_drawn(&draw_with(&mut dispatcher, &state)));
}

#[test]
fn reset_effects_allows_the_same_action_to_flash_again() {
    let clock = Arc::new(ManualClock::new());
    let mut dispatcher = Dispatcher::new(clock.clone());
    let state = capture_state();

    draw_with(&mut dispatcher, &state);
    clock.advance(Duration::from_secs(5));
    assert!(!camera_drawn(&draw_with(&mut dispatcher, &state)));

    dispatcher.reset_effects();
    assert!(camera_drawn(&draw_with(&mut dispatcher, &state)));
}

#[test]
fn other_domains_leave_the_flash_untouched() {
    let mut dispatcher = Dispatcher::new(Arc::new(ManualClock::new()));
    let state = RenderedState::new("hanoi").with_action("(take-image a b c d)");
    draw_with(&mut dispatcher, &state);
    assert_eq!(dispatcher.camera_flash(), &CameraFlash::default());
}

#[test]
fn routes_to_the_generic_strategy_for_unknown_tags() {
    let mut dispatcher = Dispatcher::default();
    let rec = draw_with(&mut dispatcher, &RenderedState::new("satellite"));
    assert_eq!(rec.texts()[0], "Domain: satellite");
}
