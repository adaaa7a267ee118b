use super::*;
use crate::assets::store::AssetManager;
use crate::config::RenderConfig;
use crate::render::ops::Recorder;
use crate::scene::model::{VisualObject, VisualRelation};

fn record(state: &RenderedState) -> Recorder {
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
    render(state, &mut cx);
    rec
}

fn scene() -> RenderedState {
    RenderedState::new("gripper")
        .object(VisualObject::new("rooma", "room").at(0.0, 0.0).with("has_robot", true))
        .object(VisualObject::new("robby", "robot").at(300.0, 200.0))
}

#[test]
fn source_hint_is_inverted() {
    assert_eq!(arm_for_source("left"), Side::Right);
    assert_eq!(arm_for_source("Right-Gripper"), Side::Left);
    assert_eq!(arm_for_source("robby"), Side::Left);
}

#[test]
fn robot_body_and_arms_follow_the_anchor() {
    let state = scene();
    let l = layout(&state, 70.0);
    let robot = l.robot.unwrap();
    assert_eq!(robot.body, Rect::new(260.0, 90.0, 340.0, 170.0));
    assert_eq!(robot.left.x, 275.0);
    assert_eq!(robot.right.x, 325.0);
    assert_eq!(robot.left.bar_y(), 200.0);

    let raised = layout(&state, 0.0).robot.unwrap();
    assert_eq!(raised.body.y0, 160.0);
}

#[test]
fn carry_from_left_snaps_under_the_right_arm() {
    let state = scene()
        .object(VisualObject::new("ball1", "ball").at(50.0, 250.0))
        .relation(VisualRelation::new("carry", "left", "ball1"));

    let l = layout(&state, 70.0);
    let ball = &l.balls[0];
    assert!(ball.carried);
    assert_eq!(ball.center, Point::new(325.0, 229.0));
}

#[test]
fn later_carry_relation_wins() {
    let state = scene()
        .object(VisualObject::new("ball1", "ball").at(50.0, 250.0))
        .relation(VisualRelation::new("carry", "left", "ball1"))
        .relation(VisualRelation::new("holding", "right", "ball1"));

    assert_eq!(layout(&state, 70.0).balls[0].center.x, 275.0);
}

#[test]
fn carried_ball_without_position_still_draws() {
    let state = scene()
        .object(VisualObject::new("ball1", "ball"))
        .object(VisualObject::new("ball2", "ball"))
        .relation(VisualRelation::new("carry", "robby", "ball1"));

    let l = layout(&state, 70.0);
    let ids: Vec<&str> = l.balls.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["ball1"]);
    assert_eq!(l.balls[0].center.x, 275.0);
}

#[test]
fn without_a_robot_balls_keep_their_position() {
    let state = RenderedState::new("gripper")
        .object(VisualObject::new("ball1", "ball").at(10.0, 20.0).with("size", 40.0))
        .relation(VisualRelation::new("carry", "left", "ball1"));

    let l = layout(&state, 70.0);
    assert!(l.robot.is_none());
    assert!(!l.balls[0].carried);
    assert_eq!(l.balls[0].center, Point::new(10.0, 20.0));
    assert_eq!(l.balls[0].radius, 20.0);
}

#[test]
fn draws_rooms_robot_placeholder_claw_labels_and_balls() {
    let state = scene()
        .object(VisualObject::new("ball1", "ball").at(50.0, 250.0).labeled("b1"));
    let rec = record(&state);

    assert_eq!(rec.texts(), vec!["rooma", "R", "L", "b1"]);
    assert_eq!(rec.text_at("R"), Some(Point::new(275.0, 196.0)));
    assert_eq!(rec.fills_of(AssetKind::Robot.placeholder()).len(), 1);
    assert_eq!(rec.fills_of(BALL_COLOR).len(), 1);
    let robot_room: Vec<f64> = rec
        .strokes_of(Color::rgb(0x4c, 0xaf, 0x50))
        .iter()
        .map(|(_, s)| s.width)
        .collect();
    assert_eq!(robot_room, vec![4.0]);
}

#[test]
fn rendering_is_idempotent() {
    let state = scene()
        .object(VisualObject::new("ball1", "ball"))
        .relation(VisualRelation::new("carry", "left", "ball1"));
    assert_eq!(record(&state).commands(), record(&state).commands());
}
