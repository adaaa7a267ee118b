use std::collections::HashMap;

use crate::assets::store::AssetKind;
use crate::domains::DrawCtx;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::render::surface::{Geom, Stroke, TextAlign, TextBaseline, TextStyle};
use crate::scene::index::SceneIndex;
use crate::scene::model::RenderedState;

const ROOM_SIZE: Size = Size::new(200.0, 300.0);
const ROOM_COLOR: Color = Color::rgb(0xf0, 0xf0, 0xf0);
const ROBOT_SIZE: f64 = 80.0;
const ARM_OFFSET_X: f64 = 25.0;
const ARM_HEIGHT: f64 = 40.0;
const CLAW_LENGTH: f64 = 24.0;
const OPEN_GAP: f64 = 28.0;
const BAR_HALF: f64 = 18.0;
const BALL_SIZE: f64 = 30.0;
const BALL_COLOR: Color = Color::rgb(0xff, 0x6b, 0x6b);
const ARM_COLOR: Color = Color::rgb(0x79, 0x78, 0x78);
const CLAW_LABEL: Color = Color::rgb(29, 230, 76);

/// A room rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomGeom<'a> {
    /// Room label.
    pub label: &'a str,
    /// Bounds, from the literal top-left position.
    pub rect: Rect,
    /// Fill.
    pub color: Color,
    /// The robot is in this room.
    pub has_robot: bool,
}

/// One claw assembly hanging from the robot body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmGeom {
    /// Horizontal centre of the arm.
    pub x: f64,
    /// Top of the vertical arm (bottom of the body, less a small overlap).
    pub base_y: f64,
    /// Arm length down to the claw bar.
    pub arm_height: f64,
    /// Distance between the two claw fingers.
    pub gap: f64,
    /// Finger length below the bar.
    pub claw_length: f64,
}

impl ArmGeom {
    /// Y of the horizontal claw bar.
    pub fn bar_y(&self) -> f64 {
        self.base_y + self.arm_height
    }
}

/// Robot body plus both arms.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotGeom {
    /// Body bounds, centred on the anchor and raised by the vertical offset.
    pub body: Rect,
    /// Arm at `centre - armOffsetX`. Carries balls whose source names "right".
    pub left: ArmGeom,
    /// Arm at `centre + armOffsetX`. Carries balls whose source names "left".
    pub right: ArmGeom,
}

/// A resolved ball.
#[derive(Clone, Debug, PartialEq)]
pub struct BallGeom<'a> {
    /// Object id.
    pub id: &'a str,
    /// Text drawn in the middle.
    pub label: &'a str,
    /// Centre, overridden when carried.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill.
    pub color: Color,
    /// Snapped under an arm.
    pub carried: bool,
}

/// Resolved gripper frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GripperLayout<'a> {
    /// Rooms in state order.
    pub rooms: Vec<RoomGeom<'a>>,
    /// The robot, when one with a position exists.
    pub robot: Option<RobotGeom>,
    /// Balls in state order.
    pub balls: Vec<BallGeom<'a>>,
}

/// Which arm a carry relation's source text selects.
///
/// The textual hint is inverted: a source mentioning "right" hangs the ball on the left arm and
/// one mentioning "left" on the right arm. Sources naming neither use the left arm.
pub fn arm_for_source(source: &str) -> Side {
    let src = source.to_ascii_lowercase();
    if src.contains("right") {
        Side::Left
    } else if src.contains("left") {
        Side::Right
    } else {
        Side::Left
    }
}

/// Robot arm side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// `centre - armOffsetX`.
    Left,
    /// `centre + armOffsetX`.
    Right,
}

/// Resolve rooms, robot geometry and carried-ball snapping.
pub fn layout<'a>(state: &'a RenderedState, robot_offset_y: f64) -> GripperLayout<'a> {
    let idx = SceneIndex::new(state);

    let rooms = idx
        .objects_of("room")
        .filter_map(|o| {
            let at = o.position?;
            let p = o.props();
            Some(RoomGeom {
                label: o.display_label(),
                rect: Rect::from_origin_size(
                    at,
                    Size::new(
                        p.dim_or("width", ROOM_SIZE.width),
                        p.dim_or("height", ROOM_SIZE.height),
                    ),
                ),
                color: p.color_or("color", ROOM_COLOR),
                has_robot: p.flag("has_robot"),
            })
        })
        .collect();

    let robot = idx
        .objects_of("robot")
        .find_map(|r| Some((r, r.position?)))
        .map(|(r, at)| {
            let p = r.props();
            let w = p.dim_or("width", ROBOT_SIZE);
            let h = p.dim_or("height", ROBOT_SIZE);
            let offset_y = p.f64_any(&["offsetY", "offset_y"]).unwrap_or(robot_offset_y);
            let body = Rect::from_origin_size(
                Point::new(at.x - w / 2.0, at.y - h / 2.0 - offset_y),
                Size::new(w, h),
            );
            let arm_offset = p.f64_any(&["armOffsetX", "arm_offset_x"]).unwrap_or(ARM_OFFSET_X);
            let arm = ArmGeom {
                x: at.x,
                base_y: body.y1 - 10.0,
                arm_height: p.f64_any(&["armHeight", "arm_height"]).unwrap_or(ARM_HEIGHT),
                gap: p.f64_any(&["openGap", "open_gap"]).unwrap_or(OPEN_GAP),
                claw_length: p.f64_any(&["clawLength", "claw_length"]).unwrap_or(CLAW_LENGTH),
            };
            RobotGeom {
                body,
                left: ArmGeom {
                    x: at.x - arm_offset,
                    ..arm
                },
                right: ArmGeom {
                    x: at.x + arm_offset,
                    ..arm
                },
            }
        });

    // Later relations for the same ball win.
    let mut carried: HashMap<&str, Side> = HashMap::new();
    if robot.is_some() {
        for rel in state
            .relations
            .iter()
            .filter(|r| r.is("carry") || r.is("holding"))
        {
            if let Some(ball) = rel.target.as_deref() {
                carried.insert(ball, arm_for_source(&rel.source));
            }
        }
    }

    let balls = idx
        .objects_of("ball")
        .filter_map(|b| {
            let p = b.props();
            let radius = p.dim_or("size", BALL_SIZE) / 2.0;
            let snapped = robot.as_ref().zip(carried.get(b.id.as_str())).map(|(r, side)| {
                let arm = match side {
                    Side::Left => r.left,
                    Side::Right => r.right,
                };
                Point::new(arm.x, arm.bar_y() + arm.claw_length + radius - 10.0)
            });
            let center = match (snapped, b.position) {
                (Some(c), _) => c,
                (None, Some(at)) => at,
                (None, None) => {
                    tracing::debug!(id = %b.id, "ball without position omitted");
                    return None;
                }
            };
            Some(BallGeom {
                id: &b.id,
                label: b.display_label(),
                center,
                radius,
                color: p.color_or("color", BALL_COLOR),
                carried: snapped.is_some(),
            })
        })
        .collect();

    GripperLayout {
        rooms,
        robot,
        balls,
    }
}

fn draw_claw(cx: &mut DrawCtx<'_>, arm: &ArmGeom, label: &str) {
    let s = &mut *cx.surface;
    let bar_y = arm.bar_y();
    s.line(
        Point::new(arm.x, arm.base_y),
        Point::new(arm.x, bar_y - 3.0),
        &Stroke::new(ARM_COLOR, 10.0).round(),
    );
    let thin = Stroke::new(ARM_COLOR, 4.0).round();
    s.line(
        Point::new(arm.x - BAR_HALF, bar_y),
        Point::new(arm.x + BAR_HALF, bar_y),
        &thin,
    );
    for dx in [-arm.gap / 2.0, arm.gap / 2.0] {
        s.line(
            Point::new(arm.x + dx, bar_y),
            Point::new(arm.x + dx, bar_y + arm.claw_length),
            &thin,
        );
    }
    s.fill_text(
        label,
        Point::new(arm.x, bar_y - 4.0),
        &TextStyle::new(14.0, CLAW_LABEL).anchor(TextAlign::Center, TextBaseline::Bottom),
    );
}

/// Draw rooms, then the robot with both claws, then balls.
pub fn draw(layout: &GripperLayout<'_>, cx: &mut DrawCtx<'_>) {
    let room_label = TextStyle::new(16.0, Color::rgb(0x33, 0x33, 0x33))
        .anchor(TextAlign::Center, TextBaseline::Alphabetic);
    for room in &layout.rooms {
        let s = &mut *cx.surface;
        s.fill_rect(room.rect, room.color);
        let edge = if room.has_robot {
            Stroke::new(Color::rgb(0x4c, 0xaf, 0x50), 4.0)
        } else {
            Stroke::new(Color::rgb(0x99, 0x99, 0x99), 2.0)
        };
        s.stroke_rect(room.rect, &edge);
        s.fill_text(
            room.label,
            Point::new(room.rect.center().x, room.rect.y0 + 20.0),
            &room_label,
        );
    }

    if let Some(robot) = &layout.robot {
        cx.asset(AssetKind::Robot, robot.body);
        // Claw letters follow the inverted carry rule.
        draw_claw(cx, &robot.left, "R");
        draw_claw(cx, &robot.right, "L");
    }

    let ball_label = TextStyle::centered(10.0, Color::WHITE);
    for ball in &layout.balls {
        let s = &mut *cx.surface;
        let geom = Geom::circle(ball.center, ball.radius);
        s.fill(&geom, ball.color);
        s.stroke(&geom, &Stroke::new(Color::BLACK, 2.0));
        s.fill_text(ball.label, ball.center, &ball_label);
    }
}

/// Render one gripper state.
pub fn render(state: &RenderedState, cx: &mut DrawCtx<'_>) {
    let layout = layout(state, cx.config.gripper.robot_offset_y);
    draw(&layout, cx);
}

#[cfg(test)]
#[path = "../../tests/unit/domains/gripper.rs"]
mod tests;
