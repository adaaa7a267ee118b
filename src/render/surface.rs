use serde::Serialize;

use crate::assets::store::ImageRef;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};

/// Geometry accepted by [`Surface::fill`] and [`Surface::stroke`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geom {
    /// Axis-aligned rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
    },
    /// Rectangle with circular corners.
    RoundRect {
        /// Bounds.
        rect: Rect,
        /// Corner radius, clamped to half the shorter side when drawn.
        radius: f64,
    },
    /// Full circle.
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Centre.
        center: Point,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Open polyline.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
    },
}

impl Geom {
    /// Rectangle geometry.
    pub fn rect(rect: Rect) -> Self {
        Self::Rect { rect }
    }

    /// Rounded rectangle geometry; the radius is clamped to fit.
    pub fn round_rect(rect: Rect, radius: f64) -> Self {
        let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
        Self::RoundRect { rect, radius }
    }

    /// Circle geometry.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    /// Ellipse geometry.
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        Self::Ellipse { center, rx, ry }
    }

    /// Two-point line.
    pub fn line(a: Point, b: Point) -> Self {
        Self::Polyline { points: vec![a, b] }
    }

    /// Closed polygon.
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::Polygon { points }
    }

    /// Axis-aligned bounds of the geometry.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { rect } | Self::RoundRect { rect, .. } => *rect,
            Self::Circle { center, radius } => {
                Rect::from_center_size(*center, Size::new(radius * 2.0, radius * 2.0))
            }
            Self::Ellipse { center, rx, ry } => {
                Rect::from_center_size(*center, Size::new(rx * 2.0, ry * 2.0))
            }
            Self::Polyline { points } | Self::Polygon { points } => {
                let mut it = points.iter();
                let Some(first) = it.next() else {
                    return Rect::ZERO;
                };
                it.fold(Rect::from_points(*first, *first), |r, p| {
                    r.union_pt(*p)
                })
            }
        }
    }
}

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat end at the vertex.
    #[default]
    Butt,
    /// Semicircular end.
    Round,
    /// Square end extending past the vertex.
    Square,
}

/// Stroke style: colour, width, dash pattern and cap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    /// Stroke colour.
    pub color: Color,
    /// Line width in world units.
    pub width: f64,
    /// Dash pattern (on/off lengths). Empty means solid.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
    /// End-cap style.
    pub cap: LineCap,
}

impl Stroke {
    /// Solid stroke with butt caps.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
            cap: LineCap::Butt,
        }
    }

    /// Builder: dash pattern.
    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dash = pattern.to_vec();
        self
    }

    /// Builder: round caps.
    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Anchor at the start of the run.
    #[default]
    Left,
    /// Anchor at the middle of the run.
    Center,
    /// Anchor at the end of the run.
    Right,
}

/// Vertical text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    /// Anchor at the top of the em box.
    Top,
    /// Anchor at the vertical middle.
    Middle,
    /// Anchor at the bottom of the em box.
    Bottom,
    /// Anchor at the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// Text run style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in world units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Fill colour.
    pub color: Color,
    /// Horizontal anchoring.
    pub align: TextAlign,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Regular left/alphabetic text.
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Centered on both axes, the common label layout.
    pub fn centered(size: f64, color: Color) -> Self {
        Self::new(size, color).anchor(TextAlign::Center, TextBaseline::Middle)
    }

    /// Builder: bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: anchoring.
    pub fn anchor(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }
}

/// Approximate advance width of `text` at `size`, for layout decisions such as label chips.
///
/// Surfaces do not expose font metrics; this uses an average glyph width of 0.6 em.
pub fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}

/// Two-dimensional drawing surface.
///
/// The primitive set: filled and stroked shapes (with dash patterns), raster image blits, text
/// with alignment and baseline control, and a save/restore affine transform stack. Any canvas,
/// rasterizer or vector backend that provides these can host the engine.
pub trait Surface {
    /// Surface extent in device units.
    fn size(&self) -> Size;

    /// Discard previous content and fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop to the transform at the matching [`Surface::save`].
    fn restore(&mut self);

    /// Post-multiply the current transform by `affine`.
    fn transform(&mut self, affine: Affine);

    /// Fill `geom` with `color`.
    fn fill(&mut self, geom: &Geom, color: Color);

    /// Stroke the outline of `geom`.
    fn stroke(&mut self, geom: &Geom, stroke: &Stroke);

    /// Blit `image` scaled into `rect`.
    fn draw_image(&mut self, image: &ImageRef, rect: Rect);

    /// Draw `text` anchored at `at`.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Translate subsequent drawing.
    fn translate(&mut self, v: Vec2) {
        self.transform(Affine::translate(v));
    }

    /// Uniformly scale subsequent drawing.
    fn scale(&mut self, s: f64) {
        self.transform(Affine::scale(s));
    }

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill(&Geom::rect(rect), color);
    }

    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.stroke(&Geom::rect(rect), stroke);
    }

    /// Stroke a single segment.
    fn line(&mut self, a: Point, b: Point, stroke: &Stroke) {
        self.stroke(&Geom::line(a, b), stroke);
    }

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill(&Geom::circle(center, radius), color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
