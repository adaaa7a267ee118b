use serde::Serialize;

use crate::assets::store::{AssetKind, ImageRef};
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Rect, Size};
use crate::render::surface::{Geom, Stroke, Surface, TextStyle};

/// One primitive call made against a [`Surface`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    /// Surface cleared to a colour.
    Clear {
        /// Background.
        color: Color,
    },
    /// Transform pushed.
    Save,
    /// Transform popped.
    Restore,
    /// Transform post-multiplied, as `[a, b, c, d, e, f]`.
    Transform {
        /// Affine coefficients.
        coeffs: [f64; 6],
    },
    /// Shape filled.
    Fill {
        /// Geometry.
        geom: Geom,
        /// Fill colour.
        color: Color,
    },
    /// Shape outlined.
    Stroke {
        /// Geometry.
        geom: Geom,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Image blitted.
    Image {
        /// Which asset.
        asset: AssetKind,
        /// Destination.
        rect: Rect,
    },
    /// Text drawn.
    Text {
        /// Content.
        text: String,
        /// Anchor point.
        at: Point,
        /// Style.
        style: TextStyle,
    },
}

/// Surface that records every call instead of drawing.
///
/// Used for inspecting frames, for the `ops` CLI subcommand and throughout the tests.
#[derive(Clone, Debug)]
pub struct Recorder {
    size: Size,
    commands: Vec<DrawCmd>,
}

impl Recorder {
    /// Empty recorder reporting the given surface size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Consume the recorder.
    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }

    /// All text runs, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Anchor point of the first text run equal to `text`.
    pub fn text_at(&self, text: &str) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            DrawCmd::Text { text: t, at, .. } if t == text => Some(*at),
            _ => None,
        })
    }

    /// Destination rects of image blits for `asset`.
    pub fn images(&self, asset: AssetKind) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Image { asset: a, rect } if *a == asset => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Geometries filled with exactly `color`.
    pub fn fills_of(&self, color: Color) -> Vec<&Geom> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Fill { geom, color: fc } if *fc == color => Some(geom),
                _ => None,
            })
            .collect()
    }

    /// Stroked geometries whose stroke has exactly `color`.
    pub fn strokes_of(&self, color: Color) -> Vec<(&Geom, &Stroke)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Stroke { geom, stroke } if stroke.color == color => Some((geom, stroke)),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

impl Surface for Recorder {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.push(DrawCmd::Clear { color });
    }

    fn save(&mut self) {
        self.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCmd::Restore);
    }

    fn transform(&mut self, affine: Affine) {
        self.push(DrawCmd::Transform {
            coeffs: affine.as_coeffs(),
        });
    }

    fn fill(&mut self, geom: &Geom, color: Color) {
        self.push(DrawCmd::Fill {
            geom: geom.clone(),
            color,
        });
    }

    fn stroke(&mut self, geom: &Geom, stroke: &Stroke) {
        self.push(DrawCmd::Stroke {
            geom: geom.clone(),
            stroke: stroke.clone(),
        });
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        self.push(DrawCmd::Image {
            asset: image.kind,
            rect,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.push(DrawCmd::Text {
            text: text.to_owned(),
            at,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ops.rs"]
mod tests;
