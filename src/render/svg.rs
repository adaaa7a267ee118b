use std::fmt::Write as _;

use crate::assets::store::ImageRef;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Rect, Size};
use crate::render::surface::{Geom, LineCap, Stroke, Surface, TextAlign, TextBaseline, TextStyle};

const FONT_FAMILY: &str = "sans-serif";

/// Surface that serializes drawing into a standalone SVG document.
///
/// Transforms become nested `<g transform>` groups; `restore` closes every group opened since
/// the matching `save`. Images reference their files by absolute path.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    size: Size,
    body: String,
    open_groups: usize,
    saves: Vec<usize>,
}

impl SvgSurface {
    /// Empty document of the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
            open_groups: 0,
            saves: Vec::new(),
        }
    }

    /// Close any open groups and return the complete document.
    pub fn finish(mut self) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>");
        }
        let (w, h) = (num(self.size.width), num(self.size.height));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{}</svg>\n",
            self.body
        )
    }

    fn shape(&mut self, geom: &Geom, paint: &str) {
        let b = &mut self.body;
        // write! into a String cannot fail.
        let _ = match geom {
            Geom::Rect { rect } => write!(
                b,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{paint}/>",
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height())
            ),
            Geom::RoundRect { rect, radius } => write!(
                b,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"{paint}/>",
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height()),
                r = num(*radius)
            ),
            Geom::Circle { center, radius } => write!(
                b,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{paint}/>",
                num(center.x),
                num(center.y),
                num(*radius)
            ),
            Geom::Ellipse { center, rx, ry } => write!(
                b,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{paint}/>",
                num(center.x),
                num(center.y),
                num(*rx),
                num(*ry)
            ),
            Geom::Polyline { points } => {
                write!(b, "<polyline points=\"{}\"{paint}/>", points_attr(points))
            }
            Geom::Polygon { points } => {
                write!(b, "<polygon points=\"{}\"{paint}/>", points_attr(points))
            }
        };
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.body.clear();
        self.open_groups = 0;
        self.saves.clear();
        let rect = Rect::from_origin_size(Point::ORIGIN, self.size);
        self.fill(&Geom::rect(rect), color);
    }

    fn save(&mut self) {
        self.saves.push(self.open_groups);
    }

    fn restore(&mut self) {
        let Some(target) = self.saves.pop() else {
            return;
        };
        while self.open_groups > target {
            self.body.push_str("</g>");
            self.open_groups -= 1;
        }
    }

    fn transform(&mut self, affine: Affine) {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        let _ = write!(
            self.body,
            "<g transform=\"matrix({} {} {} {} {} {})\">",
            num(a),
            num(b),
            num(c),
            num(d),
            num(e),
            num(f)
        );
        self.open_groups += 1;
    }

    fn fill(&mut self, geom: &Geom, color: Color) {
        let mut paint = format!(" fill=\"{}\"", color.to_hex_rgb());
        if !color.is_opaque() {
            let _ = write!(paint, " fill-opacity=\"{}\"", num(color.alpha()));
        }
        self.shape(geom, &paint);
    }

    fn stroke(&mut self, geom: &Geom, stroke: &Stroke) {
        let mut paint = format!(
            " fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
            stroke.color.to_hex_rgb(),
            num(stroke.width)
        );
        if !stroke.color.is_opaque() {
            let _ = write!(paint, " stroke-opacity=\"{}\"", num(stroke.color.alpha()));
        }
        if !stroke.dash.is_empty() {
            let dash: Vec<String> = stroke.dash.iter().map(|d| num(*d)).collect();
            let _ = write!(paint, " stroke-dasharray=\"{}\"", dash.join(" "));
        }
        match stroke.cap {
            LineCap::Butt => {}
            LineCap::Round => paint.push_str(" stroke-linecap=\"round\""),
            LineCap::Square => paint.push_str(" stroke-linecap=\"square\""),
        }
        self.shape(geom, &paint);
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        let _ = write!(
            self.body,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
             preserveAspectRatio=\"none\" xlink:href=\"{}\"/>",
            num(rect.x0),
            num(rect.y0),
            num(rect.width()),
            num(rect.height()),
            escape(&image.path.to_string_lossy())
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" fill=\"{}\"",
            num(at.x),
            num(at.y),
            num(style.size),
            style.color.to_hex_rgb()
        );
        if !style.color.is_opaque() {
            let _ = write!(self.body, " fill-opacity=\"{}\"", num(style.color.alpha()));
        }
        if style.bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        match style.align {
            TextAlign::Left => {}
            TextAlign::Center => self.body.push_str(" text-anchor=\"middle\""),
            TextAlign::Right => self.body.push_str(" text-anchor=\"end\""),
        }
        match style.baseline {
            TextBaseline::Alphabetic => {}
            TextBaseline::Top => self.body.push_str(" dominant-baseline=\"hanging\""),
            TextBaseline::Middle => self.body.push_str(" dominant-baseline=\"central\""),
            TextBaseline::Bottom => self.body.push_str(" dominant-baseline=\"text-after-edge\""),
        }
        let _ = write!(self.body, ">{}</text>", escape(text));
    }
}

/// Compact number formatting: at most two decimals, no trailing zeros.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
