use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA8 colour.
///
/// Serializes as a CSS string (`#rrggbb`, or `rgba(...)` when translucent) and deserializes from
/// any string [`Color::parse`] accepts, or from an `[r, g, b]` / `[r, g, b, a]` byte array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Near-black used for text drawn on light fills.
    pub const INK: Self = Self::rgb(33, 33, 33);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque colour from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Colour from channels with a `0.0..=1.0` alpha.
    pub fn rgb_alpha(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::rgba(r, g, b, unit_to_u8(alpha))
    }

    /// Parse a CSS-like colour string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`,
    /// `hsl(h, s%, l%)` and a handful of CSS names. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
            return parse_rgb_args(&args);
        }
        if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
            return parse_hsl_args(&args);
        }
        named(&lower)
    }

    /// Convert HSL (`h` in degrees, `s`/`l` in `0.0..=1.0`) to an opaque colour.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = unit_to_u8(l);
            return Self::rgb(v, v, v);
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Self::rgb(
            unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            unit_to_u8(hue_to_rgb(p, q, h)),
            unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Alpha as `0.0..=1.0`.
    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Return `true` when the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS string: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            self.to_hex_rgb()
        } else {
            format!(
                "rgba({},{},{},{})",
                self.r,
                self.g,
                self.b,
                trim_float(self.alpha())
            )
        }
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(self) -> f64 {
        fn lin(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * lin(self.r) + 0.7152 * lin(self.g) + 0.0722 * lin(self.b)
    }

    /// Text colour with the higher contrast ratio against `self` (dark ink or white).
    pub fn contrasting_text(self) -> Self {
        let l = self.relative_luminance();
        let contrast_white = 1.05 / (l + 0.05);
        let contrast_ink = (l + 0.05) / (Self::INK.relative_luminance() + 0.05);
        if contrast_ink >= contrast_white {
            Self::INK
        } else {
            Self::WHITE
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => Self::parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid colour \"{s}\""))),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "colour array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |pair: &str| u8::from_str_radix(pair, 16).ok();
    let nibble = |c: &str| byte(c).map(|v| v * 17);

    match hex.len() {
        3 => Some(Color::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        6 => Some(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => Some(Color::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn function_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start().strip_prefix('(')?;
    let inner = inner.strip_suffix(')')?;
    Some(
        inner
            .split([',', ' ', '/'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn parse_channel(s: &str) -> Option<u8> {
    if let Some(pct) = s.strip_suffix('%') {
        let v: f64 = pct.parse().ok()?;
        return Some(unit_to_u8(v / 100.0));
    }
    let v: f64 = s.parse().ok()?;
    Some(v.clamp(0.0, 255.0).round() as u8)
}

fn parse_unit(s: &str) -> Option<f64> {
    if let Some(pct) = s.strip_suffix('%') {
        return pct.parse::<f64>().ok().map(|v| v / 100.0);
    }
    s.parse().ok()
}

fn parse_rgb_args(args: &[String]) -> Option<Color> {
    match args {
        [r, g, b] => Some(Color::rgb(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?)),
        [r, g, b, a] => Some(Color::rgb_alpha(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_unit(a)?,
        )),
        _ => None,
    }
}

fn parse_hsl_args(args: &[String]) -> Option<Color> {
    let (h, s, l, a) = match args {
        [h, s, l] => (h, s, l, None),
        [h, s, l, a] => (h, s, l, Some(a)),
        _ => return None,
    };
    let h: f64 = h.trim_end_matches("deg").parse().ok()?;
    let mut c = Color::from_hsl(h, parse_unit(s)?, parse_unit(l)?);
    if let Some(a) = a {
        c.a = unit_to_u8(parse_unit(a)?);
    }
    Some(c)
}

fn named(s: &str) -> Option<Color> {
    let c = match s {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "brown" => Color::rgb(165, 42, 42),
        "pink" => Color::rgb(255, 192, 203),
        "cyan" => Color::rgb(0, 255, 255),
        "magenta" => Color::rgb(255, 0, 255),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "gold" => Color::rgb(255, 215, 0),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
