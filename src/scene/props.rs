use crate::foundation::color::Color;
use crate::scene::model::PropertyMap;

/// Typed, lenient reader over an open property bag.
///
/// A value of the wrong JSON type is treated exactly like a missing key, so callers always fall
/// back to their documented default instead of failing.
#[derive(Clone, Copy, Debug)]
pub struct Props<'a> {
    map: &'a PropertyMap,
}

impl<'a> Props<'a> {
    /// Wrap a property map for typed access.
    pub fn new(map: &'a PropertyMap) -> Self {
        Self { map }
    }

    /// Raw JSON value for `key`.
    pub fn raw(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.map.get(key)
    }

    /// Return `true` when `key` is present, whatever its type.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Finite number stored under `key`.
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.map
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// First finite number found among `keys`.
    pub fn f64_any(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.f64(k))
    }

    /// Number under `key`, or `default`.
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.f64(key).unwrap_or(default)
    }

    /// Strictly positive dimension under `key`.
    ///
    /// Zero and negative values count as absent, so an explicit `0` width still draws with the
    /// default size.
    pub fn dim(&self, key: &str) -> Option<f64> {
        self.f64(key).filter(|v| *v > 0.0)
    }

    /// First strictly positive dimension found among `keys`.
    pub fn dim_any(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.dim(k))
    }

    /// Strictly positive dimension under `key`, or `default`.
    pub fn dim_or(&self, key: &str, default: f64) -> f64 {
        self.dim(key).unwrap_or(default)
    }

    /// Boolean stored under `key`.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.map.get(key).and_then(serde_json::Value::as_bool)
    }

    /// `true` only when `key` holds boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.bool(key).unwrap_or(false)
    }

    /// String stored under `key`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).and_then(serde_json::Value::as_str)
    }

    /// Colour parsed from the string stored under `key`. Unparsable strings count as absent.
    pub fn color(&self, key: &str) -> Option<Color> {
        self.str(key).and_then(Color::parse)
    }

    /// Colour under `key`, or `default`.
    pub fn color_or(&self, key: &str, default: Color) -> Color {
        self.color(key).unwrap_or(default)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/props.rs"]
mod tests;
