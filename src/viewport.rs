use crate::config::ViewportConfig;
use crate::foundation::core::{Affine, Point, Size, Vec2};

/// Pan/zoom state applied before every frame.
///
/// The mapping is `screen = offset + world * scale`. Zoom steps are additive and clamped to the
/// configured range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    limits: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// Identity viewport with the given limits.
    pub fn new(limits: ViewportConfig) -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            limits,
        }
    }

    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current translation in screen units.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Shift by a drag delta in screen units.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.offset += Vec2::new(dx, dy);
        }
    }

    /// One discrete step closer.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + self.limits.zoom_step);
    }

    /// One discrete step further.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - self.limits.zoom_step);
    }

    /// Set the scale directly, clamped to the configured range. Non-finite input is ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        // Round away accumulated float error from repeated additive steps.
        let s = (scale * 1e9).round() / 1e9;
        self.scale = s.clamp(self.limits.min_scale, self.limits.max_scale);
    }

    /// Zoom to `scale` keeping the world point under `anchor` (screen units) fixed.
    pub fn zoom_about(&mut self, anchor: Point, scale: f64) {
        let world = self.screen_to_world(anchor);
        self.set_scale(scale);
        self.offset = anchor.to_vec2() - world.to_vec2() * self.scale;
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
    }

    /// World-to-screen affine.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Map a screen point into world coordinates.
    pub fn screen_to_world(&self, p: Point) -> Point {
        self.transform().inverse() * p
    }

    /// Map a world point onto the screen.
    pub fn world_to_screen(&self, p: Point) -> Point {
        self.transform() * p
    }

    /// Extent of world space covered by a surface of `surface` pixels at the current scale.
    pub fn visible_size(&self, surface: Size) -> Size {
        Size::new(surface.width / self.scale, surface.height / self.scale)
    }
}

#[cfg(test)]
#[path = "../tests/unit/viewport.rs"]
mod tests;
