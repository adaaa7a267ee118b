//! Per-domain geometry strategies.
//!
//! Every strategy runs in two phases: a pure `layout` that resolves all derived positions
//! (held overrides, carried-ball snapping, relation-based placement) into a scratch structure,
//! then `draw`, which only reads that structure. The scene model is never mutated.

use crate::assets::store::{AssetKind, AssetManager, draw_asset};
use crate::config::RenderConfig;
use crate::foundation::core::{Rect, Size};
use crate::render::surface::Surface;

/// Block stacking with a single overhead gripper.
pub mod blocks;
/// Depot/logistics grid with trucks and packages.
pub mod depot;
/// Shape/colour inference for domains without a dedicated strategy.
pub mod generic;
/// Two-armed robot moving balls between rooms.
pub mod gripper;
/// Tower of Hanoi pegs and disks.
pub mod hanoi;
/// Rovers on a waypoint graph.
pub mod rovers;

/// Everything a strategy may touch while drawing one frame.
pub struct DrawCtx<'a> {
    /// Target surface, already carrying the viewport transform.
    pub surface: &'a mut dyn Surface,
    /// Raster assets (possibly still loading).
    pub assets: &'a AssetManager,
    /// Active configuration.
    pub config: &'a RenderConfig,
    /// Extent of world space visible on the surface at the current zoom.
    pub view: Size,
}

impl DrawCtx<'_> {
    /// Draw an asset or its placeholder into `rect`.
    pub fn asset(&mut self, kind: AssetKind, rect: Rect) {
        draw_asset(&mut *self.surface, self.assets, kind, rect);
    }
}
