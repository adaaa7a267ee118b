use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::domains::depot::MAX_GRID_CELLS;
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlanvizError, PlanvizResult};

/// Environment variable that overrides [`AssetConfig::dir`].
pub const ASSET_DIR_ENV: &str = "PLANVIZ_ASSET_DIR";

/// Largest accepted rovers cell step.
pub const MAX_CELL_STEP: u32 = 16;

/// Everything that tunes a renderer context. Every section falls back to its defaults when
/// omitted from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Clear colour for every frame.
    pub background: Color,
    /// Pan/zoom limits.
    pub viewport: ViewportConfig,
    /// Raster asset location.
    pub assets: AssetConfig,
    /// Transient overlays.
    pub effects: EffectConfig,
    /// Gripper strategy tuning.
    pub gripper: GripperConfig,
    /// Depot strategy tuning.
    pub depot: DepotConfig,
    /// Rovers strategy tuning.
    pub rovers: RoversConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Color::rgb(0xf8, 0xf9, 0xfa),
            viewport: ViewportConfig::default(),
            assets: AssetConfig::default(),
            effects: EffectConfig::default(),
            gripper: GripperConfig::default(),
            depot: DepotConfig::default(),
            rovers: RoversConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> PlanvizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no frame can be drawn with.
    pub fn validate(&self) -> PlanvizResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(PlanvizError::validation("canvas width/height must be > 0"));
        }
        let v = &self.viewport;
        if !(v.min_scale.is_finite() && v.max_scale.is_finite()) || v.min_scale <= 0.0 {
            return Err(PlanvizError::validation("viewport.min_scale must be > 0"));
        }
        if v.min_scale > v.max_scale {
            return Err(PlanvizError::validation(
                "viewport.min_scale must be <= viewport.max_scale",
            ));
        }
        if !v.zoom_step.is_finite() || v.zoom_step <= 0.0 {
            return Err(PlanvizError::validation("viewport.zoom_step must be > 0"));
        }
        if self.effects.capture_marker.is_empty() {
            return Err(PlanvizError::validation("effects.capture_marker must not be empty"));
        }
        if self.depot.min_cols == 0 || self.depot.min_rows == 0 {
            return Err(PlanvizError::validation("depot.min_cols/min_rows must be > 0"));
        }
        if self.depot.min_cols > MAX_GRID_CELLS || self.depot.min_rows > MAX_GRID_CELLS {
            return Err(PlanvizError::validation(format!(
                "depot.min_cols/min_rows must be <= {MAX_GRID_CELLS}"
            )));
        }
        let steps = [self.rovers.cell_step_x, self.rovers.cell_step_y];
        if steps.iter().any(|s| !(1..=MAX_CELL_STEP).contains(s)) {
            return Err(PlanvizError::validation(format!(
                "rovers.cell_step_x/cell_step_y must be in 1..={MAX_CELL_STEP}"
            )));
        }
        if !self.gripper.robot_offset_y.is_finite() {
            return Err(PlanvizError::validation("gripper.robot_offset_y must be finite"));
        }
        Ok(())
    }
}

/// Zoom limits and step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Smallest scale factor.
    pub min_scale: f64,
    /// Largest scale factor.
    pub max_scale: f64,
    /// Additive change per zoom step.
    pub zoom_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            zoom_step: 0.1,
        }
    }
}

/// Where raster assets live.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding `robot.png`, `truck.png` and friends. `None` draws placeholders only.
    pub dir: Option<PathBuf>,
}

impl AssetConfig {
    /// The configured directory, overridden by `PLANVIZ_ASSET_DIR` when that is set and non-empty.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        match std::env::var_os(ASSET_DIR_ENV) {
            Some(v) if !v.is_empty() => Some(PathBuf::from(v)),
            _ => self.dir.clone(),
        }
    }
}

/// Transient overlay timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// How long the rover camera flash stays visible.
    pub camera_flash_ms: u64,
    /// Action prefix that triggers the flash.
    pub capture_marker: String,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            camera_flash_ms: 1000,
            capture_marker: "(take-image".to_owned(),
        }
    }
}

/// Gripper domain tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripperConfig {
    /// How far the robot body is raised above its anchor, unless the robot overrides it.
    pub robot_offset_y: f64,
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            robot_offset_y: 70.0,
        }
    }
}

/// Depot domain tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    /// Minimum grid columns.
    pub min_cols: u32,
    /// Minimum grid rows.
    pub min_rows: u32,
    /// Package icons drawn per cell before the overflow badge takes over.
    pub max_visible_packages: u32,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            min_cols: 8,
            min_rows: 5,
            max_visible_packages: 3,
        }
    }
}

/// Rovers domain tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoversConfig {
    /// Grid cells between neighbouring waypoint columns.
    pub cell_step_x: u32,
    /// Grid cells between neighbouring waypoint rows.
    pub cell_step_y: u32,
}

impl Default for RoversConfig {
    fn default() -> Self {
        Self {
            cell_step_x: 3,
            cell_step_y: 2,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
