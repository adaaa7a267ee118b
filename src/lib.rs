//! planviz renders symbolic planning states into domain-specific 2D scenes.
//!
//! A planner produces a trace of states (objects, relations, metadata). planviz turns each
//! state into drawing operations against a [`Surface`]: one strategy per known domain
//! (blocks-world, gripper, depot, hanoi, rovers) plus a generic fallback that infers shapes and
//! colours from property bags. The public API is context-oriented:
//!
//! - Load a [`PlanTrace`]
//! - Create a [`RendererContext`] from a [`RenderConfig`]
//! - Render frames onto any [`Surface`], or wrap both in a [`RenderSession`] for SVG/PNG output
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Named raster assets with placeholder fallback.
pub mod assets;
/// Renderer configuration.
pub mod config;
/// Per-instance renderer state.
pub mod context;
/// Domain tag registry and strategy routing.
pub mod dispatch;
/// Per-domain geometry strategies.
pub mod domains;
/// Time-based overlays.
pub mod effects;
/// Shared foundations: geometry, colour, errors.
pub mod foundation;
/// Drawing surfaces and frame orchestration.
pub mod render;
/// The state data contract.
pub mod scene;
/// Trace-level rendering and playback.
pub mod session;
/// Pan/zoom transform.
pub mod viewport;

pub use crate::assets::store::{AssetKind, AssetManager};
pub use crate::config::RenderConfig;
pub use crate::context::RendererContext;
pub use crate::dispatch::{Dispatcher, Domain};
pub use crate::effects::{Clock, ManualClock, SystemClock};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{PlanvizError, PlanvizResult};
pub use crate::render::ops::{DrawCmd, Recorder};
pub use crate::render::surface::Surface;
pub use crate::render::svg::SvgSurface;
pub use crate::scene::model::{PlanTrace, RenderedState, VisualObject, VisualRelation};
pub use crate::session::{Playback, RenderSession};
pub use crate::viewport::Viewport;
