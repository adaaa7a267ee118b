//! The scene model: one symbolic planning state described as objects and relations.
//!
//! Everything here is read-only from the renderer's point of view. Strategies build their own
//! per-frame lookup structures ([`index::SceneIndex`]) instead of mutating the model.

/// Per-frame id and relation lookups.
pub mod index;
/// Boundary data contract (`RenderedState`, `VisualObject`, `VisualRelation`, `PlanTrace`).
pub mod model;
/// Typed, lenient access to open property bags.
pub mod props;
