//! Drawing-surface contract and its implementations.
//!
//! Strategies only ever talk to [`surface::Surface`]. Hosts pick the implementation: a
//! [`ops::Recorder`] for inspection and tests, an [`svg::SvgSurface`] for documents, and
//! [`raster`] to turn those documents into pixels.

/// Per-frame orchestration: clear, viewport transform, dispatch, restore.
pub mod frame;
/// Recorded draw commands.
pub mod ops;
/// SVG rasterization and PNG output.
pub mod raster;
/// The primitive drawing API every strategy targets.
pub mod surface;
/// SVG document surface.
pub mod svg;
