//! Shared primitives: geometry re-exports, colours, hashing and the error taxonomy.

/// Colour parsing, conversion and contrast helpers.
pub mod color;
/// Geometry types shared by every strategy.
pub mod core;
/// Error taxonomy used at IO and parsing edges.
pub mod error;
pub(crate) mod math;
