//! Spatial partitioning of raster buffers
//!
//! Splits a target buffer into a row-major grid of equally sized cells and
//! reassembles a grid of tiles into one buffer.

/// Grid split and assembly
pub mod grid;

pub use grid::{Grid, assemble, split};
