//! Raster data structures and color reduction
//!
//! This module contains the pixel-level building blocks:
//! - Immutable RGB pixel buffers generic over the channel type
//! - Mean colors and buffer averaging

/// Pixel buffer storage and cropping
pub mod buffer;
/// Average color computation
pub mod color;

pub use buffer::{Channel, PixelBuffer};
pub use color::{Color, average};
