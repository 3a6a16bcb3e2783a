//! Photomosaic assembly by nearest average-color matching
//!
//! The target image is cut into a grid, every cell is reduced to its mean
//! color, and each cell is replaced by the candidate tile whose mean color is
//! closest in RGB space. Matching runs either as a linear scan or against a
//! k-d tree, with or without reusing candidates.

#![forbid(unsafe_code)]

/// Mosaic orchestration and candidate selection policy
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Nearest-color search strategies
pub mod matching;
/// Pixel buffers and average colors
pub mod raster;
/// Grid partitioning and reassembly
pub mod spatial;

pub use algorithm::{MosaicAssembler, MosaicConfig, create_mosaic};
pub use io::error::{MosaicError, Result};
pub use matching::MatchStrategy;
pub use raster::{Color, PixelBuffer};
