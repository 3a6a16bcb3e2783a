//! Nearest-neighbor search over reference colors
//!
//! Two interchangeable strategies answer the same queries:
//! - A brute-force linear scan
//! - A static k-d tree built once over the reference set

/// Index trait, match results and strategy selection
pub mod index;
/// Static 3-d tree over reference colors
pub mod kdtree;
/// Brute-force linear scan
pub mod linear;

pub use index::{MatchResult, MatchStrategy, NearestColorIndex, build_index};
pub use kdtree::KdTree;
pub use linear::LinearIndex;
