//! Brute-force nearest color search

use bitvec::slice::BitSlice;

use crate::io::error::{MosaicError, Result};
use crate::matching::index::{MatchResult, NearestColorIndex, is_consumed};
use crate::raster::color::Color;

/// Scans every reference color for each query
///
/// O(N·M) for N queries over M references. On equal distances the
/// earliest reference wins.
#[derive(Debug, Clone)]
pub struct LinearIndex {
    references: Vec<Color>,
}

impl LinearIndex {
    /// Create a linear index over `references`
    ///
    /// # Errors
    ///
    /// Returns `EmptyReferenceSet` if `references` is empty
    pub fn new(references: &[Color]) -> Result<Self> {
        if references.is_empty() {
            return Err(MosaicError::EmptyReferenceSet);
        }
        Ok(Self {
            references: references.to_vec(),
        })
    }

    /// Reference colors in index order
    pub fn references(&self) -> &[Color] {
        &self.references
    }
}

impl NearestColorIndex for LinearIndex {
    fn len(&self) -> usize {
        self.references.len()
    }

    fn nearest_excluding(&self, target: Color, consumed: &BitSlice) -> Option<MatchResult> {
        let mut best: Option<MatchResult> = None;

        for (index, reference) in self.references.iter().enumerate() {
            if is_consumed(consumed, index) {
                continue;
            }
            let distance_squared = target.distance_squared(reference);
            // Strict comparison keeps the first of several equidistant references
            if best.is_none_or(|current| distance_squared < current.distance_squared) {
                best = Some(MatchResult {
                    index,
                    distance_squared,
                });
            }
        }

        best
    }
}
