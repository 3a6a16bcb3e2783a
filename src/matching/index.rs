//! Shared contract for nearest-color lookups

use bitvec::slice::BitSlice;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::io::error::{MosaicError, Result};
use crate::matching::{kdtree::KdTree, linear::LinearIndex};
use crate::raster::color::Color;

/// Nearest reference for one query color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    /// Index of the reference color in the order it was supplied
    pub index: usize,
    /// Squared RGB distance between query and reference
    pub distance_squared: f64,
}

impl MatchResult {
    /// Whether this result should replace `best`
    ///
    /// Smaller distances win; equal distances go to the lower index.
    pub fn beats(&self, best: Option<&Self>) -> bool {
        best.is_none_or(|best| {
            self.distance_squared
                .total_cmp(&best.distance_squared)
                .then(self.index.cmp(&best.index))
                .is_lt()
        })
    }
}

/// Search strategy used to resolve cell colors to candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Scan every reference for every query
    #[default]
    Linear,
    /// Query a k-d tree built once over the references
    Indexed,
}

/// Answers nearest-neighbor queries over a fixed set of reference colors
pub trait NearestColorIndex: Send + Sync {
    /// Number of reference colors
    fn len(&self) -> usize;

    /// Whether the index holds no references
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest reference whose bit in `consumed` is not set
    ///
    /// Indices past the end of `consumed` count as available. Returns `None`
    /// when every reference is consumed.
    fn nearest_excluding(&self, target: Color, consumed: &BitSlice) -> Option<MatchResult>;

    /// Nearest reference over the whole set
    fn nearest(&self, target: Color) -> Option<MatchResult> {
        self.nearest_excluding(target, BitSlice::empty())
    }

    /// Resolve every target, preserving order
    ///
    /// Queries run in parallel against the immutable index.
    ///
    /// # Errors
    ///
    /// Returns `EmptyReferenceSet` if the index holds no references
    fn query(&self, targets: &[Color]) -> Result<Vec<MatchResult>> {
        targets
            .par_iter()
            .map(|&target| self.nearest(target).ok_or(MosaicError::EmptyReferenceSet))
            .collect()
    }
}

/// Build the index for `strategy` over `references`
///
/// # Errors
///
/// Returns `EmptyReferenceSet` if `references` is empty
pub fn build_index(
    strategy: MatchStrategy,
    references: &[Color],
) -> Result<Box<dyn NearestColorIndex>> {
    Ok(match strategy {
        MatchStrategy::Linear => Box::new(LinearIndex::new(references)?),
        MatchStrategy::Indexed => Box::new(KdTree::build(references)?),
    })
}

pub(crate) fn is_consumed(consumed: &BitSlice, index: usize) -> bool {
    consumed.get(index).is_some_and(|bit| *bit)
}
