//! Candidate tiles paired with their average colors
//!
//! In no-reuse mode every pick consumes a candidate. Consumption is tracked by
//! original index in a bit set, so each average stays paired with its tile and
//! two candidates with identical averages are still told apart.

use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::matching::index::{MatchResult, MatchStrategy, NearestColorIndex, build_index};
use crate::raster::buffer::{Channel, PixelBuffer};
use crate::raster::color::{Color, average_all};

/// Ordered (average, tile) pairs with index-based consumption
#[derive(Debug)]
pub struct CandidatePool<'a, T: Channel = u8> {
    tiles: &'a [PixelBuffer<T>],
    averages: Vec<Color>,
    consumed: BitVec,
}

impl<'a, T: Channel> CandidatePool<'a, T> {
    /// Create a pool, averaging every tile in parallel
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if any tile has no pixels
    pub fn new(tiles: &'a [PixelBuffer<T>]) -> Result<Self> {
        let averages = average_all(tiles)?;
        Self::from_parts(tiles, averages)
    }

    /// Create a pool from tiles and their precomputed averages
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the two sequences differ in length
    pub fn from_parts(tiles: &'a [PixelBuffer<T>], averages: Vec<Color>) -> Result<Self> {
        if tiles.len() != averages.len() {
            return Err(MosaicError::ShapeMismatch {
                expected: tiles.len(),
                actual: averages.len(),
            });
        }

        Ok(Self {
            tiles,
            consumed: BitVec::repeat(false, tiles.len()),
            averages,
        })
    }

    /// Total number of candidates, consumed or not
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the pool was created without candidates
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of candidates not yet consumed
    pub fn remaining(&self) -> usize {
        self.consumed.count_zeros()
    }

    /// Average colors in candidate order
    pub fn averages(&self) -> &[Color] {
        &self.averages
    }

    /// Tile at `index`
    pub fn tile(&self, index: usize) -> Option<&'a PixelBuffer<T>> {
        self.tiles.get(index)
    }

    /// Consumption flags in candidate order
    pub fn consumed(&self) -> &BitSlice {
        &self.consumed
    }

    /// Whether the candidate at `index` has been consumed
    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.get(index).is_some_and(|bit| *bit)
    }

    /// Build a nearest-color index over every candidate average
    ///
    /// # Errors
    ///
    /// Returns `EmptyReferenceSet` if the pool is empty
    pub fn build_index(&self, strategy: MatchStrategy) -> Result<Box<dyn NearestColorIndex>> {
        build_index(strategy, &self.averages)
    }

    /// Mark the candidate at `index` as used and return its tile
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the index is out of range or the
    /// candidate was already consumed
    pub fn consume(&mut self, index: usize) -> Result<&'a PixelBuffer<T>> {
        let tile = self
            .tiles
            .get(index)
            .ok_or_else(|| invalid_parameter("index", &index, &"no such candidate"))?;
        if self.consumed.replace(index, true) {
            return Err(invalid_parameter(
                "index",
                &index,
                &"candidate already consumed",
            ));
        }
        Ok(tile)
    }

    /// Pick the nearest unconsumed candidate for `target` and consume it
    ///
    /// `index` must have been built over this pool's averages.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if every candidate is consumed
    pub fn take_nearest(
        &mut self,
        index: &dyn NearestColorIndex,
        target: Color,
    ) -> Result<MatchResult> {
        let selection = index
            .nearest_excluding(target, &self.consumed)
            .ok_or_else(|| {
                invalid_parameter("pool", &self.len(), &"every candidate is already consumed")
            })?;
        self.consume(selection.index)?;
        Ok(selection)
    }
}
