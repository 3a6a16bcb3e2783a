//! Static k-d tree over RGB reference colors
//!
//! The tree is stored implicitly: `order` holds reference indices arranged so
//! that for any subrange the median element is the splitting node, everything
//! before it lies on the low side of the splitting plane and everything after
//! it on the high side. Splitting axes cycle R, G, B with depth.
//!
//! Searches can skip consumed references, which lets the no-reuse selection
//! loop keep a single tree instead of rebuilding it after every pick.

use bitvec::slice::BitSlice;

use crate::io::error::{MosaicError, Result};
use crate::matching::index::{MatchResult, NearestColorIndex, is_consumed};
use crate::raster::buffer::CHANNELS;
use crate::raster::color::Color;

/// Balanced 3-d tree answering nearest-color queries in roughly O(log M)
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<Color>,
    order: Vec<usize>,
}

impl KdTree {
    /// Build a tree over `references`
    ///
    /// # Errors
    ///
    /// Returns `EmptyReferenceSet` if `references` is empty
    pub fn build(references: &[Color]) -> Result<Self> {
        if references.is_empty() {
            return Err(MosaicError::EmptyReferenceSet);
        }

        let points = references.to_vec();
        let mut order: Vec<usize> = (0..points.len()).collect();
        partition(&points, &mut order, 0);

        Ok(Self { points, order })
    }

    /// Depth of the deepest leaf
    pub fn depth(&self) -> usize {
        // Median splitting keeps the tree balanced to within one level
        usize::BITS as usize - self.order.len().leading_zeros() as usize
    }

    fn search(
        &self,
        order: &[usize],
        depth: usize,
        target: Color,
        consumed: &BitSlice,
        best: &mut Option<MatchResult>,
    ) {
        let (low, rest) = order.split_at(order.len() / 2);
        let Some((&index, high)) = rest.split_first() else {
            return;
        };
        let Some(point) = self.points.get(index) else {
            return;
        };

        if !is_consumed(consumed, index) {
            let candidate = MatchResult {
                index,
                distance_squared: target.distance_squared(point),
            };
            if candidate.beats(best.as_ref()) {
                *best = Some(candidate);
            }
        }

        let axis = depth % CHANNELS;
        let delta = target.component(axis) - point.component(axis);
        let (near, far) = if delta < 0.0 { (low, high) } else { (high, low) };

        self.search(near, depth + 1, target, consumed, best);

        // Equal plane distance must still be explored so lower-index ties are found
        if best.is_none_or(|current| delta * delta <= current.distance_squared) {
            self.search(far, depth + 1, target, consumed, best);
        }
    }
}

impl NearestColorIndex for KdTree {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn nearest_excluding(&self, target: Color, consumed: &BitSlice) -> Option<MatchResult> {
        let mut best = None;
        self.search(&self.order, 0, target, consumed, &mut best);
        best
    }
}

// Arrange `order` so its median splits the subrange on the depth's axis
fn partition(points: &[Color], order: &mut [usize], depth: usize) {
    if order.len() <= 1 {
        return;
    }

    let axis = depth % CHANNELS;
    let median = order.len() / 2;
    order.select_nth_unstable_by(median, |&a, &b| {
        let value_a = points.get(a).map_or(0.0, |color| color.component(axis));
        let value_b = points.get(b).map_or(0.0, |color| color.component(axis));
        value_a.total_cmp(&value_b).then(a.cmp(&b))
    });

    let (low, rest) = order.split_at_mut(median);
    partition(points, low, depth + 1);
    if let Some((_, high)) = rest.split_first_mut() {
        partition(points, high, depth + 1);
    }
}
