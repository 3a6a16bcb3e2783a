//! Photomosaic orchestration
//!
//! Splits the target into cells, averages cells and candidates, resolves one
//! candidate per cell and pastes the chosen tiles into the output. Any failure
//! aborts the whole mosaic; no cell is ever skipped or filled with a default.

use log::debug;
use std::time::Instant;

use crate::algorithm::pool::CandidatePool;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::matching::index::{MatchResult, MatchStrategy, build_index};
use crate::raster::buffer::{Channel, PixelBuffer};
use crate::raster::color::average_all;
use crate::spatial::grid::{assemble, split};

/// Tile selection policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Allow one candidate to fill several cells
    pub reuse_candidates: bool,
    /// Nearest-color search strategy
    pub match_strategy: MatchStrategy,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            reuse_candidates: true,
            match_strategy: MatchStrategy::Linear,
        }
    }
}

/// Builds photomosaics under a fixed configuration
#[derive(Clone, Copy, Debug, Default)]
pub struct MosaicAssembler {
    config: MosaicConfig,
}

impl MosaicAssembler {
    /// Create an assembler with the given selection policy
    pub const fn new(config: MosaicConfig) -> Self {
        Self { config }
    }

    /// Selection policy in use
    pub const fn config(&self) -> MosaicConfig {
        self.config
    }

    /// Resolve the candidate chosen for every cell, in row-major cell order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid is finer than the target resolution
    /// - Reuse is disabled and there are fewer candidates than cells
    /// - The target grid or any candidate has no pixels
    /// - There are no candidates
    pub fn select<T: Channel>(
        &self,
        target: &PixelBuffer<T>,
        candidates: &[PixelBuffer<T>],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<MatchResult>> {
        let cell_count = rows.checked_mul(cols).ok_or_else(|| {
            invalid_parameter("grid", &format!("{rows}x{cols}"), &"too many cells")
        })?;

        let grid = split(target, rows, cols)?;

        // Checked before any averaging so an unsatisfiable request does no work
        if !self.config.reuse_candidates && cell_count > candidates.len() {
            return Err(MosaicError::InsufficientCandidates {
                cells: cell_count,
                candidates: candidates.len(),
            });
        }

        debug!(
            "Split {}x{} target into {cell_count} cells of {}x{}",
            target.width(),
            target.height(),
            grid.tile_width(),
            grid.tile_height()
        );

        let candidate_averages = average_all(candidates)?;
        let cell_averages = average_all(grid.cells())?;

        let start = Instant::now();
        let selections = if self.config.reuse_candidates {
            let index = build_index(self.config.match_strategy, &candidate_averages)?;
            index.query(&cell_averages)?
        } else {
            let mut pool = CandidatePool::from_parts(candidates, candidate_averages)?;
            let index = pool.build_index(self.config.match_strategy)?;

            // Each pick shrinks the pool, so cells are resolved strictly in order
            let mut selections = Vec::with_capacity(cell_averages.len());
            for &cell_average in &cell_averages {
                selections.push(pool.take_nearest(index.as_ref(), cell_average)?);
            }
            selections
        };
        debug!(
            "Matched {cell_count} cells against {} candidates ({:?}, reuse {}) in {:?}",
            candidates.len(),
            self.config.match_strategy,
            self.config.reuse_candidates,
            start.elapsed()
        );

        Ok(selections)
    }

    /// Build the photomosaic of `target` from `candidates`
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::select`], or `ShapeMismatch` if the
    /// selected tiles cannot fill the grid
    pub fn assemble<T: Channel>(
        &self,
        target: &PixelBuffer<T>,
        candidates: &[PixelBuffer<T>],
        rows: usize,
        cols: usize,
    ) -> Result<PixelBuffer<T>> {
        let selections = self.select(target, candidates, rows, cols)?;

        let tiles = selections
            .iter()
            .map(|selection| {
                candidates.get(selection.index).ok_or_else(|| {
                    invalid_parameter("index", &selection.index, &"no such candidate")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        assemble(&tiles, rows, cols)
    }
}

/// Build a photomosaic with a one-off assembler
///
/// # Errors
///
/// Returns any error from [`MosaicAssembler::assemble`]
pub fn create_mosaic<T: Channel>(
    target: &PixelBuffer<T>,
    candidates: &[PixelBuffer<T>],
    rows: usize,
    cols: usize,
    config: MosaicConfig,
) -> Result<PixelBuffer<T>> {
    MosaicAssembler::new(config).assemble(target, candidates, rows, cols)
}
