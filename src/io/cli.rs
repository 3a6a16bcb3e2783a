//! Command-line interface for building a photomosaic from image files

use crate::algorithm::assembler::{MosaicConfig, create_mosaic};
use crate::io::configuration::{DEFAULT_OUTPUT_FILE, DEFAULT_SEED, MAX_GRID_DIMENSION};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{list_candidate_buffers, load_image, save_image, thumbnail_to_fit};
use crate::io::progress::ProgressReporter;
use crate::matching::index::MatchStrategy;
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Creates a photomosaic from a target image and a folder of tiles"
)]
/// Command-line arguments for the photomosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image to reproduce as a mosaic
    #[arg(long = "target-image", value_name = "FILE")]
    pub target_image: PathBuf,

    /// Directory of candidate tile images
    #[arg(long = "input-folder", value_name = "DIR")]
    pub input_folder: PathBuf,

    /// Grid size as ROWS COLS
    #[arg(long = "grid-size", num_args = 2, value_names = ["ROWS", "COLS"], required = true)]
    pub grid_size: Vec<usize>,

    /// Output file (format from extension)
    #[arg(short, long = "output-file", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Match colors with a k-d tree instead of a linear scan
    #[arg(long)]
    pub kdt: bool,

    /// Use each candidate at most once
    #[arg(long)]
    pub no_reuse: bool,

    /// Keep candidates at their original size instead of shrinking them to the cell size
    #[arg(long)]
    pub no_resize: bool,

    /// Random seed for candidate shuffling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Validated grid dimensions as (rows, cols)
    ///
    /// # Errors
    ///
    /// Returns an error if the grid size is not two positive values within
    /// `MAX_GRID_DIMENSION`
    pub fn grid_dimensions(&self) -> Result<(usize, usize)> {
        let [rows, cols] = self.grid_size.as_slice() else {
            return Err(invalid_parameter(
                "grid-size",
                &format!("{:?}", self.grid_size),
                &"expected ROWS COLS",
            ));
        };

        for (parameter, value) in [("rows", *rows), ("cols", *cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        Ok((*rows, *cols))
    }

    /// Selected color matching strategy
    pub const fn match_strategy(&self) -> MatchStrategy {
        if self.kdt {
            MatchStrategy::Indexed
        } else {
            MatchStrategy::Linear
        }
    }

    /// Mosaic selection policy from the flags
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            reuse_candidates: !self.no_reuse,
            match_strategy: self.match_strategy(),
        }
    }

    /// Check if candidates should be shrunk to the cell size
    pub const fn should_resize(&self) -> bool {
        !self.no_resize
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Shuffle `candidates` deterministically from `seed`
pub fn shuffle_candidates<T>(candidates: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    candidates.shuffle(&mut rng);
}

/// Runs one photomosaic build from command-line arguments
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load inputs, build the mosaic and write it out
    ///
    /// Returns the path the mosaic was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid size is invalid
    /// - The target or candidate images cannot be loaded
    /// - Mosaic assembly fails
    /// - The output cannot be written
    pub fn run(&self) -> Result<PathBuf> {
        let start = Instant::now();
        let (rows, cols) = self.cli.grid_dimensions()?;

        let target = load_image(&self.cli.target_image)?;

        let progress = if self.cli.should_show_progress() {
            ProgressReporter::new("Reading tiles")
        } else {
            ProgressReporter::hidden()
        };
        let mut candidates = list_candidate_buffers(&self.cli.input_folder, &progress)?;
        shuffle_candidates(&mut candidates, self.cli.seed);

        let tile_width = target.width() / cols;
        let tile_height = target.height() / rows;
        // A zero-sized cell is left for assembly to report as a degenerate grid
        if self.cli.should_resize() && tile_width > 0 && tile_height > 0 {
            info!("Resizing candidates to at most {tile_width}x{tile_height}");
            candidates = candidates
                .par_iter()
                .map(|candidate| thumbnail_to_fit(candidate, tile_width, tile_height))
                .collect::<Result<Vec<_>>>()?;
        }

        let setup = start.elapsed();
        info!(
            "Building {rows}x{cols} mosaic from {} candidates",
            candidates.len()
        );
        let mosaic = create_mosaic(
            &target,
            &candidates,
            rows,
            cols,
            self.cli.mosaic_config(),
        )?;

        save_image(&mosaic, &self.cli.output_file)?;
        let total = start.elapsed();

        info!("Saved output to {}", self.cli.output_file.display());
        info!("Execution time:    setup: {:.3} seconds", setup.as_secs_f64());
        info!(
            "Execution time: creation: {:.3} seconds",
            (total - setup).as_secs_f64()
        );
        info!("Execution time:    total: {:.3} seconds", total.as_secs_f64());

        Ok(self.cli.output_file.clone())
    }
}
