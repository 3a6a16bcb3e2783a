//! Runtime defaults and limits for the command-line tool

// Output settings
/// File written when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "mosaic.png";

/// Fixed seed for reproducible candidate shuffling
pub const DEFAULT_SEED: u64 = 42;

// Guards against grids whose cell vectors would exhaust memory
/// Maximum allowed rows or columns of the mosaic grid
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// File extensions recognised as candidate images (lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "tga", "ppm", "pnm",
];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
