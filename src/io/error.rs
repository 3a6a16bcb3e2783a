//! Error types and path context for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Average color requested for a buffer without pixels
    EmptyInput {
        /// Width of the offending buffer
        width: usize,
        /// Height of the offending buffer
        height: usize,
    },

    /// Requested grid is finer than the source pixel resolution
    ///
    /// Occurs when `width / cols` or `height / rows` truncates to zero,
    /// or when either grid dimension is zero.
    DegenerateGrid {
        /// Requested grid rows
        rows: usize,
        /// Requested grid columns
        cols: usize,
        /// Source buffer width in pixels
        width: usize,
        /// Source buffer height in pixels
        height: usize,
    },

    /// Tile count does not match the grid cell count
    ShapeMismatch {
        /// Number of tiles the grid requires (rows * cols)
        expected: usize,
        /// Number of tiles supplied
        actual: usize,
    },

    /// Nearest-color search requested over zero reference colors
    EmptyReferenceSet,

    /// Fewer candidates than grid cells while reuse is disabled
    InsufficientCandidates {
        /// Number of grid cells to fill
        cells: usize,
        /// Number of candidate tiles available
        candidates: usize,
    },

    /// Failed to load or decode an image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or save an image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Input data doesn't meet mosaic requirements
    InvalidSourceData {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { width, height } => {
                write!(
                    f,
                    "Cannot average a buffer without pixels ({width}x{height})"
                )
            }
            Self::DegenerateGrid {
                rows,
                cols,
                width,
                height,
            } => {
                write!(
                    f,
                    "Grid {rows}x{cols} is finer than the {width}x{height} source image"
                )
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Grid requires {expected} tiles but {actual} were supplied"
                )
            }
            Self::EmptyReferenceSet => {
                write!(f, "Nearest color search requires at least one reference color")
            }
            Self::InsufficientCandidates { cells, candidates } => {
                write!(
                    f,
                    "Cannot fill {cells} cells from {candidates} candidates without reuse"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Replaces the placeholder path of I/O-derived errors with the real one
pub trait WithPath<T> {
    /// Attach a path to the error, if the error carries one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ImageLoad { path: slot, .. }
                | MosaicError::ImageExport { path: slot, .. }
                | MosaicError::FileSystem { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
