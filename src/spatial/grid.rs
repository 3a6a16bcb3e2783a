//! Grid partitioning of a source buffer and reassembly of tile grids
//!
//! Splitting uses truncating division: every cell has exactly the same size
//! and the pixels past `cols * tile_width` or `rows * tile_height` on the
//! right and bottom edges belong to no cell. Assembly is the inverse,
//! sized by the largest tile so heterogeneous tiles never overlap.

use ndarray::{Array3, Axis, Slice};
use std::borrow::Borrow;

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::raster::buffer::{CHANNELS, Channel, PixelBuffer};

/// Pixel rectangle covered by one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    /// Left edge (inclusive)
    pub x: usize,
    /// Top edge (inclusive)
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl CellBounds {
    /// Check if a pixel lies inside the cell
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A target image cut into `rows × cols` equally sized cells
///
/// Cells are stored row-major: cell `(row, col)` lives at `row * cols + col`.
#[derive(Debug, Clone)]
pub struct Grid<T: Channel = u8> {
    rows: usize,
    cols: usize,
    tile_width: usize,
    tile_height: usize,
    cells: Vec<PixelBuffer<T>>,
}

impl<T: Channel> Grid<T> {
    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Width of every cell in pixels
    pub const fn tile_width(&self) -> usize {
        self.tile_width
    }

    /// Height of every cell in pixels
    pub const fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Number of cells (always `rows * cols`)
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[PixelBuffer<T>] {
        &self.cells
    }

    /// Cell at `(row, col)`, `None` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&PixelBuffer<T>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Source rectangle that produced cell `(row, col)`
    pub const fn bounds(&self, row: usize, col: usize) -> CellBounds {
        CellBounds {
            x: col * self.tile_width,
            y: row * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Consume the grid and return its cells in row-major order
    pub fn into_cells(self) -> Vec<PixelBuffer<T>> {
        self.cells
    }
}

/// Split `buffer` into `rows × cols` cells
///
/// Cell size is `floor(width / cols) × floor(height / rows)`. Remainder
/// pixels on the right and bottom edges are dropped.
///
/// # Errors
///
/// Returns `DegenerateGrid` if either grid dimension is zero or the grid is
/// finer than the buffer's pixel resolution
pub fn split<T: Channel>(buffer: &PixelBuffer<T>, rows: usize, cols: usize) -> Result<Grid<T>> {
    let (width, height) = buffer.dimensions();
    let degenerate = MosaicError::DegenerateGrid {
        rows,
        cols,
        width,
        height,
    };

    let (Some(tile_width), Some(tile_height)) = (width.checked_div(cols), height.checked_div(rows))
    else {
        return Err(degenerate);
    };
    if tile_width == 0 || tile_height == 0 {
        return Err(degenerate);
    }

    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(buffer.crop(
                col * tile_width,
                row * tile_height,
                tile_width,
                tile_height,
            )?);
        }
    }

    Ok(Grid {
        rows,
        cols,
        tile_width,
        tile_height,
        cells,
    })
}

/// Paste `tiles` (row-major) into one `rows × cols` canvas
///
/// Each slot is as large as the biggest tile in each dimension. Tiles are
/// anchored at the top-left of their slot and any uncovered area stays black.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `tiles.len() != rows * cols`, or
/// `InvalidParameter` if the canvas size overflows
pub fn assemble<T, B>(tiles: &[B], rows: usize, cols: usize) -> Result<PixelBuffer<T>>
where
    T: Channel,
    B: Borrow<PixelBuffer<T>>,
{
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid_parameter("grid", &format!("{rows}x{cols}"), &"too many cells"))?;
    if tiles.len() != expected {
        return Err(MosaicError::ShapeMismatch {
            expected,
            actual: tiles.len(),
        });
    }

    let slot_width = tiles
        .iter()
        .map(|tile| tile.borrow().width())
        .max()
        .unwrap_or(0);
    let slot_height = tiles
        .iter()
        .map(|tile| tile.borrow().height())
        .max()
        .unwrap_or(0);

    let canvas_width = cols.checked_mul(slot_width);
    let canvas_height = rows.checked_mul(slot_height);
    let (Some(canvas_width), Some(canvas_height)) = (canvas_width, canvas_height) else {
        return Err(invalid_parameter(
            "canvas",
            &format!("{rows}x{cols} slots of {slot_width}x{slot_height}"),
            &"canvas size overflows",
        ));
    };

    let mut canvas = Array3::zeros((canvas_height, canvas_width, CHANNELS));
    for (index, tile) in tiles.iter().enumerate() {
        let tile = tile.borrow();
        let x = (index % cols) * slot_width;
        let y = (index / cols) * slot_height;
        canvas
            .slice_axis_mut(Axis(0), Slice::from(y..y + tile.height()))
            .slice_axis_mut(Axis(1), Slice::from(x..x + tile.width()))
            .assign(&tile.as_array());
    }

    PixelBuffer::from_array(canvas)
}
