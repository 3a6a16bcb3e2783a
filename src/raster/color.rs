//! Mean RGB colors and per-buffer averaging

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::io::error::{MosaicError, Result};
use crate::raster::buffer::{CHANNELS, Channel, PixelBuffer};

/// Mean intensity of the R, G and B channels
///
/// Components are averages and may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(pub [f64; CHANNELS]);

impl Color {
    /// Create a color from its three components
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self([red, green, blue])
    }

    /// Red component
    pub const fn red(&self) -> f64 {
        self.0[0]
    }

    /// Green component
    pub const fn green(&self) -> f64 {
        self.0[1]
    }

    /// Blue component
    pub const fn blue(&self) -> f64 {
        self.0[2]
    }

    /// Component along `axis` (0 = R, 1 = G, 2 = B), zero for other axes
    pub fn component(&self, axis: usize) -> f64 {
        self.0.get(axis).copied().unwrap_or(0.0)
    }

    /// Squared Euclidean distance in RGB space
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dr = self.red() - other.red();
        let dg = self.green() - other.green();
        let db = self.blue() - other.blue();
        dr.mul_add(dr, dg.mul_add(dg, db * db))
    }

    /// Components rounded toward zero
    pub fn truncated(&self) -> Self {
        Self(self.0.map(f64::trunc))
    }
}

impl From<[u8; CHANNELS]> for Color {
    fn from(pixel: [u8; CHANNELS]) -> Self {
        Self(pixel.map(f64::from))
    }
}

/// Arithmetic mean of each channel over every pixel of `buffer`
///
/// Sums are accumulated in `f64`, so large images neither overflow nor lose
/// the fractional part of the mean.
///
/// # Errors
///
/// Returns `EmptyInput` if the buffer has no pixels
pub fn average<T: Channel>(buffer: &PixelBuffer<T>) -> Result<Color> {
    if buffer.is_empty() {
        return Err(MosaicError::EmptyInput {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let count = buffer.pixel_count() as f64;
    let mut mean = [0.0; CHANNELS];
    for (channel, slot) in mean.iter_mut().enumerate() {
        let sum: f64 = buffer
            .channel(channel)
            .iter()
            .map(|value| value.to_f64().unwrap_or(0.0))
            .sum();
        *slot = sum / count;
    }

    Ok(Color(mean))
}

/// Average every buffer in parallel, preserving input order
///
/// # Errors
///
/// Returns `EmptyInput` if any buffer has no pixels
pub fn average_all<T: Channel>(buffers: &[PixelBuffer<T>]) -> Result<Vec<Color>> {
    buffers.par_iter().map(average).collect()
}
