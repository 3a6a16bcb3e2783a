//! Immutable RGB pixel storage generic over the channel type
//!
//! Pixels live in a `(height, width, 3)` array so that rows, columns and
//! channels can be sliced independently. Buffers are never edited in place:
//! cropping and grid assembly always produce a fresh buffer.

use ndarray::{Array3, ArrayView2, ArrayView3, Axis, Slice};
use num_traits::{Bounded, PrimInt, Unsigned};
use std::fmt;

use crate::io::error::{Result, invalid_parameter};

/// Number of color channels stored per pixel (R, G, B)
pub const CHANNELS: usize = 3;

/// Unsigned integer type usable as a pixel channel (`u8`, `u16`, ...)
pub trait Channel: PrimInt + Unsigned + fmt::Debug + Send + Sync + 'static {
    /// Largest intensity representable by the channel, as `f64`
    fn ceiling() -> f64 {
        <Self as Bounded>::max_value()
            .to_f64()
            .unwrap_or(f64::MAX)
    }
}

impl<T> Channel for T where T: PrimInt + Unsigned + fmt::Debug + Send + Sync + 'static {}

/// A width × height raster of RGB pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<T: Channel = u8> {
    data: Array3<T>,
}

impl<T: Channel> PixelBuffer<T> {
    /// Create a black buffer of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, CHANNELS)),
        }
    }

    /// Create a buffer where every pixel has the same color
    pub fn filled(width: usize, height: usize, pixel: [T; CHANNELS]) -> Self {
        Self::from_fn(width, height, |_, _| pixel)
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> [T; CHANNELS],
    {
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(y, x, c)| {
            f(x, y).get(c).copied().unwrap_or_else(T::zero)
        });
        Self { data }
    }

    /// Wrap interleaved row-major RGB data
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height * 3`
    pub fn from_raw(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let len = data.len();
        let data = Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|e| {
            invalid_parameter(
                "data",
                &format!("{len} values for {width}x{height}"),
                &e,
            )
        })?;
        Ok(Self { data })
    }

    /// Wrap an existing `(height, width, 3)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the last axis does not hold exactly three channels
    pub fn from_array(data: Array3<T>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        if channels != CHANNELS {
            return Err(invalid_parameter(
                "channels",
                &channels,
                &"pixel buffers hold exactly three channels",
            ));
        }
        Ok(Self { data })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Whether the buffer holds no pixels at all
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Read one pixel, `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[T; CHANNELS]> {
        let r = self.data.get((y, x, 0)).copied()?;
        let g = self.data.get((y, x, 1)).copied()?;
        let b = self.data.get((y, x, 2)).copied()?;
        Some([r, g, b])
    }

    /// View of a single channel plane (0 = R, 1 = G, 2 = B)
    ///
    /// # Panics
    ///
    /// Panics if `channel >= 3`
    pub fn channel(&self, channel: usize) -> ArrayView2<'_, T> {
        self.data.index_axis(Axis(2), channel)
    }

    /// Read-only view of the underlying `(height, width, 3)` array
    pub fn as_array(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    /// Interleaved row-major copy of the pixel data
    pub fn to_raw(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    /// Copy a rectangle into a new buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle extends past the buffer edges
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(right, bottom)| right <= self.width() && bottom <= self.height());
        if !fits {
            return Err(invalid_parameter(
                "crop",
                &format!("{width}x{height} at ({x}, {y})"),
                &format!("outside {}x{} buffer", self.width(), self.height()),
            ));
        }

        let data = self
            .data
            .slice_axis(Axis(0), Slice::from(y..y + height))
            .slice_axis(Axis(1), Slice::from(x..x + width))
            .to_owned();
        Ok(Self { data })
    }
}
