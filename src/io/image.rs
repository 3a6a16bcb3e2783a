//! Image decoding, encoding, candidate loading and thumbnailing

use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::io::configuration::SUPPORTED_EXTENSIONS;
use crate::io::error::{MosaicError, Result, WithPath, invalid_parameter};
use crate::io::progress::ProgressReporter;
use crate::raster::buffer::PixelBuffer;

/// Copy an 8-bit RGB image into a pixel buffer
///
/// # Errors
///
/// Returns an error if the image's raw data does not match its dimensions
pub fn from_rgb_image(image: &RgbImage) -> Result<PixelBuffer> {
    PixelBuffer::from_raw(
        image.width() as usize,
        image.height() as usize,
        image.as_raw().clone(),
    )
}

/// Copy a pixel buffer into an 8-bit RGB image
///
/// # Errors
///
/// Returns an error if the buffer dimensions do not fit in `u32`
pub fn to_rgb_image(buffer: &PixelBuffer) -> Result<RgbImage> {
    let width = u32::try_from(buffer.width())
        .map_err(|e| invalid_parameter("width", &buffer.width(), &e))?;
    let height = u32::try_from(buffer.height())
        .map_err(|e| invalid_parameter("height", &buffer.height(), &e))?;

    RgbImage::from_raw(width, height, buffer.to_raw()).ok_or_else(|| {
        invalid_parameter(
            "buffer",
            &format!("{width}x{height}"),
            &"pixel data does not match dimensions",
        )
    })
}

/// Decode an encoded image held in memory
///
/// # Errors
///
/// Returns `ImageLoad` if the bytes are not a supported image
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes).map_err(|e| MosaicError::ImageLoad {
        path: PathBuf::from("<memory>"),
        source: e,
    })?;
    from_rgb_image(&image.to_rgb8())
}

/// Encode a buffer as PNG bytes
///
/// # Errors
///
/// Returns `ImageExport` if encoding fails
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let image = to_rgb_image(buffer)?;
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: PathBuf::from("<memory>"),
            source: e,
        })?;
    Ok(bytes.into_inner())
}

/// Load and decode the image at `path`
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be read or decoded
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = image::open(path).with_path(path)?;
    from_rgb_image(&image.to_rgb8())
}

/// Save `buffer` to `path`, format chosen by the file extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension names no supported format
/// - The image cannot be written
pub fn save_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    to_rgb_image(buffer)?
        .save(path)
        .map_err(|e| MosaicError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Check whether `path` has an image extension this tool reads
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Decode every image in `directory`, sorted by file name
///
/// Files that fail to decode are logged and skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read
/// - No file in the directory decodes successfully
pub fn list_candidate_buffers(
    directory: &Path,
    progress: &ProgressReporter,
) -> Result<Vec<PixelBuffer>> {
    let mut paths = Vec::new();
    let read_error = |e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    };
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    progress.set_total(paths.len());

    let mut buffers = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_image(path) {
            Ok(buffer) => buffers.push(buffer),
            Err(e) => warn!("Invalid image skipped: {e}"),
        }
        progress.advance(path);
    }
    progress.finish(buffers.len());

    if buffers.is_empty() {
        return Err(MosaicError::InvalidSourceData {
            reason: format!("No input images found in '{}'", directory.display()),
        });
    }

    debug!(
        "Loaded {} of {} candidate files from '{}'",
        buffers.len(),
        paths.len(),
        directory.display()
    );
    Ok(buffers)
}

/// Shrink `buffer` to fit within `max_width × max_height`, keeping its aspect
/// ratio; buffers that already fit are returned unchanged
///
/// # Errors
///
/// Returns an error if either bound is zero or does not fit in `u32`
pub fn thumbnail_to_fit(
    buffer: &PixelBuffer,
    max_width: usize,
    max_height: usize,
) -> Result<PixelBuffer> {
    if max_width == 0 || max_height == 0 {
        return Err(invalid_parameter(
            "thumbnail",
            &format!("{max_width}x{max_height}"),
            &"bounds must be positive",
        ));
    }
    if buffer.width() <= max_width && buffer.height() <= max_height {
        return Ok(buffer.clone());
    }

    let bound_width =
        u32::try_from(max_width).map_err(|e| invalid_parameter("max_width", &max_width, &e))?;
    let bound_height =
        u32::try_from(max_height).map_err(|e| invalid_parameter("max_height", &max_height, &e))?;

    let image = DynamicImage::ImageRgb8(to_rgb_image(buffer)?);
    from_rgb_image(&image.thumbnail(bound_width, bound_height).to_rgb8())
}
