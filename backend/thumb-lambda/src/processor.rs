//! Thumbnail processor - decodes, bounds and re-encodes JPEG images
//!
//! Fits an image inside a fixed box while maintaining aspect ratio, using a
//! Lanczos filter, and encodes the result as JPEG at the codec's default
//! quality. Images already inside the box pass through at their original size.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use crate::error::{ProcessError, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Maximum thumbnail width in pixels
pub const MAX_WIDTH: u32 = 600;
/// Maximum thumbnail height in pixels
pub const MAX_HEIGHT: u32 = 600;
/// Quality used when the caller does not pick one
pub const DEFAULT_JPEG_QUALITY: u8 = 75;
/// Content type of every encoded thumbnail
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Configuration for thumbnail generation
#[derive(Clone, Debug)]
pub struct ThumbnailConfig {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
    pub filter: FilterType,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            quality: DEFAULT_JPEG_QUALITY,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Result of thumbnail generation
#[derive(Debug)]
pub struct ThumbnailResult {
    /// The thumbnail image data as JPEG
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Thumbnail processor
#[derive(Debug)]
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Decode JPEG bytes; any other format is rejected
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory_with_format(data, ImageFormat::Jpeg).map_err(ProcessError::Decode)
    }

    /// Bound `img` to the configured box.
    ///
    /// Returns `None` when there is nothing to resize (a zero-sized image).
    /// Images already inside the box are returned unchanged.
    pub fn thumbnail(&self, img: DynamicImage) -> Option<DynamicImage> {
        let (orig_w, orig_h) = img.dimensions();
        if orig_w == 0 || orig_h == 0 {
            return None;
        }

        if orig_w <= self.config.max_width && orig_h <= self.config.max_height {
            debug!(
                width = orig_w,
                height = orig_h,
                "Image already within max dimensions"
            );
            return Some(img);
        }

        let (new_w, new_h) = self.calculate_dimensions(orig_w, orig_h);
        Some(img.resize_exact(new_w, new_h, self.config.filter))
    }

    /// Encode image as JPEG
    pub fn encode(&self, img: &DynamicImage) -> Result<Bytes> {
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        img.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.config.quality))
            .map_err(ProcessError::Encode)?;

        Ok(Bytes::from(buf))
    }

    /// Decode, bound and encode in one go (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `generate_async` instead.
    pub fn generate(&self, original_data: &[u8]) -> Result<ThumbnailResult> {
        let img = self.decode(original_data)?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            "Processing image for thumbnail"
        );

        let thumbnail = self.thumbnail(img).ok_or(ProcessError::EmptyThumbnail)?;
        let (width, height) = thumbnail.dimensions();

        let data = self.encode(&thumbnail)?;

        debug!(width, height, size = data.len(), "Thumbnail generated");

        Ok(ThumbnailResult {
            data,
            width,
            height,
        })
    }

    /// Generate a thumbnail on the blocking thread pool
    ///
    /// The caller still awaits the result, so records keep their sequential order.
    pub async fn generate_async(self: Arc<Self>, original_data: Bytes) -> Result<ThumbnailResult> {
        tokio::task::spawn_blocking(move || self.generate(&original_data))
            .await
            .map_err(|e| ProcessError::Task(e.to_string()))?
    }

    /// Calculate dimensions that fit the box, maintaining aspect ratio
    ///
    /// The bounding side takes the box edge; the other side is
    /// `round(side * edge / bound)`, rounding halves up.
    fn calculate_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let (max_w, max_h) = (self.config.max_width, self.config.max_height);

        if width as u64 * max_h as u64 >= height as u64 * max_w as u64 {
            (max_w, scale_side(height, max_w, width).clamp(1, max_h))
        } else {
            (scale_side(width, max_h, height).clamp(1, max_w), max_h)
        }
    }
}

/// `round(side * edge / bound)` in integer arithmetic
fn scale_side(side: u32, edge: u32, bound: u32) -> u32 {
    let (side, edge, bound) = (side as u64, edge as u64, bound as u64);
    ((2 * side * edge + bound) / (2 * bound)) as u32
}
