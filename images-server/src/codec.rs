//! Image codec: turns a raw grayscale grid into PNG, JPEG or WebP bytes.

use std::io::Cursor;

use image::{GrayImage, ImageError, ImageFormat};
use images_common::OutputFormat;

use crate::store::Image;

/// Encoding backend used by `GET /image`.
pub trait ImageCodec: Send + Sync {
    fn encode(&self, image: Image<'_>, format: OutputFormat) -> Result<Vec<u8>, ImageError>;

    fn decode(&self, bytes: &[u8], format: OutputFormat) -> Result<GrayImage, ImageError>;
}

/// [`ImageCodec`] backed by the `image` crate. WebP is written lossless.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

fn image_format(format: OutputFormat) -> ImageFormat {
    match format {
        OutputFormat::Png => ImageFormat::Png,
        OutputFormat::Jpeg => ImageFormat::Jpeg,
        OutputFormat::Webp => ImageFormat::WebP,
    }
}

impl ImageCodec for RasterCodec {
    fn encode(&self, image: Image<'_>, format: OutputFormat) -> Result<Vec<u8>, ImageError> {
        let grid = GrayImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .ok_or_else(|| {
                ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;

        let mut out = Cursor::new(Vec::new());
        grid.write_to(&mut out, image_format(format))?;
        Ok(out.into_inner())
    }

    fn decode(&self, bytes: &[u8], format: OutputFormat) -> Result<GrayImage, ImageError> {
        Ok(image::load_from_memory_with_format(bytes, image_format(format))?.into_luma8())
    }
}
