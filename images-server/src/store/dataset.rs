//! Read-only image dataset and borrowed views into it.

use std::path::PathBuf;

use images_common::{ImageId, IMAGE_COUNT, IMAGE_HEIGHT, IMAGE_PIXELS, IMAGE_WIDTH};

/// Errors raised while building the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset row at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Dataset holds {found} images, expected {expected}")]
    ImageCount { expected: usize, found: usize },
}

/// The fixed set of grayscale images, stored contiguously.
pub struct Dataset {
    pixels: Box<[u8]>,
}

impl Dataset {
    /// Build a dataset from `IMAGE_COUNT * IMAGE_PIXELS` row-major bytes.
    pub fn from_pixels(pixels: Vec<u8>) -> Result<Self, DatasetError> {
        if pixels.len() != IMAGE_COUNT * IMAGE_PIXELS {
            return Err(DatasetError::ImageCount {
                expected: IMAGE_COUNT,
                found: pixels.len() / IMAGE_PIXELS,
            });
        }
        Ok(Self {
            pixels: pixels.into_boxed_slice(),
        })
    }

    /// A dataset where every pixel of every image has the same value.
    pub fn filled(value: u8) -> Self {
        Self {
            pixels: vec![value; IMAGE_COUNT * IMAGE_PIXELS].into_boxed_slice(),
        }
    }

    pub fn image(&self, id: ImageId) -> Image<'_> {
        let start = id.index() * IMAGE_PIXELS;
        Image {
            pixels: &self.pixels[start..start + IMAGE_PIXELS],
        }
    }

    pub fn len(&self) -> usize {
        IMAGE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset").field("images", &IMAGE_COUNT).finish()
    }
}

/// Borrowed view of one 28x28 image.
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    pixels: &'a [u8],
}

impl<'a> Image<'a> {
    /// Row-major intensities, `IMAGE_PIXELS` long.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        IMAGE_WIDTH
    }

    pub fn height(&self) -> u32 {
        IMAGE_HEIGHT
    }
}
