//! Images Server Common Types
//!
//! Shared types used by the images server and by the clients that fetch
//! images from it and post classification results back.

pub mod format;
pub mod image_id;
pub mod protocol;
pub mod status;

pub use format::{OutputFormat, UnknownFormat};
pub use image_id::{ImageId, ImageIdError, IMAGE_COUNT, IMAGE_HEIGHT, IMAGE_PIXELS, IMAGE_WIDTH};
pub use protocol::{ImageQuery, ResultSubmission, DEFAULT_LABEL};
pub use status::ResponseStatus;
