//! Wire-level names and payloads of the images server HTTP API.
//!
//! # Routes
//!
//! - `GET /` answers with a short plain-text greeting.
//! - `GET /image?ImageID=<id>&outputFormat=<png|jpeg|webp>` streams one
//!   encoded image.
//! - `POST /result` with a [`ResultSubmission`] body stores one label.
//! - `POST /export` writes every stored label to the export file.

use serde::{Deserialize, Serialize};

use crate::{ImageId, OutputFormat};

pub const ROUTE_INDEX: &str = "/";
pub const ROUTE_IMAGE: &str = "/image";
pub const ROUTE_RESULT: &str = "/result";
pub const ROUTE_EXPORT: &str = "/export";

/// Label every image holds until a result is posted for it.
pub const DEFAULT_LABEL: i64 = 1;

/// Body of `POST /result`: the label a client predicted for one image.
///
/// Decoding is strict: both fields are required, unknown fields are an
/// error and `ImageID` must be inside the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultSubmission {
    #[serde(rename = "ImageID")]
    pub image_id: ImageId,
    #[serde(rename = "result")]
    pub label: i64,
}

impl ResultSubmission {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// Query string of `GET /image`.
///
/// Values are kept as raw text so a bad id and a bad format are rejected
/// by the same check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageQuery {
    #[serde(rename = "ImageID", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(rename = "outputFormat", default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

impl ImageQuery {
    /// Both parameters, if both are present and valid.
    pub fn resolve(&self) -> Option<(ImageId, OutputFormat)> {
        let id = self.image_id.as_deref()?.parse().ok()?;
        let format = self.output_format.as_deref()?.parse().ok()?;
        Some((id, format))
    }
}
