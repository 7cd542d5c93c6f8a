//! Dataset geometry and the validated image identifier.

use serde::{Deserialize, Serialize};

/// Number of images in the dataset (and labels in the result store).
pub const IMAGE_COUNT: usize = 28_000;

pub const IMAGE_WIDTH: u32 = 28;
pub const IMAGE_HEIGHT: u32 = 28;

/// Bytes per image: one 8-bit intensity per pixel.
pub const IMAGE_PIXELS: usize = (IMAGE_WIDTH * IMAGE_HEIGHT) as usize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageIdError {
    #[error("image id {0} is outside 0..={max}", max = IMAGE_COUNT - 1)]
    OutOfRange(i64),
    #[error("image id is not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Index of an image in the dataset, always in `0..IMAGE_COUNT`.
///
/// Both stores are indexed only through this type, so a bad id is
/// rejected when it is parsed and never at access time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ImageId(u16);

impl ImageId {
    pub const MIN: ImageId = ImageId(0);
    pub const MAX: ImageId = ImageId((IMAGE_COUNT - 1) as u16);

    pub fn new(raw: i64) -> Result<Self, ImageIdError> {
        if (0..IMAGE_COUNT as i64).contains(&raw) {
            Ok(ImageId(raw as u16))
        } else {
            Err(ImageIdError::OutOfRange(raw))
        }
    }

    /// Position in the dataset and result store.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for ImageId {
    type Error = ImageIdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        ImageId::new(raw)
    }
}

impl From<ImageId> for i64 {
    fn from(id: ImageId) -> Self {
        id.0 as i64
    }
}

impl std::str::FromStr for ImageId {
    type Err = ImageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| ImageIdError::NotAnInteger(s.to_string()))?;
        ImageId::new(raw)
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(ImageId::new(0).unwrap().index(), 0);
        assert_eq!(ImageId::new(27_999).unwrap(), ImageId::MAX);
        assert_eq!(ImageId::new(28_000), Err(ImageIdError::OutOfRange(28_000)));
        assert_eq!(ImageId::new(-1), Err(ImageIdError::OutOfRange(-1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!("500".parse::<ImageId>().unwrap().index(), 500);
        assert!(matches!(
            "abc".parse::<ImageId>(),
            Err(ImageIdError::NotAnInteger(_))
        ));
        assert!(matches!("".parse::<ImageId>(), Err(ImageIdError::NotAnInteger(_))));
        assert!(matches!("1.5".parse::<ImageId>(), Err(ImageIdError::NotAnInteger(_))));
        assert!(matches!("-1".parse::<ImageId>(), Err(ImageIdError::OutOfRange(-1))));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let id: ImageId = serde_json::from_str("42").unwrap();
        assert_eq!(id.index(), 42);
        assert!(serde_json::from_str::<ImageId>("28000").is_err());
        assert!(serde_json::from_str::<ImageId>("\"42\"").is_err());
    }
}
