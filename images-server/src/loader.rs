//! Dataset loader: reads the images CSV into a [`Dataset`].
//!
//! The file holds one image per row as `IMAGE_PIXELS` comma-separated
//! intensities (0-255). A leading header row such as `pixel0,pixel1,...`
//! is skipped. Any unreadable or malformed row aborts the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use images_common::{IMAGE_COUNT, IMAGE_PIXELS};

use crate::store::{Dataset, DatasetError};

/// Load the dataset CSV at `path`.
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let io_error = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    read_csv(BufReader::new(file)).map_err(|err| match err {
        ReadError::Io(source) => io_error(source),
        ReadError::Dataset(err) => err,
    })
}

enum ReadError {
    Io(std::io::Error),
    Dataset(DatasetError),
}

impl From<DatasetError> for ReadError {
    fn from(err: DatasetError) -> Self {
        ReadError::Dataset(err)
    }
}

fn read_csv<R: BufRead>(reader: R) -> Result<Dataset, ReadError> {
    let mut pixels = Vec::with_capacity(IMAGE_COUNT * IMAGE_PIXELS);
    let mut rows = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(ReadError::Io)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if index == 0 && is_header(line) {
            continue;
        }
        if rows == IMAGE_COUNT {
            return Err(DatasetError::ImageCount {
                expected: IMAGE_COUNT,
                found: rows + 1,
            }
            .into());
        }
        parse_row(line, index + 1, &mut pixels)?;
        rows += 1;
    }

    Ok(Dataset::from_pixels(pixels)?)
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|field| field.trim().parse::<i64>().is_err())
}

fn parse_row(line: &str, line_number: usize, pixels: &mut Vec<u8>) -> Result<(), DatasetError> {
    let start = pixels.len();
    for field in line.split(',') {
        let value: u8 = field.trim().parse().map_err(|_| DatasetError::Malformed {
            line: line_number,
            reason: format!("{:?} is not an intensity in 0..=255", field.trim()),
        })?;
        pixels.push(value);
    }

    let found = pixels.len() - start;
    if found != IMAGE_PIXELS {
        return Err(DatasetError::Malformed {
            line: line_number,
            reason: format!("expected {IMAGE_PIXELS} pixels, found {found}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use images_common::ImageId;

    use super::*;

    fn row(value: u8) -> String {
        vec![value.to_string(); IMAGE_PIXELS].join(",")
    }

    fn header() -> String {
        (0..IMAGE_PIXELS)
            .map(|i| format!("pixel{i}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn read(text: &str) -> Result<Dataset, DatasetError> {
        read_csv(text.as_bytes()).map_err(|err| match err {
            ReadError::Dataset(err) => err,
            ReadError::Io(err) => panic!("unexpected io error: {err}"),
        })
    }

    #[test]
    fn test_loads_full_file_with_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        for i in 0..IMAGE_COUNT {
            writeln!(file, "{}", row((i % 256) as u8)).unwrap();
        }
        file.flush().unwrap();

        let dataset = load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), IMAGE_COUNT);
        assert_eq!(dataset.image(ImageId::new(0).unwrap()).pixels()[0], 0);
        assert_eq!(dataset.image(ImageId::new(257).unwrap()).pixels()[5 * 28 + 5], 1);
        assert_eq!(dataset.image(ImageId::MAX).pixels()[783], (27_999 % 256) as u8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv(Path::new("/nonexistent/test.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_too_few_rows() {
        let text = format!("{}\n{}\n{}\n", header(), row(0), row(1));
        let err = read(&text).unwrap_err();
        assert!(matches!(err, DatasetError::ImageCount { found: 2, .. }));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let text = format!("{}\n1,2,3\n", row(0));
        let err = read(&text).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_out_of_range_pixel_is_malformed() {
        let mut bad = vec!["0".to_string(); IMAGE_PIXELS];
        bad[10] = "256".to_string();
        let err = read(&bad.join(",")).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { line: 1, .. }));
    }
}
