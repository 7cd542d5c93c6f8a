//! Export writer: persists every stored label as a CSV file.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Errors raised while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot write export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub rows: usize,
    pub destination: PathBuf,
}

/// Destination for a full snapshot of the result store.
pub trait ResultExporter: Send + Sync {
    /// Persist `labels`, where `labels[i]` belongs to image id `i`.
    fn export(&self, labels: &[i64]) -> Result<ExportReport, ExportError>;
}

/// Writes `ImageId,Label` rows, numbering images from 1.
///
/// Each export is written to its own temporary file next to the
/// destination and renamed into place, so concurrent exports never share a
/// staging file and readers only ever see a complete export.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write(&self, labels: &[i64]) -> std::io::Result<()> {
        let mut staging = NamedTempFile::new_in(self.staging_dir())?;
        {
            let mut out = BufWriter::new(&mut staging);
            writeln!(out, "ImageId,Label")?;
            for (index, label) in labels.iter().enumerate() {
                writeln!(out, "{},{}", index + 1, label)?;
            }
            out.flush()?;
        }
        staging.as_file().sync_all()?;
        // On failure the staging file is removed when it is dropped.
        staging.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl ResultExporter for CsvExporter {
    fn export(&self, labels: &[i64]) -> Result<ExportReport, ExportError> {
        self.write(labels).map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(ExportReport {
            rows: labels.len(),
            destination: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use images_common::{DEFAULT_LABEL, IMAGE_COUNT};

    use super::*;

    fn file_names(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_untouched_store_exports_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("output.csv"));

        let report = exporter.export(&vec![DEFAULT_LABEL; IMAGE_COUNT]).unwrap();
        assert_eq!(report.rows, IMAGE_COUNT);

        let text = fs::read_to_string(&exporter.path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), IMAGE_COUNT + 1);
        assert_eq!(lines[0], "ImageId,Label");
        assert_eq!(lines[1], "1,1");
        assert_eq!(lines[IMAGE_COUNT], "28000,1");
        assert_eq!(file_names(dir.path()), vec!["output.csv".to_string()]);
    }

    #[test]
    fn test_rows_follow_label_order() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("labels.csv"));
        exporter.export(&[3, 1, 4]).unwrap();

        let text = fs::read_to_string(&exporter.path).unwrap();
        assert_eq!(text, "ImageId,Label\n1,3\n2,1\n3,4\n");
    }

    #[test]
    fn test_unwritable_destination() {
        let exporter = CsvExporter::new("/nonexistent/dir/output.csv");
        let err = exporter.export(&[1]).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_concurrent_exports_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("output.csv"));

        for round in 0..10i64 {
            std::thread::scope(|scope| {
                for worker in 0..4i64 {
                    let exporter = &exporter;
                    scope.spawn(move || {
                        let labels = vec![worker * 1000 + round; IMAGE_COUNT];
                        exporter.export(&labels).unwrap();
                    });
                }
            });

            // The file holds one writer's complete export.
            let text = fs::read_to_string(&exporter.path).unwrap();
            let labels: Vec<&str> = text
                .lines()
                .skip(1)
                .map(|line| line.split_once(',').unwrap().1)
                .collect();
            assert_eq!(labels.len(), IMAGE_COUNT, "round {round}");
            assert!(labels.iter().all(|label| *label == labels[0]), "round {round}");
        }
        assert_eq!(file_names(dir.path()), vec!["output.csv".to_string()]);
    }

    #[test]
    fn test_relative_destination_stages_in_working_dir() {
        let exporter = CsvExporter::new("output.csv");
        assert_eq!(exporter.staging_dir(), Path::new("."));
    }
}
