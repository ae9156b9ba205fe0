use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

use crate::import::FixImport;
use crate::models::GeoFix;

/// One row of a recorded track: `latitude,longitude,timestamp`
#[derive(Debug, Deserialize)]
struct FixRecord {
    latitude: f64,
    longitude: f64,
    /// RFC 3339 instant, e.g. `2024-05-01T06:30:00Z`
    timestamp: DateTime<Utc>,
}

/// CSV importer for tracks recorded as plain fix rows
pub struct CsvFixImporter;

impl CsvFixImporter {
    pub fn new() -> Self {
        Self
    }
}

impl FixImport for CsvFixImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase() == "csv")
            .unwrap_or(false)
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<GeoFix>> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let mut fixes = Vec::new();
        for (index, record) in reader.deserialize::<FixRecord>().enumerate() {
            // header is line 1, first record line 2
            let record =
                record.with_context(|| format!("Invalid fix record at line {}", index + 2))?;
            fixes.push(GeoFix::new(
                record.latitude,
                record.longitude,
                record.timestamp,
            ));
        }

        Ok(fixes)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_can_import_by_extension() {
        let importer = CsvFixImporter::new();
        assert!(importer.can_import(Path::new("morning_run.csv")));
        assert!(importer.can_import(Path::new("MORNING_RUN.CSV")));
        assert!(!importer.can_import(Path::new("morning_run.gpx")));
        assert!(!importer.can_import(Path::new("no_extension")));
    }

    #[test]
    fn test_import_fix_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "latitude,longitude,timestamp").unwrap();
        writeln!(file, "37.5665,126.9780,2024-05-01T06:30:00Z").unwrap();
        writeln!(file, "37.5670, 126.9781, 2024-05-01T06:30:05Z").unwrap();

        let fixes = CsvFixImporter::new().import_file(file.path()).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].latitude, 37.5665);
        assert_eq!(fixes[1].longitude, 126.9781);
        assert!(fixes[1].timestamp > fixes[0].timestamp);
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "latitude,longitude,timestamp").unwrap();
        writeln!(file, "37.5665,126.9780,2024-05-01T06:30:00Z").unwrap();
        writeln!(file, "not-a-number,126.9781,2024-05-01T06:30:05Z").unwrap();

        let err = CsvFixImporter::new().import_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
