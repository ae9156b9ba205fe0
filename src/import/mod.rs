use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::models::GeoFix;

pub mod csv;
pub mod gpx;

/// Trait for reading recorded GPS fixes from different file formats
pub trait FixImport {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Read all fixes from the file, in recorded order
    fn import_file(&self, file_path: &Path) -> Result<Vec<GeoFix>>;

    /// Get the format name for this importer
    fn format_name(&self) -> &'static str;
}

/// Manager coordinating the available track formats
pub struct ImportManager {
    importers: Vec<Box<dyn FixImport>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn FixImport>> = vec![
            Box::new(csv::CsvFixImporter::new()),
            Box::new(gpx::GpxFixImporter::new()),
        ];

        Self { importers }
    }

    /// Import a single track file, auto-detecting the format
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<GeoFix>> {
        for importer in &self.importers {
            if importer.can_import(file_path) {
                info!(
                    file = %file_path.display(),
                    format = importer.format_name(),
                    "importing track"
                );
                return importer.import_file(file_path);
            }
        }

        anyhow::bail!("No importer found for file: {}", file_path.display());
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unknown_extension_is_rejected() {
        let manager = ImportManager::new();
        let err = manager.import_file(&PathBuf::from("run.fit")).unwrap_err();
        assert!(err.to_string().contains("No importer found"));
    }
}
