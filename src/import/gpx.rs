use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::import::FixImport;
use crate::models::GeoFix;

/// GPX importer mapping track-segment waypoints to fixes
pub struct GpxFixImporter;

impl GpxFixImporter {
    pub fn new() -> Self {
        Self
    }
}

impl FixImport for GpxFixImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase() == "gpx")
            .unwrap_or(false)
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<GeoFix>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let gpx = gpx::read(BufReader::new(file))
            .with_context(|| format!("Failed to parse GPX file {}", file_path.display()))?;

        let mut fixes = Vec::new();
        for track in &gpx.tracks {
            for segment in &track.segments {
                for waypoint in &segment.points {
                    let time = waypoint.time.as_ref().ok_or_else(|| {
                        anyhow!(
                            "GPX waypoint without a timestamp in {}",
                            file_path.display()
                        )
                    })?;
                    let iso = time
                        .format()
                        .map_err(|e| anyhow!("Unformattable GPX timestamp: {}", e))?;
                    let timestamp = DateTime::parse_from_rfc3339(&iso)
                        .with_context(|| format!("Invalid GPX timestamp {}", iso))?
                        .with_timezone(&Utc);

                    let point = waypoint.point();
                    fixes.push(GeoFix::new(point.y(), point.x(), timestamp));
                }
            }
        }

        Ok(fixes)
    }

    fn format_name(&self) -> &'static str {
        "GPX"
    }
}
