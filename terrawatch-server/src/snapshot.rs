//! Assignment snapshot loading.

use std::path::Path;

use terrawatch_core::AssignmentSnapshot;

use crate::error::MonitorError;

/// Read and parse a snapshot document
pub fn load_snapshot(path: &Path) -> Result<AssignmentSnapshot, MonitorError> {
    let text = std::fs::read_to_string(path).map_err(|source| MonitorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = AssignmentSnapshot::from_json(&text)?;

    log::info!(
        "Snapshot {}: {} assigned zones, {} assigned points{}",
        path.display(),
        snapshot.assigned_zones.len(),
        snapshot.assigned_points.len(),
        if snapshot.is_assignment_only() {
            " (assignment-only, no foreign detection)"
        } else {
            ""
        }
    );
    log::debug!(
        "Snapshot {}: {} foreign zones, {} foreign points",
        path.display(),
        snapshot.foreign_zones().len(),
        snapshot.foreign_points().len()
    );

    Ok(snapshot)
}
