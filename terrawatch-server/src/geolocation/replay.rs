//! Replay of a recorded track as a geolocation provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use terrawatch_core::{Coordinate, GeolocationError, PositionOptions};

use super::GeolocationProvider;
use crate::error::MonitorError;

/// One recorded answer: a fix, or a failure such as
/// `{"error": "timeout", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    Fix { lat: f64, lon: f64 },
    Failure(GeolocationError),
}

/// Answers requests from a recorded track, one entry per request.
///
/// Once the track is exhausted the last entry repeats, like a device that
/// stopped moving.
#[derive(Debug)]
pub struct ReplayProvider {
    entries: Vec<TrackEntry>,
    cursor: AtomicUsize,
}

impl ReplayProvider {
    pub fn new(entries: Vec<TrackEntry>) -> Self {
        ReplayProvider {
            entries,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, MonitorError> {
        let text = std::fs::read_to_string(path).map_err(|source| MonitorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<TrackEntry> =
            serde_json::from_str(&text).map_err(|source| MonitorError::Track {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded track {} with {} entries", path.display(), entries.len());
        Ok(ReplayProvider::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of requests answered so far
    pub fn requests(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeolocationProvider for ReplayProvider {
    async fn request(&self, _options: &PositionOptions) -> Result<Coordinate, GeolocationError> {
        let n = self.cursor.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .entries
            .get(n)
            .or_else(|| self.entries.last())
            .ok_or_else(|| GeolocationError::PositionUnavailable("track is empty".to_string()))?;

        match entry {
            TrackEntry::Fix { lat, lon } => Ok(Coordinate::new(*lon, *lat)),
            TrackEntry::Failure(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRACK: &str = r#"[
        {"lat": 5.0, "lon": 5.0},
        {"error": "timeout", "message": "no satellites"},
        {"lat": 20.0, "lon": 20.0}
    ]"#;

    #[test]
    fn test_track_entries() {
        let entries: Vec<TrackEntry> = serde_json::from_str(TRACK).unwrap();
        assert_eq!(entries[0], TrackEntry::Fix { lat: 5.0, lon: 5.0 });
        assert_eq!(
            entries[1],
            TrackEntry::Failure(GeolocationError::Timeout("no satellites".to_string()))
        );
    }

    #[tokio::test]
    async fn test_replay_order_and_repeat() {
        let provider = ReplayProvider::new(serde_json::from_str(TRACK).unwrap());
        let options = PositionOptions::default();

        assert_eq!(provider.request(&options).await, Ok(Coordinate::new(5.0, 5.0)));
        assert!(provider.request(&options).await.is_err());
        assert_eq!(provider.request(&options).await, Ok(Coordinate::new(20.0, 20.0)));
        assert_eq!(provider.request(&options).await, Ok(Coordinate::new(20.0, 20.0)));
        assert_eq!(provider.requests(), 4);
    }

    #[tokio::test]
    async fn test_empty_track() {
        let provider = ReplayProvider::new(Vec::new());
        assert!(provider.is_empty());
        let err = provider.request(&PositionOptions::default()).await.unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRACK.as_bytes()).unwrap();
        let provider = ReplayProvider::from_file(file.path()).unwrap();
        assert_eq!(provider.len(), 3);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(b"[{\"lat\": 1}]").unwrap();
        assert!(matches!(
            ReplayProvider::from_file(bad.path()),
            Err(MonitorError::Track { .. })
        ));

        assert!(matches!(
            ReplayProvider::from_file(Path::new("/nonexistent/track.json")),
            Err(MonitorError::Io { .. })
        ));
    }

    #[test]
    fn test_demo_track() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/charlotte-track.json");
        let provider = ReplayProvider::from_file(&path).unwrap();
        assert_eq!(provider.len(), 7);
    }
}
