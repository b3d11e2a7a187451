use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
///
/// Serialized as a `[longitude, latitude]` pair, the GeoJSON order used by
/// the catalog backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinate { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Coordinate::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// A polygon as a list of linear rings.
///
/// The first ring is the exterior boundary. Further rings (holes) are kept
/// for round-tripping but are not subtracted during containment tests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub rings: Vec<Vec<Coordinate>>,
}

impl Polygon {
    pub fn new(rings: Vec<Vec<Coordinate>>) -> Self {
        Polygon { rings }
    }

    /// Polygon with only an exterior ring
    pub fn from_exterior(ring: Vec<Coordinate>) -> Self {
        Polygon { rings: vec![ring] }
    }

    /// The exterior ring, if there is one
    pub fn exterior(&self) -> Option<&[Coordinate]> {
        self.rings.first().map(|r| r.as_slice())
    }

    /// Vertex average of the exterior ring.
    ///
    /// A closing vertex that repeats the first one is not counted twice.
    /// Returns `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Coordinate> {
        let ring = self.exterior()?;
        let ring = match ring {
            [first, .., last] if first == last => &ring[..ring.len() - 1],
            _ => ring,
        };
        if ring.is_empty() {
            return None;
        }
        let n = ring.len() as f64;
        let (lon, lat) = ring
            .iter()
            .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));
        Some(Coordinate::new(lon / n, lat / n))
    }
}
