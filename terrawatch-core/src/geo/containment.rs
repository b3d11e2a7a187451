use super::coordinate::{Coordinate, Polygon};

/// Is `point` inside `polygon`?
///
/// Only the exterior ring is evaluated. A polygon without rings, or whose
/// exterior ring has fewer than three vertices, contains nothing.
pub fn contains(point: &Coordinate, polygon: &Polygon) -> bool {
    match polygon.exterior() {
        Some(ring) => ring_contains(point, ring),
        None => false,
    }
}

/// Horizontal ray casting against one ring.
///
/// The ring is implicitly closed (last vertex connects to the first), so an
/// explicitly repeated closing vertex is harmless. The inside flag toggles
/// for every edge that straddles the point's latitude and crosses it east of
/// the point.
///
/// Points exactly on an edge or vertex have no defined parity.
pub fn ring_contains(point: &Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lon, ring[i].lat);
        let (xj, yj) = (ring[j].lon, ring[j].lat);

        // Straddle check first: it also guarantees yj != yi below
        if (yi > y) != (yj > y) {
            let crossing_x = (xj - xi) * (y - yi) / (yj - yi) + xi;
            if x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
