use geo::{Distance, Haversine, Point};
use relatos_core::models::Coordinate;
use std::cmp::Ordering;

pub use relatos_core::config::DEFAULT_RADIUS_KM;

fn to_point(coord: Coordinate) -> Point {
    Point::new(coord.lon, coord.lat)
}

/// Total order on coordinates, used to fix the argument order of the
/// distance computation.
fn canonical_order(a: &Coordinate, b: &Coordinate) -> Ordering {
    a.lat.total_cmp(&b.lat).then(a.lon.total_cmp(&b.lon))
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula on the mean earth radius. The result is
/// bit-identical for `distance_km(a, b)` and `distance_km(b, a)`.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (origin, destination) = match canonical_order(&a, &b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };

    Haversine.distance(to_point(origin), to_point(destination)) / 1000.0
}

/// Whether `point` lies within `radius_km` of `center` (inclusive).
///
/// Non-finite coordinates are never within any radius.
pub fn within_radius(point: Coordinate, center: Coordinate, radius_km: f64) -> bool {
    distance_km(point, center) <= radius_km
}
