use crate::entities::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point count of a synthesized fallback path.
pub const SYNTHETIC_PATH_POINTS: usize = 21;

const SYNTHETIC_CURVE_AMPLITUDE: f64 = 0.001;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Minutes to cover `distance_km` at a constant `average_speed_kmh`. A
/// deliberately naive estimate with no traffic awareness.
pub fn estimate_eta_minutes(distance_km: f64, average_speed_kmh: f64) -> i64 {
    if average_speed_kmh <= 0.0 {
        return 0;
    }

    (distance_km / average_speed_kmh * 60.0).ceil() as i64
}

/// Stand-in path used when the directions provider is unavailable: a linear
/// interpolation with a sinusoidal lateral offset so the line does not
/// render perfectly straight. Endpoints are exact.
pub fn synthetic_path(origin: Coordinates, destination: Coordinates) -> Vec<Coordinates> {
    let steps = SYNTHETIC_PATH_POINTS - 1;

    (0..=steps)
        .map(|i| {
            let ratio = i as f64 / steps as f64;
            let offset = (ratio * std::f64::consts::PI).sin() * SYNTHETIC_CURVE_AMPLITUDE;

            Coordinates {
                latitude: origin.latitude
                    + (destination.latitude - origin.latitude) * ratio
                    + offset,
                longitude: origin.longitude
                    + (destination.longitude - origin.longitude) * ratio
                    + offset / 2.0,
            }
        })
        .collect()
}

/// A freshly computed path only replaces the cached one when it is visibly
/// different: a different point count, or a first point that moved more
/// than ~1 m.
pub(crate) fn path_unchanged(previous: &[Coordinates], next: &[Coordinates]) -> bool {
    if previous.len() != next.len() {
        return false;
    }

    match (previous.first(), next.first()) {
        (Some(&a), Some(&b)) => haversine_km(a, b) <= 0.001,
        _ => previous.is_empty() && next.is_empty(),
    }
}
