use crate::models::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to every radius so Rust and Postgres agree on boundary venues.
pub const RADIUS_TOLERANCE_KM: f64 = 1e-6;

/// Great-circle distance in kilometres on a spherical Earth.
///
/// The cosine is clamped to [-1, 1] before `acos`; rounding can push it just
/// outside that range for identical or antipodal points.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let cos_angle = (lat1.cos() * lat2.cos() * delta_lng.cos() + lat1.sin() * lat2.sin())
        .clamp(-1.0, 1.0);

    EARTH_RADIUS_KM * cos_angle.acos()
}

pub fn within_radius(origin: GeoPoint, point: GeoPoint, radius_km: f64) -> bool {
    distance_km(origin, point) <= radius_km + RADIUS_TOLERANCE_KM
}
