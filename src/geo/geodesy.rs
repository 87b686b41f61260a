use super::location::GeoLocation;

/// Mean Earth radius, m. Used by both projection and distance.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

// ---------------------------------------------------------------------------
// Spherical forward geodesic
// ---------------------------------------------------------------------------

/// Move `position` `distance_m` along the great circle leaving at
/// `bearing_deg` (clockwise from North). Overwrites the position in place.
pub fn project_along_bearing(position: &mut GeoLocation, distance_m: f64, bearing_deg: f64) {
    let lat1 = position.latitude().to_radians();
    let lon1 = position.longitude().to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_RADIUS;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    position.set(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()));
}

/// Wrap a longitude into [-180, 180].
fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}

// ---------------------------------------------------------------------------
// Distance and bearing
// ---------------------------------------------------------------------------

/// Haversine great-circle distance, m.
pub fn great_circle_distance(a: &GeoLocation, b: &GeoLocation) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `a` towards `b`, degrees in [0, 360).
pub fn initial_bearing(a: &GeoLocation, b: &GeoLocation) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    crate::units::normalize_degrees(x.atan2(y).to_degrees())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn loc(lat: f64, lon: f64) -> GeoLocation {
        GeoLocation::new(lat, lon).unwrap()
    }

    #[test]
    fn zero_distance_keeps_position() {
        for bearing in [0.0, 45.0, 180.0, 299.0] {
            let mut p = loc(35.35, -117.81);
            project_along_bearing(&mut p, 0.0, bearing);
            assert_abs_diff_eq!(p.latitude(), 35.35, epsilon = 1e-12);
            assert_abs_diff_eq!(p.longitude(), -117.81, epsilon = 1e-12);
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = loc(-12.5, 130.2);
        assert_eq!(great_circle_distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = loc(40.0, -105.0);
        let b = loc(41.5, -103.2);
        assert_abs_diff_eq!(
            great_circle_distance(&a, &b),
            great_circle_distance(&b, &a),
            epsilon = 1e-9
        );
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = loc(0.0, 0.0);
        let b = loc(1.0, 0.0);
        // 2*pi*R/360
        assert_abs_diff_eq!(great_circle_distance(&a, &b), 111_194.9, epsilon = 1.0);
    }

    #[test]
    fn triangle_inequality() {
        let a = loc(10.0, 10.0);
        let b = loc(11.0, 12.0);
        let c = loc(9.0, 14.0);
        let ab = great_circle_distance(&a, &b);
        let bc = great_circle_distance(&b, &c);
        let ac = great_circle_distance(&a, &c);
        assert!(ac <= ab + bc + 1e-6);
    }

    #[test]
    fn projection_matches_distance_and_bearing() {
        let start = loc(35.0, -106.0);
        let mut p = start;
        project_along_bearing(&mut p, 2_500.0, 60.0);
        assert_abs_diff_eq!(great_circle_distance(&start, &p), 2_500.0, epsilon = 1e-3);
        assert_abs_diff_eq!(initial_bearing(&start, &p), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn projection_north_increases_latitude() {
        let mut p = loc(20.0, 30.0);
        project_along_bearing(&mut p, 1_000.0, 0.0);
        assert!(p.latitude() > 20.0);
        assert_abs_diff_eq!(p.longitude(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn projection_across_antimeridian_wraps() {
        let mut p = loc(0.0, 179.999);
        project_along_bearing(&mut p, 1_000.0, 90.0);
        assert!(p.longitude() < -179.0);
    }
}
