use crate::domain::model::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres using the haversine formula.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // 浮點誤差可能讓 h 略微超出 [0, 1]
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn random_point(rng: &mut StdRng) -> GeoPoint {
        point(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
    }

    #[test]
    fn test_known_distance() {
        // NYC to London: ~5,570 km
        let dist = distance_km(point(40.7128, -74.0060), point(51.5074, -0.1278));
        assert!((dist - 5570.0).abs() < 10.0);
    }

    #[test]
    fn test_identity_symmetry_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let a = random_point(&mut rng);
            let b = random_point(&mut rng);

            assert_eq!(distance_km(a, a), 0.0);
            let d = distance_km(a, b);
            assert!((d - distance_km(b, a)).abs() < 1e-9);
            assert!((0.0..=20015.1).contains(&d), "distance out of bounds: {}", d);
        }
    }

    #[test]
    fn test_antimeridian() {
        // 跨越 ±180 度經線應為短距離
        let dist = distance_km(point(0.0, 179.5), point(0.0, -179.5));
        assert!((dist - 111.19).abs() < 0.5);
    }

    #[test]
    fn test_poles_and_antipodes() {
        let dist = distance_km(point(90.0, 0.0), point(-90.0, 0.0));
        assert!((dist - 20015.09).abs() < 0.1);

        // 在極點上，經度不影響位置
        let dist = distance_km(point(90.0, 45.0), point(90.0, -135.0));
        assert!(dist < 1e-6);

        let dist = distance_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!((dist - 20015.09).abs() < 0.1);
    }
}
