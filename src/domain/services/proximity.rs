//! Proximity Resolver
//!
//! Pure domain logic for finding the outlets around a selected one.

use crate::domain::entities::Outlet;
use crate::domain::value_objects::Coordinate;

/// Catchment radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Outlets within `radius_km` of `origin`, excluding `origin` itself.
///
/// Input order is preserved. A negative radius matches nothing.
pub fn nearby(origin: &Outlet, all: &[Outlet], radius_km: f64) -> Vec<Outlet> {
    nearby_with_distance(origin, all, radius_km)
        .into_iter()
        .map(|(outlet, _)| outlet)
        .collect()
}

/// Same filter as [`nearby`], keeping the distance of each match.
pub fn nearby_with_distance(origin: &Outlet, all: &[Outlet], radius_km: f64) -> Vec<(Outlet, f64)> {
    all.iter()
        .filter(|other| other.id != origin.id)
        .filter_map(|other| {
            let distance = origin.coordinate.distance_km(&other.coordinate);
            (distance <= radius_km).then(|| (other.clone(), distance))
        })
        .collect()
}

/// Outlets within `radius_km` of an arbitrary point, with their distances.
///
/// Every outlet is a candidate, including one sitting on the point itself.
pub fn around_point(point: &Coordinate, all: &[Outlet], radius_km: f64) -> Vec<(Outlet, f64)> {
    all.iter()
        .filter_map(|outlet| {
            let distance = point.distance_km(&outlet.coordinate);
            (distance <= radius_km).then(|| (outlet.clone(), distance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Test Helpers =====

    fn outlet(id: i64, name: &str, lat: f64, lon: f64) -> Outlet {
        Outlet {
            id,
            name: name.to_string(),
            address: format!("{} address", name),
            coordinate: Coordinate::new(lat, lon).unwrap(),
            operating_hours: "8:00 AM - 10:00 PM".to_string(),
            waze_link: None,
        }
    }

    fn kl_outlets() -> Vec<Outlet> {
        vec![
            outlet(1, "KLCC", 3.139, 101.6869),
            outlet(2, "Near", 3.140, 101.690),
            outlet(3, "Far", 3.200, 102.00),
        ]
    }

    fn names(outlets: &[Outlet]) -> Vec<&str> {
        outlets.iter().map(|o| o.name.as_str()).collect()
    }

    // ===== nearby Tests =====

    #[test]
    fn test_nearby_default_radius() {
        let all = kl_outlets();

        let result = nearby(&all[0], &all, DEFAULT_RADIUS_KM);

        assert_eq!(names(&result), vec!["Near"]);
    }

    #[test]
    fn test_nearby_excludes_origin_even_at_zero_radius() {
        let all = kl_outlets();

        let result = nearby(&all[0], &all, 0.0);

        assert!(result.is_empty());
    }

    #[test]
    fn test_nearby_includes_colocated_outlet_at_zero_radius() {
        let mut all = kl_outlets();
        all.push(outlet(4, "Same Mall", 3.139, 101.6869));

        let result = nearby(&all[0], &all, 0.0);

        assert_eq!(names(&result), vec!["Same Mall"]);
    }

    #[test]
    fn test_nearby_large_radius_preserves_input_order() {
        let all = kl_outlets();

        let result = nearby(&all[2], &all, 100.0);

        assert_eq!(names(&result), vec!["KLCC", "Near"]);
    }

    #[test]
    fn test_nearby_negative_radius_is_empty() {
        let mut all = kl_outlets();
        all.push(outlet(4, "Same Mall", 3.139, 101.6869));

        assert!(nearby(&all[0], &all, -1.0).is_empty());
    }

    #[test]
    fn test_nearby_never_exceeds_radius() {
        let all = vec![
            outlet(1, "A", 3.139, 101.6869),
            outlet(2, "B", 3.150, 101.700),
            outlet(3, "C", 3.170, 101.720),
            outlet(4, "D", 3.100, 101.650),
            outlet(5, "E", 3.000, 101.500),
        ];

        for radius in [0.5, 1.0, 2.5, 5.0, 10.0, 25.0] {
            for origin in &all {
                for (other, d) in nearby_with_distance(origin, &all, radius) {
                    assert_ne!(other.id, origin.id);
                    assert!(d <= radius);
                    assert!(origin.coordinate.distance_km(&other.coordinate) <= radius);
                }
            }
        }
    }

    #[test]
    fn test_nearby_does_not_mutate_inputs() {
        let all = kl_outlets();
        let before = all.clone();

        let _ = nearby(&all[0], &all, DEFAULT_RADIUS_KM);

        assert_eq!(all, before);
    }

    #[test]
    fn test_nearby_with_distance_reports_km() {
        let all = kl_outlets();

        let result = nearby_with_distance(&all[0], &all, DEFAULT_RADIUS_KM);

        assert_eq!(result.len(), 1);
        assert!(result[0].1 > 0.3 && result[0].1 < 0.5);
    }

    #[test]
    fn test_nearby_empty_directory() {
        let origin = outlet(1, "Lonely", 3.0, 101.0);
        assert!(nearby(&origin, &[], DEFAULT_RADIUS_KM).is_empty());
    }

    // ===== around_point Tests =====

    #[test]
    fn test_around_point_includes_outlet_on_the_point() {
        let all = kl_outlets();
        let point = Coordinate::new(3.139, 101.6869).unwrap();

        let result = around_point(&point, &all, DEFAULT_RADIUS_KM);

        let found: Vec<&str> = result.iter().map(|(o, _)| o.name.as_str()).collect();
        assert_eq!(found, vec!["KLCC", "Near"]);
        assert_eq!(result[0].1, 0.0);
    }

    #[test]
    fn test_around_point_respects_radius() {
        let all = kl_outlets();
        let point = Coordinate::new(3.200, 102.00).unwrap();

        for radius in [0.0, 1.0, 10.0, 50.0] {
            for (outlet, d) in around_point(&point, &all, radius) {
                assert!(d <= radius);
                assert!(point.distance_km(&outlet.coordinate) <= radius);
            }
        }
        assert_eq!(around_point(&point, &all, 50.0).len(), 3);
    }
}
