//! Properties of the bounding-box approximation

use clubnet_core::geo::KM_PER_DEGREE;
use clubnet_core::BoundingBox;
use proptest::prelude::*;

proptest! {
    #[test]
    fn centre_is_always_inside(lat in -80.0f64..80.0, long in -170.0f64..170.0, radius in 0.0f64..500.0) {
        let bbox = BoundingBox::around(lat, long, radius).unwrap();
        prop_assert!(bbox.contains(lat, long));
    }

    #[test]
    fn latitude_span_ignores_position(lat in -80.0f64..80.0, long in -170.0f64..170.0, radius in 0.0f64..500.0) {
        let bbox = BoundingBox::around(lat, long, radius).unwrap();
        let expected = 2.0 * radius / KM_PER_DEGREE;
        prop_assert!(((bbox.max_lat - bbox.min_lat) - expected).abs() < 1e-9);
    }

    #[test]
    fn points_due_north_inside_radius_are_contained(lat in -80.0f64..80.0, radius in 1.0f64..500.0, frac in 0.0f64..0.99) {
        let bbox = BoundingBox::around(lat, 0.0, radius).unwrap();
        let north = lat + frac * radius / KM_PER_DEGREE;
        prop_assert!(bbox.contains(north, 0.0));
    }

    #[test]
    fn larger_radius_never_shrinks_box(lat in -80.0f64..80.0, long in -170.0f64..170.0, r in 0.0f64..200.0, extra in 0.0f64..200.0) {
        let small = BoundingBox::around(lat, long, r).unwrap();
        let large = BoundingBox::around(lat, long, r + extra).unwrap();
        prop_assert!(large.min_lat <= small.min_lat && large.max_lat >= small.max_lat);
        prop_assert!(large.min_long <= small.min_long && large.max_long >= small.max_long);
    }
}
