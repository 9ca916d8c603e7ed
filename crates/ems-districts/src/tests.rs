//! Unit tests for ems-districts.
//!
//! All tests use a hand-crafted strip of square districts so they run
//! without any GeoJSON file.

#[cfg(test)]
mod helpers {
    use ems_core::DistrictCode;

    use crate::{District, DistrictMap};

    /// Three 2×2 km square districts side by side along the x axis:
    ///
    /// ```text
    /// y=2 ┌──────┬──────┬──────┐
    ///     │  D1  │  D2  │  D3  │
    /// y=0 └──────┴──────┴──────┘
    ///    x=0    x=2    x=4    x=6
    /// ```
    ///
    /// Adjacent districts share their vertical boundary edge, as real
    /// district datasets do.
    pub fn strip_city() -> DistrictMap {
        let square = |x0: f64| {
            vec![(x0, 0.0), (x0 + 2.0, 0.0), (x0 + 2.0, 2.0), (x0, 2.0)]
        };
        DistrictMap::new(vec![
            District::new(DistrictCode(1), "WEST", 4.0, 20_000.0, &square(0.0)).unwrap(),
            District::new(DistrictCode(2), "CENTRE", 4.0, 30_000.0, &square(2.0)).unwrap(),
            District::new(DistrictCode(3), "EAST", 4.0, 10_000.0, &square(4.0)).unwrap(),
        ])
        .unwrap()
    }
}

// ── District construction & containment ───────────────────────────────────────

#[cfg(test)]
mod district {
    use ems_core::{DistrictCode, Point};

    use crate::{District, DistrictError, DistrictMap};

    #[test]
    fn reserved_code_rejected() {
        let r = District::new(DistrictCode(0), "X", 1.0, 1.0, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(matches!(r, Err(DistrictError::ReservedCode)));
    }

    #[test]
    fn degenerate_ring_rejected() {
        let r = District::new(DistrictCode(1), "X", 1.0, 1.0, &[(0.0, 0.0), (1.0, 0.0)]);
        assert!(matches!(r, Err(DistrictError::DegenerateRing(DistrictCode(1), 2))));
    }

    #[test]
    fn duplicate_code_rejected() {
        let ring = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        let a = District::new(DistrictCode(1), "A", 1.0, 1.0, &ring).unwrap();
        let b = District::new(DistrictCode(1), "B", 1.0, 1.0, &ring).unwrap();
        let r = DistrictMap::new(vec![a, b]);
        assert!(matches!(r, Err(DistrictError::DuplicateCode(DistrictCode(1)))));
    }

    #[test]
    fn containment_per_district() {
        let map = super::helpers::strip_city();
        assert_eq!(map.district_containing(Point::new(1.0, 1.0)), Some(DistrictCode(1)));
        assert_eq!(map.district_containing(Point::new(3.0, 1.0)), Some(DistrictCode(2)));
        assert_eq!(map.district_containing(Point::new(5.0, 1.0)), Some(DistrictCode(3)));
    }

    #[test]
    fn outside_every_district_is_none() {
        let map = super::helpers::strip_city();
        assert_eq!(map.district_containing(Point::new(-1.0, 1.0)), None);
        assert_eq!(map.district_containing(Point::new(3.0, 5.0)), None);
    }

    #[test]
    fn lookup_by_code() {
        let map = super::helpers::strip_city();
        assert_eq!(map.get(DistrictCode(2)).unwrap().name, "CENTRE");
        assert!(map.get(DistrictCode(9)).is_none());
        assert_eq!(map.len(), 3);
    }
}

// ── Route crossings ───────────────────────────────────────────────────────────

#[cfg(test)]
mod crossings {
    use ems_core::{DistrictCode, Point};

    #[test]
    fn two_district_route() {
        let map = super::helpers::strip_city();
        let cuts = map.route_crossings(Point::new(1.0, 1.0), Point::new(3.0, 1.0));

        // Both D1 and D2 see the shared boundary crossing at x=2.
        assert_eq!(cuts.len(), 2);
        let d1 = &cuts[&DistrictCode(1)];
        assert_eq!(d1.len(), 1);
        assert!((d1[0].x - 2.0).abs() < 1e-12 && (d1[0].y - 1.0).abs() < 1e-12);
        assert_eq!(cuts[&DistrictCode(2)].len(), 1);
    }

    #[test]
    fn transited_district_has_entry_and_exit() {
        let map = super::helpers::strip_city();
        let cuts = map.route_crossings(Point::new(1.0, 1.0), Point::new(5.0, 1.0));

        // D2 is fully transited: entry at x=2, exit at x=4, in that order.
        let d2 = &cuts[&DistrictCode(2)];
        assert_eq!(d2.len(), 2);
        assert!(d2[0].x < d2[1].x, "crossings must be in encounter order");
        assert_eq!(cuts[&DistrictCode(1)].len(), 1);
        assert_eq!(cuts[&DistrictCode(3)].len(), 1);
    }

    #[test]
    fn same_district_route_has_no_crossings() {
        let map = super::helpers::strip_city();
        let cuts = map.route_crossings(Point::new(0.5, 0.5), Point::new(1.5, 1.5));
        assert!(cuts.is_empty());
    }

    #[test]
    fn vertex_pass_through_counted_once() {
        let map = super::helpers::strip_city();
        // Diagonal route exits D1 exactly through the ring vertex (2, 2);
        // both adjacent ring edges report the same hit.
        let cuts = map.route_crossings(Point::new(1.0, 1.0), Point::new(3.0, 3.0));
        assert_eq!(cuts[&DistrictCode(1)].len(), 1);
    }

    #[test]
    fn untouched_districts_absent() {
        let map = super::helpers::strip_city();
        let cuts = map.route_crossings(Point::new(0.5, 1.0), Point::new(1.5, 1.0));
        assert!(!cuts.contains_key(&DistrictCode(3)));
    }
}

// ── Segment decomposition ─────────────────────────────────────────────────────

#[cfg(test)]
mod segments {
    use ems_core::{DistrictCode, Point};

    use crate::RouteZone;

    #[test]
    fn three_district_decomposition() {
        let map = super::helpers::strip_city();
        let origin = Point::new(1.0, 1.0);
        let dest = Point::new(5.0, 1.0);
        let lengths =
            map.segment_lengths(DistrictCode(1), origin, DistrictCode(3), dest);

        assert!((lengths[&RouteZone::District(DistrictCode(1))] - 1.0).abs() < 1e-9);
        assert!((lengths[&RouteZone::District(DistrictCode(2))] - 2.0).abs() < 1e-9);
        assert!((lengths[&RouteZone::District(DistrictCode(3))] - 1.0).abs() < 1e-9);
        assert!(lengths[&RouteZone::Unassigned] < 1e-9);
    }

    #[test]
    fn same_district_gets_full_distance() {
        let map = super::helpers::strip_city();
        let origin = Point::new(0.5, 0.5);
        let dest = Point::new(1.5, 1.5);
        let lengths =
            map.segment_lengths(DistrictCode(1), origin, DistrictCode(1), dest);

        let expected = origin.distance_km(dest);
        assert!((lengths[&RouteZone::District(DistrictCode(1))] - expected).abs() < 1e-9);
        assert!(lengths[&RouteZone::Unassigned] < 1e-9);
    }

    #[test]
    fn decomposition_sums_to_straight_line() {
        let map = super::helpers::strip_city();
        // Diagonal crossing all three districts at an angle.
        let origin = Point::new(0.3, 0.2);
        let dest = Point::new(5.7, 1.9);
        let lengths =
            map.segment_lengths(DistrictCode(1), origin, DistrictCode(3), dest);

        let sum: f64 = lengths.values().sum();
        assert!((sum - origin.distance_km(dest)).abs() < 1e-9, "sum {sum}");
    }

    #[test]
    fn unassigned_endpoint_feeds_residual() {
        let map = super::helpers::strip_city();
        // Origin outside every district (west of the strip).
        let origin = Point::new(-1.0, 1.0);
        let dest = Point::new(1.0, 1.0);
        let lengths =
            map.segment_lengths(DistrictCode::UNASSIGNED, origin, DistrictCode(1), dest);

        // The km walked outside the strip cannot be attributed to a
        // district; it must survive in the residual, not vanish.
        let sum: f64 = lengths.values().sum();
        assert!((sum - 2.0).abs() < 1e-9);
        assert!(lengths[&RouteZone::Unassigned] > 0.9);
    }

    #[test]
    fn overlapping_districts_drive_the_residual_negative() {
        use crate::{District, DistrictMap};
        // Two squares sharing the strip x ∈ [1, 2]; that stretch is
        // attributed to both, so the residual must go negative to keep
        // the decomposition summing to the straight-line distance.
        let square = |x0: f64| vec![(x0, 0.0), (x0 + 2.0, 0.0), (x0 + 2.0, 2.0), (x0, 2.0)];
        let map = DistrictMap::new(vec![
            District::new(DistrictCode(1), "A", 4.0, 1.0, &square(0.0)).unwrap(),
            District::new(DistrictCode(2), "B", 4.0, 1.0, &square(1.0)).unwrap(),
        ])
        .unwrap();

        let origin = Point::new(0.5, 1.0);
        let dest = Point::new(2.5, 1.0);
        let lengths = map.segment_lengths(DistrictCode(1), origin, DistrictCode(2), dest);

        assert!((lengths[&RouteZone::District(DistrictCode(1))] - 1.5).abs() < 1e-9);
        assert!((lengths[&RouteZone::District(DistrictCode(2))] - 1.5).abs() < 1e-9);
        assert!((lengths[&RouteZone::Unassigned] - (-1.0)).abs() < 1e-9);
        let sum: f64 = lengths.values().sum();
        assert!((sum - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_length_route() {
        let map = super::helpers::strip_city();
        let p = Point::new(1.0, 1.0);
        let lengths = map.segment_lengths(DistrictCode(1), p, DistrictCode(1), p);
        let sum: f64 = lengths.values().sum();
        assert_eq!(sum, 0.0);
    }
}

// ── In-district sampling ──────────────────────────────────────────────────────

#[cfg(test)]
mod sampling {
    use ems_core::{DistrictCode, SimRng};

    use crate::DistrictError;

    #[test]
    fn sampled_points_are_inside() {
        let map = super::helpers::strip_city();
        let mut rng = SimRng::new(42);
        for _ in 0..200 {
            let p = map.random_point_in(DistrictCode(2), &mut rng).unwrap();
            assert_eq!(map.district_containing(p), Some(DistrictCode(2)));
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let map = super::helpers::strip_city();
        let mut r1 = SimRng::new(7);
        let mut r2 = SimRng::new(7);
        let a = map.random_point_in(DistrictCode(1), &mut r1).unwrap();
        let b = map.random_point_in(DistrictCode(1), &mut r2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_district_is_an_error() {
        let map = super::helpers::strip_city();
        let mut rng = SimRng::new(0);
        let r = map.random_point_in(DistrictCode(99), &mut rng);
        assert!(matches!(r, Err(DistrictError::UnknownDistrict(DistrictCode(99)))));
    }
}

// ── GeoJSON loading ───────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson {
    use std::io::Cursor;

    use ems_core::DistrictCode;

    use crate::{load_district_rings_reader, DistrictError};

    const VALID: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "district_c": 1, "NOMBRE": "CENTRO" },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
          }
        },
        {
          "type": "Feature",
          "properties": { "district_code": 2 },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[2.0, 0.0], [4.0, 0.0], [4.0, 2.0], [2.0, 2.0], [2.0, 0.0]]]
          }
        }
      ]
    }"#;

    #[test]
    fn loads_rings_with_either_property_name() {
        let rings = load_district_rings_reader(Cursor::new(VALID)).unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].0, DistrictCode(1));
        assert_eq!(rings[1].0, DistrictCode(2));
        assert_eq!(rings[0].1.len(), 5);
        assert_eq!(rings[0].1[1], (2.0, 0.0));
    }

    #[test]
    fn missing_code_property_is_fatal() {
        let doc = r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "properties": { "NOMBRE": "CENTRO" },
            "geometry": { "type": "Polygon",
              "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] }
          }]
        }"#;
        let r = load_district_rings_reader(Cursor::new(doc));
        assert!(matches!(r, Err(DistrictError::GeoJson(_))));
    }

    #[test]
    fn non_polygon_geometry_is_fatal() {
        let doc = r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "properties": { "district_c": 1 },
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
          }]
        }"#;
        let r = load_district_rings_reader(Cursor::new(doc));
        assert!(matches!(r, Err(DistrictError::GeoJson(_))));
    }

    #[test]
    fn garbage_input_is_fatal() {
        let r = load_district_rings_reader(Cursor::new("not geojson at all"));
        assert!(matches!(r, Err(DistrictError::GeoJson(_))));
    }
}
