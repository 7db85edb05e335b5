use crate::geom::{
    BezierPath, CatmullRomSpline, Point3, SplineError, Tolerance, Vec3, circle_xz_point,
};

fn two_segment_points() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-2.5, 0.0, 2.5),
        Point3::new(2.5, 0.0, 7.5),
        Point3::new(0.0, 0.0, 10.0),
        Point3::new(-2.5, 0.0, 12.5),
        Point3::new(2.5, 0.0, 17.5),
        Point3::new(0.0, 0.0, 20.0),
    ]
}

/// Collinear, evenly spaced control points collapse the cubic to a line,
/// which makes expected sample positions exact.
fn straight_points() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]
}

#[test]
fn bezier_path_rejects_bad_control_point_counts() {
    for len in [0, 1, 2, 3, 5, 6, 8, 9] {
        let points = vec![Point3::ORIGIN; len];
        assert!(
            matches!(
                BezierPath::new(points),
                Err(SplineError::InvalidControlPointCount(got)) if got == len
            ),
            "expected rejection for {len} control points"
        );
    }
}

#[test]
fn bezier_path_rejects_non_finite_points() {
    let mut points = two_segment_points();
    points[2].y = f64::NAN;
    assert!(matches!(
        BezierPath::new(points),
        Err(SplineError::NonFiniteInput)
    ));
}

#[test]
fn bezier_path_rejects_zero_segments() {
    let path = BezierPath::new(two_segment_points()).unwrap();
    assert!(matches!(
        path.sample(0),
        Err(SplineError::InvalidSegmentCount)
    ));
    assert!(matches!(
        path.sample_velocities(0, Vec3::ZERO),
        Err(SplineError::InvalidSegmentCount)
    ));
}

#[test]
fn bezier_path_sample_count_and_endpoints() {
    let points = two_segment_points();
    let path = BezierPath::new(points.clone()).unwrap();
    assert_eq!(path.segment_count(), 2);

    let samples = path.sample(8).unwrap();
    assert_eq!(samples.len(), 2 * 8 + 1);
    assert_eq!(samples.first().copied(), Some(points[0]));
    assert_eq!(samples.last().copied(), Some(points[6]));

    // The shared anchor sits exactly once at the segment boundary.
    assert_eq!(samples[8], points[3]);
    assert_ne!(samples[7], samples[8]);
}

#[test]
fn bezier_path_sample_is_ordered_along_a_straight_path() {
    let path = BezierPath::new(straight_points()).unwrap();
    let samples = path.sample(4).unwrap();

    let tol = Tolerance::default_geom();
    assert_eq!(samples.len(), 5);
    for (k, p) in samples.iter().enumerate() {
        let expected = Point3::new(3.0 * k as f64 / 4.0, 0.0, 0.0);
        assert!(tol.approx_eq_point3(*p, expected), "sample {k} off the line");
    }
}

#[test]
fn bezier_path_velocities_are_offset_by_origin() {
    let path = BezierPath::new(straight_points()).unwrap();
    let tol = Tolerance::default_geom();

    // The straight path has constant derivative (3, 0, 0).
    let raw = path.sample_velocities(4, Vec3::ZERO).unwrap();
    assert_eq!(raw.len(), 5);
    for v in &raw {
        assert!(tol.approx_eq_vec3(*v, Vec3::new(3.0, 0.0, 0.0)));
    }

    let origin = Vec3::new(1.0, 2.0, 3.0);
    let relative = path.sample_velocities(4, origin).unwrap();
    for (v, r) in raw.iter().zip(&relative) {
        assert!(tol.approx_eq_vec3(*r, v.sub(origin)));
    }
}

#[test]
fn bezier_path_rails_straddle_the_path() {
    let path = BezierPath::new(two_segment_points()).unwrap();
    let (left, right) = path.sample_rails(8, 1.0, 90.0).unwrap();
    assert_eq!(left.len(), 17);
    assert_eq!(right.len(), 17);

    let tol = Tolerance::LOOSE;
    let center = path.sample(8).unwrap();
    for ((l, r), c) in left.iter().zip(&right).zip(&center) {
        // Opposite circle angles put the rails symmetrically around the
        // path, two radii apart.
        assert!(tol.approx_eq_point3(l.lerp(*r, 0.5), *c));
        assert!(tol.approx_eq_f64(l.distance_to(*r), 2.0));
    }
}

#[test]
fn circle_xz_point_walks_the_ground_plane() {
    let center = Point3::new(1.0, 2.0, 3.0);
    let tol = Tolerance::default_geom();
    assert!(tol.approx_eq_point3(
        circle_xz_point(center, 2.0, 0.0),
        Point3::new(1.0, 2.0, 5.0)
    ));
    assert!(tol.approx_eq_point3(
        circle_xz_point(center, 2.0, 90.0),
        Point3::new(3.0, 2.0, 3.0)
    ));
    assert!(tol.approx_eq_point3(
        circle_xz_point(center, 2.0, -90.0),
        Point3::new(-1.0, 2.0, 3.0)
    ));
}

#[test]
fn catmull_rom_spline_rejects_short_and_non_finite_input() {
    assert!(matches!(
        CatmullRomSpline::new(vec![Point3::ORIGIN]),
        Err(SplineError::InvalidControlPointCount(1))
    ));
    assert!(matches!(
        CatmullRomSpline::new(vec![
            Point3::ORIGIN,
            Point3::new(f64::INFINITY, 0.0, 0.0)
        ]),
        Err(SplineError::NonFiniteInput)
    ));
}

#[test]
fn catmull_rom_spline_passes_through_every_anchor() {
    let anchors = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(3.0, 2.0, 1.0),
        Point3::new(4.0, 0.0, 2.0),
    ];
    let spline = CatmullRomSpline::new(anchors.clone()).unwrap();
    assert_eq!(spline.segment_count(), 3);

    let segments = 6;
    let samples = spline.sample(segments).unwrap();
    assert_eq!(samples.len(), 3 * segments + 1);

    let tol = Tolerance::new(1e-12);
    for (i, anchor) in anchors.iter().enumerate() {
        assert!(
            tol.approx_eq_point3(samples[i * segments], *anchor),
            "anchor {i} missed"
        );
    }
}

#[test]
fn catmull_rom_boundary_segments_duplicate_end_anchors() {
    let anchors = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 1.0, 0.0),
    ];
    let spline = CatmullRomSpline::new(anchors.clone()).unwrap();

    let first = spline.segment(0);
    assert_eq!(first.p0, anchors[0]);
    let last = spline.segment(1);
    assert_eq!(last.p3, anchors[2]);
}

#[test]
fn catmull_rom_rejects_zero_segments() {
    let spline =
        CatmullRomSpline::new(vec![Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)]).unwrap();
    assert!(matches!(
        spline.sample(0),
        Err(SplineError::InvalidSegmentCount)
    ));
    assert!(matches!(
        spline.sample_rails(0, 1.0),
        Err(SplineError::InvalidSegmentCount)
    ));
}

#[test]
fn catmull_rom_rails_have_requested_width() {
    let anchors = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 4.0),
        Point3::new(0.0, 0.0, 8.0),
    ];
    let spline = CatmullRomSpline::new(anchors).unwrap();

    let (left, right) = spline.sample_rails(5, 1.5).unwrap();
    assert_eq!(left.len(), 11);
    assert_eq!(right.len(), 11);

    let tol = Tolerance::default_geom();
    for (l, r) in left.iter().zip(&right) {
        assert!(tol.approx_eq_f64(l.distance_to(*r), 1.5));
        // A straight +Z spline offsets purely along X.
        assert!(tol.approx_eq_f64(l.y, 0.0));
        assert!(tol.approx_eq_f64(r.y, 0.0));
        assert!(r.x > l.x);
    }
}

#[test]
fn sampling_is_idempotent() {
    let path = BezierPath::new(two_segment_points()).unwrap();
    assert_eq!(path.sample(16).unwrap(), path.sample(16).unwrap());

    let spline = CatmullRomSpline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ])
    .unwrap();
    assert_eq!(spline.sample(16).unwrap(), spline.sample(16).unwrap());
}
