use crate::geom::{
    CatmullRom3, CubicBezier3, Curve3, Point3, QuadraticBezier3, Tolerance, Transform, Vec3,
    sample_curve_at, tessellate_curve_uniform,
};

fn sample_cubic() -> CubicBezier3 {
    CubicBezier3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-2.5, 0.0, 2.5),
        Point3::new(2.5, 0.0, 7.5),
        Point3::new(0.0, 0.0, 10.0),
    )
}

#[test]
fn cubic_bezier_interpolates_endpoints() {
    let curve = sample_cubic();
    assert_eq!(curve.point_at(0.0), curve.p0);
    assert_eq!(curve.point_at(1.0), curve.p3);
}

#[test]
fn cubic_bezier_clamps_parameter() {
    let curve = sample_cubic();
    assert_eq!(curve.point_at(-0.5), curve.p0);
    assert_eq!(curve.point_at(1.5), curve.p3);
    assert_eq!(curve.derivative_at(-1.0), curve.derivative_at(0.0));
    assert_eq!(curve.derivative_at(2.0), curve.derivative_at(1.0));
}

#[test]
fn quadratic_bezier_interpolates_endpoints() {
    let curve = QuadraticBezier3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    );
    assert_eq!(curve.point_at(0.0), curve.p0);
    assert_eq!(curve.point_at(1.0), curve.p2);
    // Symmetric arch: the apex tangent is horizontal.
    assert_eq!(curve.derivative_at(0.5), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn cubic_bezier_derivative_matches_closed_form_at_endpoints() {
    let curve = sample_cubic();
    let tol = Tolerance::new(1e-12);

    let start = curve.p1.sub_point(curve.p0).mul_scalar(3.0);
    let end = curve.p3.sub_point(curve.p2).mul_scalar(3.0);
    assert!(tol.approx_eq_vec3(curve.derivative_at(0.0), start));
    assert!(tol.approx_eq_vec3(curve.derivative_at(1.0), end));
}

#[test]
fn cubic_bezier_derivative_matches_finite_difference() {
    let curve = sample_cubic();
    let tol = Tolerance::LOOSE;

    for k in 1..10 {
        let t = f64::from(k) / 10.0;
        let h = 1e-6;
        let numeric = curve
            .point_at(t + h)
            .sub_point(curve.point_at(t - h))
            .mul_scalar(1.0 / (2.0 * h));
        assert!(
            tol.approx_eq_vec3(curve.derivative_at(t), numeric),
            "derivative mismatch at t = {t}"
        );
    }
}

#[test]
fn cubic_bezier_is_affine_invariant() {
    let curve = sample_cubic();
    let xf = Transform::translate(Vec3::new(3.0, -1.0, 2.0))
        .compose(Transform::rotate_y(0.7))
        .compose(Transform::uniform_scale(1.5));

    let transformed = CubicBezier3::new(
        xf.apply_point(curve.p0),
        xf.apply_point(curve.p1),
        xf.apply_point(curve.p2),
        xf.apply_point(curve.p3),
    );

    let tol = Tolerance::default_geom();
    for k in 0..=8 {
        let t = f64::from(k) / 8.0;
        assert!(tol.approx_eq_point3(transformed.point_at(t), xf.apply_point(curve.point_at(t))));
    }
}

#[test]
fn catmull_rom_passes_through_inner_anchors() {
    let span = CatmullRom3::new(
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 2.0),
        Point3::new(2.0, 0.0, 3.0),
    );
    assert_eq!(span.point_at(0.0), span.p1);
    assert_eq!(span.point_at(1.0), span.p2);
}

#[test]
fn catmull_rom_boundary_tangents() {
    let span = CatmullRom3::new(
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 2.0),
        Point3::new(2.0, 0.0, 3.0),
    );

    let tol = Tolerance::new(1e-12);
    // Uniform Catmull-Rom: B'(0) = (p2 - p0) / 2, B'(1) = (p3 - p1) / 2.
    let start = span.p2.sub_point(span.p0).mul_scalar(0.5);
    let end = span.p3.sub_point(span.p1).mul_scalar(0.5);
    assert!(tol.approx_eq_vec3(span.derivative_at(0.0), start));
    assert!(tol.approx_eq_vec3(span.derivative_at(1.0), end));
}

#[test]
fn tessellate_curve_preserves_endpoints() {
    let curve = sample_cubic();
    let pts = tessellate_curve_uniform(&curve, 10);
    assert_eq!(pts.len(), 11);
    assert_eq!(pts.first().copied(), Some(curve.p0));
    assert_eq!(pts.last().copied(), Some(curve.p3));
}

#[test]
fn sample_curve_at_clamps_and_normalizes() {
    let curve = sample_cubic();
    let sample = sample_curve_at(&curve, 1.75);
    assert_eq!(sample.parameter, 1.0);
    assert_eq!(sample.point, curve.p3);

    let tol = Tolerance::default_geom();
    assert!(tol.approx_eq_f64(sample.tangent.length(), 1.0));
}

#[test]
fn evaluation_is_idempotent() {
    let curve = sample_cubic();
    let first = tessellate_curve_uniform(&curve, 64);
    let second = tessellate_curve_uniform(&curve, 64);
    assert_eq!(first, second);
}
