use super::core::{Point3, Tolerance, Vec3};

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn derivative_at(&self, t: f64) -> Vec3 {
        let (a, b) = self.domain();
        let span = b - a;
        if !span.is_finite() || span == 0.0 {
            return Vec3::ZERO;
        }

        let h = Tolerance::DERIVATIVE.relative_to(span);
        if !h.is_finite() || h == 0.0 {
            return Vec3::ZERO;
        }

        let t0 = (t - h).max(a);
        let t1 = (t + h).min(b);
        if t1 == t0 {
            return Vec3::ZERO;
        }

        let p0 = self.point_at(t0);
        let p1 = self.point_at(t1);
        p1.sub_point(p0).mul_scalar(1.0 / (t1 - t0))
    }

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bezier segments
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl QuadraticBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }
}

impl Curve3 for QuadraticBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        point_weighted_sum(self.p0, u * u, self.p1, 2.0 * u * t, self.p2, t * t)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = self.p1.sub_point(self.p0);
        let b = self.p2.sub_point(self.p1);
        a.mul_scalar(2.0 * u).add(b.mul_scalar(2.0 * t))
    }
}

/// A cubic Bezier segment: two anchors `p0`/`p3` with interior control
/// points `p1`/`p2` that the curve does not generally pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }
}

impl Curve3 for CubicBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let u2 = u * u;
        let t2 = t * t;
        point_weighted_sum4(
            self.p0,
            u2 * u,
            self.p1,
            3.0 * u2 * t,
            self.p2,
            3.0 * u * t2,
            self.p3,
            t2 * t,
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = self.p1.sub_point(self.p0);
        let b = self.p2.sub_point(self.p1);
        let c = self.p3.sub_point(self.p2);
        a.mul_scalar(3.0 * u * u)
            .add(b.mul_scalar(6.0 * u * t))
            .add(c.mul_scalar(3.0 * t * t))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catmull-Rom segment
// ─────────────────────────────────────────────────────────────────────────────

/// One uniform Catmull-Rom span. The curve interpolates `p1` at t = 0 and
/// `p2` at t = 1; `p0` and `p3` act only as tangent guides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatmullRom3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CatmullRom3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }
}

impl Curve3 for CatmullRom3 {
    fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let t2 = t * t;
        let t3 = t2 * t;

        // Uniform Catmull-Rom basis:
        // 0.5 * [2*p1 + (-p0 + p2)t + (2p0 - 5p1 + 4p2 - p3)t^2
        //        + (-p0 + 3p1 - 3p2 + p3)t^3]
        let b0 = 0.5 * (-t3 + 2.0 * t2 - t);
        let b1 = 0.5 * (3.0 * t3 - 5.0 * t2 + 2.0);
        let b2 = 0.5 * (-3.0 * t3 + 4.0 * t2 + t);
        let b3 = 0.5 * (t3 - t2);

        point_weighted_sum4(self.p0, b0, self.p1, b1, self.p2, b2, self.p3, b3)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let t2 = t * t;

        let b0 = 0.5 * (-3.0 * t2 + 4.0 * t - 1.0);
        let b1 = 0.5 * (9.0 * t2 - 10.0 * t);
        let b2 = 0.5 * (-9.0 * t2 + 8.0 * t + 1.0);
        let b3 = 0.5 * (3.0 * t2 - 2.0 * t);

        Vec3::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
            b0 * self.p0.z + b1 * self.p1.z + b2 * self.p2.z + b3 * self.p3.z,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sampling utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Result of sampling a curve at a parameter.
#[derive(Debug, Clone, Copy)]
pub struct CurveSample {
    /// The point on the curve at the given parameter.
    pub point: Point3,
    /// The tangent vector at the given parameter (unit length if derivable, else zero).
    pub tangent: Vec3,
    /// The parameter value at which the sample was taken.
    pub parameter: f64,
}

/// Samples a curve at a given parameter value.
///
/// # Arguments
/// * `curve` - The curve to sample.
/// * `t` - Parameter value (will be clamped to curve domain).
///
/// # Returns
/// A [`CurveSample`] containing the point, tangent, and parameter.
#[must_use]
pub fn sample_curve_at<C: Curve3>(curve: &C, t: f64) -> CurveSample {
    let (t0, t1) = curve.domain();
    let param = t.clamp(t0, t1);
    let point = curve.point_at(param);
    let tangent = curve.tangent_at(param).unwrap_or(Vec3::ZERO);
    CurveSample {
        point,
        tangent,
        parameter: param,
    }
}

/// Tessellates a curve into `steps + 1` points at uniform parameter spacing,
/// endpoints included.
#[must_use]
pub fn tessellate_curve_uniform(curve: &impl Curve3, steps: usize) -> Vec<Point3> {
    let steps = steps.max(1);
    let (a, b) = curve.domain();
    let span = b - a;
    (0..=steps)
        .map(|k| curve.point_at(a + span * (k as f64 / steps as f64)))
        .collect()
}

fn point_weighted_sum(p0: Point3, w0: f64, p1: Point3, w1: f64, p2: Point3, w2: f64) -> Point3 {
    Point3::new(
        p0.x * w0 + p1.x * w1 + p2.x * w2,
        p0.y * w0 + p1.y * w1 + p2.y * w2,
        p0.z * w0 + p1.z * w1 + p2.z * w2,
    )
}

fn point_weighted_sum4(
    p0: Point3,
    w0: f64,
    p1: Point3,
    w1: f64,
    p2: Point3,
    w2: f64,
    p3: Point3,
    w3: f64,
) -> Point3 {
    Point3::new(
        p0.x * w0 + p1.x * w1 + p2.x * w2 + p3.x * w3,
        p0.y * w0 + p1.y * w1 + p2.y * w2 + p3.y * w3,
        p0.z * w0 + p1.z * w1 + p2.z * w2 + p3.z * w3,
    )
}
