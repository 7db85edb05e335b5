//! Control-point paths and dense spline sampling.
//!
//! This module turns sparse control-point sequences into dense, ordered
//! point/velocity sequences:
//! - [`BezierPath`]: runs of cubic Bezier segments sharing anchors
//!   (`1 + 3n` control points).
//! - [`CatmullRomSpline`]: an interpolating spline over plain anchors
//!   (`>= 2` points) with duplicated boundary neighbors.
//!
//! Both types are stateless over the points they were built from: segments
//! are derived on the fly and samples are recomputed on every call, so a
//! host that edits points and resamples per frame always sees fresh output.

use super::core::{Point3, Vec3};
use super::curve::{CatmullRom3, CubicBezier3, Curve3};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplineError {
    #[error("control point count must be 1 + 3*n for n >= 1 segments, got {0}")]
    InvalidControlPointCount(usize),
    #[error("sample resolution must be at least 1 segment")]
    InvalidSegmentCount,
    #[error("control points must be finite")]
    NonFiniteInput,
}

// ─────────────────────────────────────────────────────────────────────────────
// BezierPath
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered run of cubic Bezier segments sharing anchor points.
///
/// The point layout is `[anchor, control, control, anchor, control, control,
/// anchor, ...]`: the first point is an anchor and every following run of
/// three is `[control, control, anchor]`, so `len == 1 + 3 * segment_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath {
    points: Vec<Point3>,
}

impl BezierPath {
    pub fn new(points: Vec<Point3>) -> Result<Self, SplineError> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(SplineError::InvalidControlPointCount(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SplineError::NonFiniteInput);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Returns segment `i` as a standalone cubic Bezier over points
    /// `[3i, 3i+1, 3i+2, 3i+3]`.
    ///
    /// # Panics
    /// Panics if `i >= segment_count()`.
    #[must_use]
    pub fn segment(&self, i: usize) -> CubicBezier3 {
        let base = 3 * i;
        CubicBezier3::new(
            self.points[base],
            self.points[base + 1],
            self.points[base + 2],
            self.points[base + 3],
        )
    }

    /// Samples the whole path at `segments` steps per Bezier segment.
    ///
    /// Output ordering is an invariant callers may rely on: samples are
    /// emitted in increasing segment index, then increasing `t` within the
    /// segment. Anchors shared by adjacent segments are emitted once, so
    /// the result holds exactly `segment_count() * segments + 1` points,
    /// starting at the first anchor and ending at the last.
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3>, SplineError> {
        self.sample_each(segments, |curve, t| curve.point_at(t))
    }

    /// Samples first derivatives along the path, with `origin` subtracted
    /// from every velocity to yield direction vectors relative to that
    /// origin (a direction-visualization aid, not used for meshing).
    ///
    /// Count and ordering match [`BezierPath::sample`]; at shared anchors
    /// the earlier segment's end derivative wins.
    pub fn sample_velocities(
        &self,
        segments: usize,
        origin: Vec3,
    ) -> Result<Vec<Vec3>, SplineError> {
        self.sample_each(segments, |curve, t| curve.derivative_at(t).sub(origin))
    }

    /// Samples two parallel rails offset from the path on the XZ circle of
    /// `radius` around each control point: the right rail at `angle_deg`,
    /// the left rail at `angle_deg - 180`. The rails share the dedup and
    /// ordering rules of [`BezierPath::sample`] and are ready for ribbon
    /// meshing.
    pub fn sample_rails(
        &self,
        segments: usize,
        radius: f64,
        angle_deg: f64,
    ) -> Result<(Vec<Point3>, Vec<Point3>), SplineError> {
        if !radius.is_finite() || !angle_deg.is_finite() {
            return Err(SplineError::NonFiniteInput);
        }
        if segments == 0 {
            return Err(SplineError::InvalidSegmentCount);
        }

        let left: Vec<Point3> = self
            .points
            .iter()
            .map(|&p| circle_xz_point(p, radius, angle_deg - 180.0))
            .collect();
        let right: Vec<Point3> = self
            .points
            .iter()
            .map(|&p| circle_xz_point(p, radius, angle_deg))
            .collect();

        // Offsetting preserves the 1 + 3n layout, so both rails revalidate.
        let left = Self::new(left)?.sample(segments)?;
        let right = Self::new(right)?.sample(segments)?;
        Ok((left, right))
    }

    fn sample_each<T>(
        &self,
        segments: usize,
        f: impl Fn(&CubicBezier3, f64) -> T,
    ) -> Result<Vec<T>, SplineError> {
        if segments == 0 {
            return Err(SplineError::InvalidSegmentCount);
        }

        let segment_count = self.segment_count();
        let mut out = Vec::with_capacity(segment_count * segments + 1);
        for i in 0..segment_count {
            let curve = self.segment(i);
            // Skip t = 0 after the first segment: that sample is the same
            // anchor the previous segment already emitted at t = 1.
            let first_step = usize::from(i > 0);
            for k in first_step..=segments {
                let t = k as f64 / segments as f64;
                out.push(f(&curve, t));
            }
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CatmullRomSpline
// ─────────────────────────────────────────────────────────────────────────────

/// An interpolating Catmull-Rom spline over a sequence of anchors.
///
/// Every input point is an anchor the curve passes through; neighbor
/// anchors act as tangent guides, with the boundary neighbors duplicated so
/// the spline spans the full point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomSpline {
    points: Vec<Point3>,
}

impl CatmullRomSpline {
    pub fn new(points: Vec<Point3>) -> Result<Self, SplineError> {
        if points.len() < 2 {
            return Err(SplineError::InvalidControlPointCount(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SplineError::NonFiniteInput);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Returns span `i` over anchors `(p[i-1], p[i], p[i+1], p[i+2])`, with
    /// out-of-range neighbor indices clamped to the boundary anchors.
    ///
    /// # Panics
    /// Panics if `i >= segment_count()`.
    #[must_use]
    pub fn segment(&self, i: usize) -> CatmullRom3 {
        assert!(i < self.segment_count());
        let last = self.points.len() - 1;
        let i0 = i.saturating_sub(1);
        let i3 = (i + 2).min(last);
        CatmullRom3::new(self.points[i0], self.points[i], self.points[i + 1], self.points[i3])
    }

    /// Samples the spline at `segments` steps per span, with the same
    /// ordering and shared-anchor dedup rules as [`BezierPath::sample`]:
    /// the result holds exactly `segment_count() * segments + 1` points.
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3>, SplineError> {
        if segments == 0 {
            return Err(SplineError::InvalidSegmentCount);
        }

        let segment_count = self.segment_count();
        let mut out = Vec::with_capacity(segment_count * segments + 1);
        for i in 0..segment_count {
            let curve = self.segment(i);
            let first_step = usize::from(i > 0);
            for k in first_step..=segments {
                let t = k as f64 / segments as f64;
                out.push(curve.point_at(t));
            }
        }
        Ok(out)
    }

    /// Samples a left/right rail pair for a ribbon of the given total
    /// `width` centered on the spline. Each sampled point is offset by
    /// `width / 2` along the XZ-plane perpendicular of the local tangent
    /// (falling back to the X axis where the tangent is vertical or
    /// degenerate).
    pub fn sample_rails(
        &self,
        segments: usize,
        width: f64,
    ) -> Result<(Vec<Point3>, Vec<Point3>), SplineError> {
        if !width.is_finite() {
            return Err(SplineError::NonFiniteInput);
        }
        if segments == 0 {
            return Err(SplineError::InvalidSegmentCount);
        }

        let half = width * 0.5;
        let segment_count = self.segment_count();
        let mut left = Vec::with_capacity(segment_count * segments + 1);
        let mut right = Vec::with_capacity(segment_count * segments + 1);
        for i in 0..segment_count {
            let curve = self.segment(i);
            let first_step = usize::from(i > 0);
            for k in first_step..=segments {
                let t = k as f64 / segments as f64;
                let point = curve.point_at(t);
                let side = rail_offset_direction(curve.derivative_at(t));
                left.push(point.sub_vec(side.mul_scalar(half)));
                right.push(point.add_vec(side.mul_scalar(half)));
            }
        }
        Ok((left, right))
    }
}

/// Unit offset direction for a rail pair: the XZ-plane perpendicular of the
/// tangent (`up x tangent`, so the right rail sits at +X for a +Z heading),
/// or `X` when the tangent has no horizontal component.
fn rail_offset_direction(tangent: Vec3) -> Vec3 {
    Vec3::Y.cross(tangent).normalized().unwrap_or(Vec3::X)
}

/// Point on the XZ circle of `radius` around `center` at `angle_deg`
/// (measured from +Z toward +X, matching a compass heading on the ground
/// plane).
#[must_use]
pub fn circle_xz_point(center: Point3, radius: f64, angle_deg: f64) -> Point3 {
    let angle = angle_deg.to_radians();
    Point3::new(
        center.x + radius * angle.sin(),
        center.y,
        center.z + radius * angle.cos(),
    )
}
