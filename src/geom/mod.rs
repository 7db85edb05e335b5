mod core;
mod curve;
mod mesh;
mod ribbon;
mod spline;

pub use self::core::{Point3, Tolerance, Transform, Vec3};
pub use curve::{
    CatmullRom3, CubicBezier3, Curve3, CurveSample, QuadraticBezier3, sample_curve_at,
    tessellate_curve_uniform,
};
pub use mesh::{GeomMesh, MeshError, compute_smooth_normals};
pub use ribbon::{
    RibbonDiagnostics, RibbonError, build_ribbon, build_ribbons, triangulate_rail_grid,
};
pub use spline::{BezierPath, CatmullRomSpline, SplineError, circle_xz_point};

#[cfg(test)]
mod tests;
