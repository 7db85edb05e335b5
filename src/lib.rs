#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Parametric curve evaluation and ribbon mesh generation.
//!
//! The crate turns sparse control-point sequences into dense sampled
//! curves (cubic/quadratic Bezier, Catmull-Rom) and triangulated strip
//! meshes that follow them. Every operation is a pure transform from
//! caller-supplied point data to freshly allocated buffers: nothing is
//! cached between calls, so hosts that edit points and rebuild per frame
//! always observe consistent output, and independent curves can be meshed
//! concurrently.
//!
//! ```
//! use curves_engine::geom::{BezierPath, Point3, build_ribbon};
//!
//! let path = BezierPath::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(-2.5, 0.0, 2.5),
//!     Point3::new(2.5, 0.0, 7.5),
//!     Point3::new(0.0, 0.0, 10.0),
//! ])?;
//!
//! let (left, right) = path.sample_rails(16, 1.0, 90.0)?;
//! let (mesh, diagnostics) = build_ribbon(&left, &right, 2)?;
//!
//! assert_eq!(diagnostics.vertex_count, mesh.vertex_count());
//! mesh.validate()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod geom;
