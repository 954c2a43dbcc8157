//! Glasswork geometry crate.
//!
//! Turns vector path data into extrudable shapes and solid meshes:
//!
//! ```text
//! SVG ──svg::parse_svg──▶ PathSet ──normalize──▶ NormalizationResult
//!                                                  │
//!                          ExtrusionParams ──extrude_shape──▶ Mesh
//! ```
//!
//! Coordinates are world units with +Y up. SVG input (+Y down) is flipped at
//! import so every later stage works in a single convention.

pub mod bounds;
pub mod error;
pub mod extrude;
pub mod mesh;
pub mod normalize;
pub mod path;
pub mod shape;
pub mod svg;

mod triangulate;

pub use bounds::Aabb;
pub use error::{GeometryError, Result};
pub use extrude::{extrude_shape, extrude_shapes, BevelResolution, ExtrusionParams};
pub use mesh::Mesh;
pub use normalize::{normalize, NormalizationResult, NormalizeCache, ShapeData, DEFAULT_TARGET_SIZE};
pub use path::{FillRule, PathSet, PathSetId, Segment, ShapePath, SourceColor, SubPath};
pub use shape::{Shape, ShapePoints, DEFAULT_CURVE_SEGMENTS};
pub use svg::{load_svg, parse_svg};
