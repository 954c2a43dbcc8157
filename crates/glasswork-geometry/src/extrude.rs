//! Extrusion: sweep a 2D shape along +Z, with optional rounded bevels.
//!
//! Layout of the generated rings along Z (bevel enabled):
//!
//! ```text
//! z = -thickness ... 0        front bevel (bevel_segments rings)
//! z = 0 ... depth             body (steps + 1 rings)
//! z = depth ... depth + thickness   back bevel (bevel_segments rings)
//! ```
//!
//! Ring `k` offsets every contour point along its bevel vector by
//! `size * sin(t * PI/2) + offset`, so with `offset = -size` the caps sit
//! inset by the bevel size and the widest ring matches the source outline.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;
use crate::shape::{Shape, DEFAULT_CURVE_SEGMENTS};
use crate::triangulate::triangulate;

/// Bevel ring count tier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BevelResolution {
    Low,
    #[default]
    High,
}

impl BevelResolution {
    #[inline]
    pub fn from_high_res(high_res: bool) -> Self {
        if high_res { Self::High } else { Self::Low }
    }

    #[inline]
    pub const fn segments(self) -> u32 {
        match self {
            Self::Low => 16,
            Self::High => 80,
        }
    }
}

/// Solid-building parameters. Pure configuration, no derived state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExtrusionParams {
    pub depth: f32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    /// Always `-bevel_size` when built through [`ExtrusionParams::rounded`].
    pub bevel_offset: f32,
    pub bevel_segments: u32,
    pub steps: u32,
    pub curve_segments: u32,
}

impl ExtrusionParams {
    /// Flat prism of the given depth, no bevel.
    pub fn flat(depth: f32) -> Self {
        Self {
            depth,
            bevel_enabled: false,
            bevel_thickness: 0.0,
            bevel_size: 0.0,
            bevel_offset: 0.0,
            bevel_segments: 0,
            steps: 1,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }

    /// Unit-depth, unbeveled prism used only to measure combined bounds.
    #[inline]
    pub fn unit() -> Self {
        Self::flat(1.0)
    }

    /// Rounded extrusion where `roundness` drives bevel thickness and size.
    pub fn rounded(
        depth: f32,
        roundness: f32,
        resolution: BevelResolution,
        steps: u32,
        curve_segments: u32,
    ) -> Self {
        let roundness = roundness.max(0.0);
        Self {
            depth,
            bevel_enabled: true,
            bevel_thickness: roundness,
            bevel_size: roundness,
            bevel_offset: -roundness,
            bevel_segments: resolution.segments(),
            steps: steps.max(1),
            curve_segments: curve_segments.max(1),
        }
    }
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self::rounded(100.0, 7.0, BevelResolution::High, 1, DEFAULT_CURVE_SEGMENTS)
    }
}

/// Extrudes every shape into one merged mesh.
pub fn extrude_shapes<'a, I>(shapes: I, params: &ExtrusionParams) -> Mesh
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut mesh = Mesh::new();
    for shape in shapes {
        mesh.merge(&extrude_shape(shape, params));
    }
    mesh
}

/// Extrudes a single shape.
///
/// Caps that cannot be triangulated are skipped with a warning; the side
/// walls are still produced so the solid keeps its footprint.
pub fn extrude_shape(shape: &Shape, params: &ExtrusionParams) -> Mesh {
    let points = shape.extract_points(params.curve_segments);
    if points.outer.len() < 3 {
        return Mesh::new();
    }

    // Ring ranges into the flattened vertex list: outer first, then holes.
    let mut flat: Vec<Vec2> = Vec::with_capacity(points.len());
    let mut rings: Vec<(usize, usize)> = Vec::with_capacity(1 + points.holes.len());
    let mut moves: Vec<Vec2> = Vec::with_capacity(points.len());
    for ring in std::iter::once(&points.outer).chain(points.holes.iter()) {
        rings.push((flat.len(), ring.len()));
        flat.extend_from_slice(ring);
        moves.extend(bevel_vectors(ring));
    }

    let layers = layer_profile(params);
    let ring_len = flat.len();
    let layer_points = |layer: &Layer| -> Vec<Vec3> {
        flat.iter()
            .zip(&moves)
            .map(|(p, m)| (*p + *m * layer.inset).extend(layer.z))
            .collect()
    };

    let cap = match triangulate(&points) {
        Ok(indices) => Some(indices),
        Err(err) => {
            log::warn!("skipping caps: {err}");
            None
        }
    };

    let side_quads: usize = layers.len().saturating_sub(1) * ring_len;
    let cap_verts = cap.as_ref().map_or(0, |_| ring_len * 2);
    let cap_indices = cap.as_ref().map_or(0, |c| c.len() * 2);
    let mut mesh = Mesh::with_capacity(side_quads * 4 + cap_verts, side_quads * 6 + cap_indices);

    let (Some(first), Some(last)) = (layers.first(), layers.last()) else {
        return mesh;
    };

    if let Some(indices) = &cap {
        add_cap(&mut mesh, &layer_points(first), indices, -Vec3::Z);
        add_cap(&mut mesh, &layer_points(last), indices, Vec3::Z);
    }

    let mut lower = layer_points(first);
    for layer in &layers[1..] {
        let upper = layer_points(layer);
        for &(start, len) in &rings {
            add_side_walls(&mut mesh, &lower[start..start + len], &upper[start..start + len]);
        }
        lower = upper;
    }

    mesh
}

#[derive(Debug, Copy, Clone)]
struct Layer {
    z: f32,
    inset: f32,
}

fn layer_profile(params: &ExtrusionParams) -> Vec<Layer> {
    let steps = params.steps.max(1);
    let depth = params.depth.max(0.0);
    let mut layers = Vec::new();

    if !params.bevel_enabled || params.bevel_segments == 0 {
        for s in 0..=steps {
            layers.push(Layer { z: depth * s as f32 / steps as f32, inset: 0.0 });
        }
        return layers;
    }

    let segs = params.bevel_segments;
    let bevel_ring = |b: u32| -> (f32, f32) {
        let t = b as f32 / segs as f32;
        let z = params.bevel_thickness * (t * FRAC_PI_2).cos();
        let inset = params.bevel_size * (t * FRAC_PI_2).sin() + params.bevel_offset;
        (z, inset)
    };

    for b in 0..segs {
        let (z, inset) = bevel_ring(b);
        layers.push(Layer { z: -z, inset });
    }
    let body_inset = params.bevel_size + params.bevel_offset;
    for s in 0..=steps {
        layers.push(Layer { z: depth * s as f32 / steps as f32, inset: body_inset });
    }
    for b in (0..segs).rev() {
        let (z, inset) = bevel_ring(b);
        layers.push(Layer { z: depth + z, inset });
    }
    layers
}

/// Outward miter direction at every ring vertex.
///
/// For canonical winding (outer CCW, holes CW) the edge normal `(dy, -dx)`
/// points away from the solid on both. Length is `1 / cos(half angle)`,
/// capped so sharp spikes do not explode.
fn bevel_vectors(ring: &[Vec2]) -> Vec<Vec2> {
    const MIN_COS: f32 = 0.25;

    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let pt = ring[i];
            let next = ring[(i + 1) % n];

            let n_in = edge_normal(pt - prev);
            let n_out = edge_normal(next - pt);
            let sum = n_in + n_out;
            if sum.length_squared() < 1e-12 {
                return n_in;
            }
            let dir = sum.normalize();
            let cos = dir.dot(if n_in == Vec2::ZERO { n_out } else { n_in }).max(MIN_COS);
            dir / cos
        })
        .collect()
}

#[inline]
fn edge_normal(edge: Vec2) -> Vec2 {
    Vec2::new(edge.y, -edge.x).normalize_or_zero()
}

fn add_cap(mesh: &mut Mesh, ring: &[Vec3], indices: &[u32], normal: Vec3) {
    let base = mesh.vertex_count() as u32;
    for p in ring {
        mesh.add_vertex(*p, normal);
    }
    let flip = normal.z < 0.0;
    for tri in indices.chunks_exact(3) {
        if flip {
            mesh.add_triangle(base + tri[0], base + tri[2], base + tri[1]);
        } else {
            mesh.add_triangle(base + tri[0], base + tri[1], base + tri[2]);
        }
    }
}

fn add_side_walls(mesh: &mut Mesh, lower: &[Vec3], upper: &[Vec3]) {
    let n = lower.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let (a, b, c, d) = (lower[i], lower[j], upper[j], upper[i]);

        // Use the longer diagonal pair so quads that collapse on one side
        // (bevel rings meeting at a point) still get a normal.
        let normal = match (b - a).cross(d - a).try_normalize() {
            Some(nrm) => nrm,
            None => match (c - b).cross(a - b).try_normalize() {
                Some(nrm) => nrm,
                None => continue,
            },
        };

        let i0 = mesh.add_vertex(a, normal);
        let i1 = mesh.add_vertex(b, normal);
        let i2 = mesh.add_vertex(c, normal);
        let i3 = mesh.add_vertex(d, normal);
        mesh.add_triangle(i0, i1, i2);
        mesh.add_triangle(i0, i2, i3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SubPath;
    use approx::assert_relative_eq;

    fn square(side: f32) -> Shape {
        Shape::new(SubPath::polygon(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ]))
    }

    // ── flat prism ────────────────────────────────────────────────────────

    #[test]
    fn unit_prism_bounds() {
        let mesh = extrude_shape(&square(10.0), &ExtrusionParams::unit());
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Vec3::new(10.0, 10.0, 1.0));
    }

    #[test]
    fn unit_prism_counts() {
        let mesh = extrude_shape(&square(1.0), &ExtrusionParams::unit());
        // two caps of 2 triangles + 4 side quads
        assert_eq!(mesh.triangle_count(), 4 + 8);
        assert_eq!(mesh.vertex_count(), 8 + 16);
    }

    #[test]
    fn side_normals_point_outward() {
        let mesh = extrude_shape(&square(2.0), &ExtrusionParams::unit());
        let center = Vec3::new(1.0, 1.0, 0.5);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            if n.z.abs() > 0.5 {
                continue;
            }
            assert!((*p - center).dot(*n) > 0.0, "inward normal at {p:?}");
        }
    }

    #[test]
    fn steps_add_rings() {
        let mut params = ExtrusionParams::flat(4.0);
        params.steps = 4;
        let mesh = extrude_shape(&square(1.0), &params);
        assert_eq!(mesh.triangle_count(), 4 + 4 * 4 * 2);
    }

    // ── bevel ─────────────────────────────────────────────────────────────

    #[test]
    fn rounded_offset_is_negated_size() {
        let p = ExtrusionParams::rounded(10.0, 3.0, BevelResolution::Low, 1, 12);
        assert_eq!(p.bevel_offset, -p.bevel_size);
        assert_eq!(p.bevel_segments, 16);
    }

    #[test]
    fn bevel_extends_depth_by_thickness_and_keeps_footprint() {
        let params = ExtrusionParams::rounded(10.0, 1.0, BevelResolution::Low, 1, 12);
        let mesh = extrude_shape(&square(10.0), &params);
        let bb = mesh.bounding_box().unwrap();
        assert_relative_eq!(bb.min.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(bb.max.z, 11.0, epsilon = 1e-5);
        // offset = -size: the widest ring never leaves the source outline
        assert!(bb.min.x >= -1e-4 && bb.max.x <= 10.0 + 1e-4);
    }

    #[test]
    fn caps_are_inset_by_bevel_size() {
        let params = ExtrusionParams::rounded(10.0, 1.0, BevelResolution::Low, 1, 12);
        let mesh = extrude_shape(&square(10.0), &params);
        let front: Vec<&Vec3> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .filter(|(_, n)| **n == -Vec3::Z)
            .map(|(p, _)| p)
            .collect();
        assert!(!front.is_empty());
        for p in front {
            assert_relative_eq!(p.z, -1.0, epsilon = 1e-5);
            assert!(p.x >= 1.0 - 1e-4 && p.x <= 9.0 + 1e-4);
        }
    }

    #[test]
    fn hole_gets_walls() {
        let shape = square(10.0).with_hole(SubPath::polygon(&[
            Vec2::new(4.0, 4.0),
            Vec2::new(6.0, 4.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(4.0, 6.0),
        ]));
        let mesh = extrude_shape(&shape, &ExtrusionParams::unit());
        // 8 cap triangles per side + 8 wall quads
        assert_eq!(mesh.triangle_count(), 16 + 16);
    }

    #[test]
    fn miter_vector_of_square_corner() {
        let ring = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        let v = bevel_vectors(&ring);
        assert_relative_eq!(v[0].x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(v[0].y, -1.0, epsilon = 1e-5);
    }
}
