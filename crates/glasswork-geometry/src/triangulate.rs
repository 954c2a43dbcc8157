//! Cap triangulation via earcutr.

use glam::Vec2;

use crate::error::{GeometryError, Result};
use crate::shape::ShapePoints;

/// Triangulates a shape with holes.
///
/// Returned indices address the concatenation `outer ++ holes[0] ++ ...`.
/// Every triangle is counter-clockwise (Y up), whatever order earcut emits.
pub(crate) fn triangulate(points: &ShapePoints) -> Result<Vec<u32>> {
    if points.outer.len() < 3 {
        return Err(GeometryError::Triangulation(format!(
            "outer contour has {} points",
            points.outer.len()
        )));
    }

    let mut coords: Vec<f64> = Vec::with_capacity(points.len() * 2);
    let mut flat: Vec<Vec2> = Vec::with_capacity(points.len());
    let mut hole_starts: Vec<usize> = Vec::with_capacity(points.holes.len());

    for p in &points.outer {
        coords.extend_from_slice(&[p.x as f64, p.y as f64]);
        flat.push(*p);
    }
    for hole in &points.holes {
        hole_starts.push(flat.len());
        for p in hole {
            coords.extend_from_slice(&[p.x as f64, p.y as f64]);
            flat.push(*p);
        }
    }

    let raw = earcutr::earcut(&coords, &hole_starts, 2)
        .map_err(|e| GeometryError::Triangulation(format!("{e:?}")))?;

    let mut out = Vec::with_capacity(raw.len());
    for tri in raw.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let cross = (flat[b] - flat[a]).perp_dot(flat[c] - flat[a]);
        if cross >= 0.0 {
            out.extend_from_slice(&[a as u32, b as u32, c as u32]);
        } else {
            out.extend_from_slice(&[a as u32, c as u32, b as u32]);
        }
    }
    Ok(out)
}
