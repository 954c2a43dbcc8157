use glam::Vec2;

use crate::path::{ShapePath, SubPath};

/// Curve subdivisions used when none is supplied.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// A closed 2D region: one outer contour plus zero or more holes.
///
/// The contours keep their source curves; points are only produced on demand
/// by [`Shape::extract_points`] so the curve resolution stays a build-time
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outer: SubPath,
    pub holes: Vec<SubPath>,
}

/// Flattened contours of a [`Shape`] with canonical winding.
///
/// Invariant: `outer` is counter-clockwise, every hole is clockwise (Y up).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePoints {
    pub outer: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

impl ShapePoints {
    /// Total point count across all contours.
    pub fn len(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }
}

impl Shape {
    #[inline]
    pub fn new(outer: SubPath) -> Self {
        Self { outer, holes: Vec::new() }
    }

    pub fn with_hole(mut self, hole: SubPath) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn extract_points(&self, curve_segments: u32) -> ShapePoints {
        let mut outer = self.outer.flatten(curve_segments);
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let holes = self
            .holes
            .iter()
            .map(|h| {
                let mut ring = h.flatten(curve_segments);
                if signed_area(&ring) > 0.0 {
                    ring.reverse();
                }
                ring
            })
            .filter(|ring| ring.len() >= 3)
            .collect();

        ShapePoints { outer, holes }
    }
}

/// What a contour contributes once the fill rule is applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum RingRole {
    /// Unfilled outside, filled inside.
    Solid,
    /// Filled outside, unfilled inside.
    Hole,
    /// Fill is the same on both sides; the contour adds no boundary.
    Interior,
}

impl ShapePath {
    /// Splits the path into shapes, attaching holes to their enclosing contour.
    ///
    /// Each contour is classified by comparing the winding number just outside
    /// it (the sum over enclosing contours) with the one just inside, under
    /// the path's [`FillRule`](crate::path::FillRule). For even-odd this is
    /// nesting parity; for non-zero a nested contour is a hole only when it
    /// winds against its surroundings. A hole belongs to the smallest solid
    /// around it. Contours with fewer than three points or no area are skipped.
    pub fn to_shapes(&self) -> Vec<Shape> {
        let rings: Vec<(usize, Vec<Vec2>, f32)> = self
            .subpaths
            .iter()
            .enumerate()
            .filter_map(|(i, sub)| {
                let ring = sub.flatten(DEFAULT_CURVE_SEGMENTS);
                let area = signed_area(&ring);
                if ring.len() < 3 || area.abs() <= f32::EPSILON {
                    log::debug!("skipping degenerate sub-path {i} ({} points)", ring.len());
                    return None;
                }
                Some((i, ring, area))
            })
            .collect();

        // For each ring, the rings that strictly enclose it.
        let parents: Vec<Vec<usize>> = rings
            .iter()
            .enumerate()
            .map(|(a, (_, ring, area))| {
                rings
                    .iter()
                    .enumerate()
                    .filter(|&(b, (_, other, other_area))| {
                        b != a && other_area.abs() > area.abs() && point_in_polygon(ring[0], other)
                    })
                    .map(|(b, _)| b)
                    .collect()
            })
            .collect();

        let direction = |r: usize| if rings[r].2 > 0.0 { 1 } else { -1 };
        let roles: Vec<RingRole> = (0..rings.len())
            .map(|r| {
                let outside: i32 = parents[r].iter().map(|&p| direction(p)).sum();
                let inside = outside + direction(r);
                match (self.fill_rule.is_filled(outside), self.fill_rule.is_filled(inside)) {
                    (false, true) => RingRole::Solid,
                    (true, false) => RingRole::Hole,
                    _ => RingRole::Interior,
                }
            })
            .collect();

        let mut shapes: Vec<Shape> = Vec::new();
        let mut slot_of_ring: Vec<Option<usize>> = vec![None; rings.len()];

        for (r, (sub_index, _, _)) in rings.iter().enumerate() {
            if roles[r] == RingRole::Solid {
                slot_of_ring[r] = Some(shapes.len());
                shapes.push(Shape::new(self.subpaths[*sub_index].clone()));
            }
        }

        for (r, (sub_index, _, _)) in rings.iter().enumerate() {
            match roles[r] {
                RingRole::Solid => continue,
                RingRole::Interior => {
                    log::debug!("sub-path {sub_index} lies inside filled area; ignored");
                    continue;
                }
                RingRole::Hole => {}
            }
            let owner = parents[r]
                .iter()
                .copied()
                .filter(|&p| roles[p] == RingRole::Solid)
                .min_by(|&a, &b| rings[a].2.abs().total_cmp(&rings[b].2.abs()))
                .and_then(|p| slot_of_ring[p]);

            match owner {
                Some(slot) => shapes[slot].holes.push(self.subpaths[*sub_index].clone()),
                None => log::debug!("hole sub-path {sub_index} has no enclosing solid; dropped"),
            }
        }

        shapes
    }
}

/// Shoelace area; positive for counter-clockwise rings (Y up).
pub(crate) fn signed_area(ring: &[Vec2]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Even-odd ray cast.
pub(crate) fn point_in_polygon(p: Vec2, ring: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{FillRule, SourceColor};

    fn square(cx: f32, cy: f32, half: f32) -> SubPath {
        SubPath::polygon(&[
            Vec2::new(cx - half, cy - half),
            Vec2::new(cx + half, cy - half),
            Vec2::new(cx + half, cy + half),
            Vec2::new(cx - half, cy + half),
        ])
    }

    fn square_cw(cx: f32, cy: f32, half: f32) -> SubPath {
        SubPath::polygon(&[
            Vec2::new(cx - half, cy - half),
            Vec2::new(cx - half, cy + half),
            Vec2::new(cx + half, cy + half),
            Vec2::new(cx + half, cy - half),
        ])
    }

    // ── winding ───────────────────────────────────────────────────────────

    #[test]
    fn signed_area_sign_follows_winding() {
        let ccw = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0), Vec2::new(0.0, 2.0)];
        let mut cw = ccw;
        cw.reverse();
        assert_eq!(signed_area(&ccw), 4.0);
        assert_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn extract_points_canonicalizes_winding() {
        let mut outer_pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        outer_pts.reverse();
        let shape = Shape::new(SubPath::polygon(&outer_pts)).with_hole(square(5.0, 5.0, 2.0));

        let pts = shape.extract_points(DEFAULT_CURVE_SEGMENTS);
        assert!(signed_area(&pts.outer) > 0.0);
        assert!(signed_area(&pts.holes[0]) < 0.0);
        assert_eq!(pts.len(), 8);
    }

    // ── to_shapes ─────────────────────────────────────────────────────────

    #[test]
    fn nested_contour_becomes_hole_under_even_odd() {
        let path = ShapePath::new(SourceColor::WHITE)
            .with_fill_rule(FillRule::EvenOdd)
            .with_subpath(square(0.0, 0.0, 5.0))
            .with_subpath(square(0.0, 0.0, 2.0));

        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
    }

    #[test]
    fn same_winding_nested_contour_is_filled_under_non_zero() {
        let path = ShapePath::new(SourceColor::WHITE)
            .with_subpath(square(0.0, 0.0, 5.0))
            .with_subpath(square(0.0, 0.0, 2.0));

        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].holes.is_empty());
    }

    #[test]
    fn opposite_winding_nested_contour_is_hole_under_non_zero() {
        let path = ShapePath::new(SourceColor::WHITE)
            .with_subpath(square(0.0, 0.0, 5.0))
            .with_subpath(square_cw(0.0, 0.0, 2.0));

        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
    }

    #[test]
    fn non_zero_tracks_accumulated_winding() {
        // Two same-direction squares, then a reversed square inside both:
        // winding goes 1, 2, 1, so nothing is cut out.
        let path = ShapePath::new(SourceColor::WHITE)
            .with_subpath(square(0.0, 0.0, 10.0))
            .with_subpath(square(0.0, 0.0, 6.0))
            .with_subpath(square_cw(0.0, 0.0, 2.0));
        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].holes.is_empty());

        // Reversing both inner squares gives 1, 0, -1: a hole with an island.
        let path = ShapePath::new(SourceColor::WHITE)
            .with_subpath(square(0.0, 0.0, 10.0))
            .with_subpath(square_cw(0.0, 0.0, 6.0))
            .with_subpath(square_cw(0.0, 0.0, 2.0));
        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].holes.len(), 1);
        assert!(shapes[1].holes.is_empty());
    }

    #[test]
    fn disjoint_contours_become_separate_shapes() {
        let path = ShapePath::new(SourceColor::WHITE)
            .with_subpath(square(0.0, 0.0, 1.0))
            .with_subpath(square(10.0, 0.0, 1.0));

        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.holes.is_empty()));
    }

    #[test]
    fn island_inside_hole_is_solid_again() {
        let path = ShapePath::new(SourceColor::WHITE)
            .with_fill_rule(FillRule::EvenOdd)
            .with_subpath(square(0.0, 0.0, 10.0))
            .with_subpath(square(0.0, 0.0, 6.0))
            .with_subpath(square(0.0, 0.0, 2.0));

        let shapes = path.to_shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].holes.len(), 1);
        assert!(shapes[1].holes.is_empty());
    }

    #[test]
    fn degenerate_subpath_is_skipped() {
        let line = SubPath::polygon(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
        let path = ShapePath::new(SourceColor::WHITE).with_subpath(line);
        assert!(path.to_shapes().is_empty());
    }

    // ── point_in_polygon ──────────────────────────────────────────────────

    #[test]
    fn point_in_polygon_inside_and_outside() {
        let ring = square(0.0, 0.0, 1.0).flatten(1);
        assert!(point_in_polygon(Vec2::ZERO, &ring));
        assert!(!point_in_polygon(Vec2::new(3.0, 0.0), &ring));
    }
}
