use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

/// One drawing instruction of a sub-path, starting at the previous end point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    Line { to: Vec2 },
    Quad { ctrl: Vec2, to: Vec2 },
    Cubic { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

impl Segment {
    #[inline]
    fn end(&self) -> Vec2 {
        match *self {
            Segment::Line { to } | Segment::Quad { to, .. } | Segment::Cubic { to, .. } => to,
        }
    }
}

/// A single contour: a start point followed by line/curve segments.
///
/// Sub-paths are treated as closed when they are turned into shapes, whether
/// or not the source closed them explicitly (fill semantics).
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub start: Vec2,
    pub segments: Vec<Segment>,
}

impl SubPath {
    #[inline]
    pub fn new(start: Vec2) -> Self {
        Self { start, segments: Vec::new() }
    }

    /// Builds a closed polygon from its corner points.
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut sub = Self::new(points.first().copied().unwrap_or(Vec2::ZERO));
        for &p in points.iter().skip(1) {
            sub.segments.push(Segment::Line { to: p });
        }
        sub
    }

    pub fn line_to(mut self, to: Vec2) -> Self {
        self.segments.push(Segment::Line { to });
        self
    }

    pub fn quad_to(mut self, ctrl: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::Quad { ctrl, to });
        self
    }

    pub fn cubic_to(mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::Cubic { ctrl1, ctrl2, to });
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flattens the contour into a point ring.
    ///
    /// Every curve is split into `curve_segments` straight pieces. Consecutive
    /// duplicates and the closing point (when it repeats the start) are dropped,
    /// so the ring is implicitly closed.
    pub fn flatten(&self, curve_segments: u32) -> Vec<Vec2> {
        let divisions = curve_segments.max(1);
        let mut out = Vec::with_capacity(1 + self.segments.len() * divisions as usize);
        out.push(self.start);

        let mut from = self.start;
        for seg in &self.segments {
            match *seg {
                Segment::Line { to } => push_point(&mut out, to),
                Segment::Quad { ctrl, to } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push_point(&mut out, quad_point(from, ctrl, to, t));
                    }
                }
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push_point(&mut out, cubic_point(from, ctrl1, ctrl2, to, t));
                    }
                }
            }
            from = seg.end();
        }

        while out.len() > 1 && out.last().is_some_and(|p| p.abs_diff_eq(out[0], POINT_EPS)) {
            out.pop();
        }
        out
    }
}

const POINT_EPS: f32 = 1e-6;

fn push_point(out: &mut Vec<Vec2>, p: Vec2) {
    if out.last().is_some_and(|last| last.abs_diff_eq(p, POINT_EPS)) {
        return;
    }
    out.push(p);
}

fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

/// Fill color carried over from the vector source (straight sRGB).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SourceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub opacity: f32,
}

impl SourceColor {
    pub const WHITE: SourceColor = SourceColor { r: 255, g: 255, b: 255, opacity: 1.0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, opacity: f32) -> Self {
        Self { r, g, b, opacity }
    }
}

impl Default for SourceColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How overlapping sub-paths decide what is inside.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FillRule {
    /// Inside where the winding number is not zero. SVG's default.
    #[default]
    NonZero,
    /// Inside where a ray crosses an odd number of contours.
    EvenOdd,
}

impl FillRule {
    /// Whether a region with winding number `winding` is filled.
    #[inline]
    pub fn is_filled(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// A filled path from the source: one or more sub-paths sharing a color.
///
/// Holes live in the same `ShapePath` as the contour that encloses them.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePath {
    pub subpaths: Vec<SubPath>,
    pub color: SourceColor,
    pub fill_rule: FillRule,
}

impl ShapePath {
    #[inline]
    pub fn new(color: SourceColor) -> Self {
        Self { subpaths: Vec::new(), color, fill_rule: FillRule::default() }
    }

    pub fn with_subpath(mut self, sub: SubPath) -> Self {
        self.subpaths.push(sub);
        self
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

/// Identity of a parsed [`PathSet`], used as a cache key.
///
/// Clones share the id; the contents are immutable so they are equal too.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PathSetId(u64);

static NEXT_PATH_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered, immutable collection of filled paths parsed from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSet {
    id: PathSetId,
    paths: Vec<ShapePath>,
}

impl PathSet {
    pub fn new(paths: Vec<ShapePath>) -> Self {
        let id = PathSetId(NEXT_PATH_SET_ID.fetch_add(1, Ordering::Relaxed));
        Self { id, paths }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[inline]
    pub fn id(&self) -> PathSetId {
        self.id
    }

    #[inline]
    pub fn paths(&self) -> &[ShapePath] {
        &self.paths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── flatten ───────────────────────────────────────────────────────────

    #[test]
    fn polygon_flatten_drops_closing_duplicate() {
        let sub = SubPath::polygon(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
        ]);
        assert_eq!(sub.flatten(12).len(), 3);
    }

    #[test]
    fn quad_flatten_uses_curve_segments() {
        let sub = SubPath::new(Vec2::ZERO).quad_to(Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        let pts = sub.flatten(8);
        // start + 8 subdivisions
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[8], Vec2::new(2.0, 0.0));
        // apex of the symmetric parabola
        assert!((pts[4].y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cubic_flatten_hits_endpoints() {
        let sub = SubPath::new(Vec2::ZERO).cubic_to(
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        );
        let pts = sub.flatten(4);
        assert_eq!(pts.first().copied(), Some(Vec2::ZERO));
        assert_eq!(pts.last().copied(), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn zero_curve_segments_is_clamped() {
        let sub = SubPath::new(Vec2::ZERO).quad_to(Vec2::ONE, Vec2::new(2.0, 0.0));
        assert_eq!(sub.flatten(0).len(), 2);
    }

    #[test]
    fn fill_rules_disagree_on_even_windings() {
        assert!(FillRule::NonZero.is_filled(2));
        assert!(!FillRule::EvenOdd.is_filled(2));
        assert!(FillRule::EvenOdd.is_filled(-1));
        assert!(!FillRule::NonZero.is_filled(0));
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn path_sets_get_distinct_ids() {
        let a = PathSet::empty();
        let b = PathSet::empty();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }
}
