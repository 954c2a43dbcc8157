//! SVG import.
//!
//! `usvg` resolves styles, transforms and shape primitives into plain paths;
//! this module walks the tree and keeps every filled path as a [`ShapePath`].
//! Stroke-only paths enclose no region and are skipped.

use std::path::Path;

use glam::Vec2;
use usvg::tiny_skia_path::PathSegment;

use crate::error::{GeometryError, Result};
use crate::path::{FillRule, PathSet, ShapePath, SourceColor, SubPath};

/// Parses SVG bytes into a [`PathSet`] (Y flipped to point up).
pub fn parse_svg(data: &[u8]) -> Result<PathSet> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;

    let mut paths = Vec::new();
    collect_group(tree.root(), &mut paths);

    log::debug!("parsed SVG: {} filled paths", paths.len());
    Ok(PathSet::new(paths))
}

/// Reads and parses an SVG file.
pub fn load_svg(path: &Path) -> Result<PathSet> {
    let data = std::fs::read(path).map_err(|source| GeometryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_svg(&data)
}

fn collect_group(group: &usvg::Group, out: &mut Vec<ShapePath>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g, out),
            usvg::Node::Path(p) => {
                if let Some(shape_path) = convert_path(p) {
                    out.push(shape_path);
                }
            }
            _ => {}
        }
    }
}

fn convert_path(path: &usvg::Path) -> Option<ShapePath> {
    let fill = path.fill()?;
    let color = match fill.paint() {
        usvg::Paint::Color(c) => SourceColor::new(c.red, c.green, c.blue, fill.opacity().get()),
        _ => {
            log::debug!("non-solid SVG fill on path '{}'; using white", path.id());
            SourceColor::WHITE
        }
    };

    let data = path.data().clone().transform(path.abs_transform())?;

    let fill_rule = match fill.rule() {
        usvg::FillRule::NonZero => FillRule::NonZero,
        usvg::FillRule::EvenOdd => FillRule::EvenOdd,
    };
    let mut shape_path = ShapePath::new(color).with_fill_rule(fill_rule);
    let mut current: Option<SubPath> = None;
    let flip = |p: usvg::tiny_skia_path::Point| Vec2::new(p.x, -p.y);

    for seg in data.segments() {
        match seg {
            PathSegment::MoveTo(p) => {
                if let Some(sub) = current.take().filter(|s| !s.is_empty()) {
                    shape_path.subpaths.push(sub);
                }
                current = Some(SubPath::new(flip(p)));
            }
            PathSegment::LineTo(p) => {
                current = current.map(|s| s.line_to(flip(p)));
            }
            PathSegment::QuadTo(c, p) => {
                current = current.map(|s| s.quad_to(flip(c), flip(p)));
            }
            PathSegment::CubicTo(c1, c2, p) => {
                current = current.map(|s| s.cubic_to(flip(c1), flip(c2), flip(p)));
            }
            PathSegment::Close => {
                if let Some(sub) = current.take().filter(|s| !s.is_empty()) {
                    let start = sub.start;
                    shape_path.subpaths.push(sub);
                    // Drawing may continue from the closed sub-path's start.
                    current = Some(SubPath::new(start));
                }
            }
        }
    }
    if let Some(sub) = current.filter(|s| !s.is_empty()) {
        shape_path.subpaths.push(sub);
    }

    (!shape_path.subpaths.is_empty()).then_some(shape_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path fill="#ff8800" fill-rule="evenodd"
              d="M 10 10 L 90 10 L 90 90 L 10 90 Z M 30 30 L 30 70 L 70 70 L 70 30 Z"/>
        <path fill="none" stroke="#000" d="M 0 0 L 100 100"/>
    </svg>"##;

    #[test]
    fn keeps_filled_paths_only() {
        let set = parse_svg(RING.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        let path = &set.paths()[0];
        assert_eq!(path.color, SourceColor::new(0xff, 0x88, 0x00, 1.0));
        assert_eq!(path.subpaths.len(), 2);
    }

    #[test]
    fn y_axis_is_flipped() {
        let set = parse_svg(RING.as_bytes()).unwrap();
        let start = set.paths()[0].subpaths[0].start;
        assert_eq!(start, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn ring_becomes_one_shape_with_hole() {
        let set = parse_svg(RING.as_bytes()).unwrap();
        let shapes = set.paths()[0].to_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
    }

    #[test]
    fn fill_rule_is_carried_over() {
        let set = parse_svg(RING.as_bytes()).unwrap();
        assert_eq!(set.paths()[0].fill_rule, FillRule::EvenOdd);
    }

    #[test]
    fn non_zero_same_winding_cuts_no_hole() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <path fill="#000" fill-rule="nonzero" d="M0 0 H10 V10 H0 Z M3 3 H7 V7 H3 Z"/>
        </svg>"##;
        let set = parse_svg(svg.as_bytes()).unwrap();
        assert_eq!(set.paths()[0].fill_rule, FillRule::NonZero);
        let shapes = set.paths()[0].to_shapes();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].holes.is_empty());
    }

    #[test]
    fn non_zero_reversed_inner_contour_is_a_hole() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <path fill="#000" d="M0 0 H10 V10 H0 Z M3 3 V7 H7 V3 Z"/>
        </svg>"##;
        let shapes = parse_svg(svg.as_bytes()).unwrap().paths()[0].to_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
    }

    #[test]
    fn malformed_svg_is_an_error() {
        assert!(parse_svg(b"<svg").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_svg(Path::new("/nonexistent/shape.svg")).unwrap_err();
        assert!(matches!(err, GeometryError::Io { .. }));
    }
}
