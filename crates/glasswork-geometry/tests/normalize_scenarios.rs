//! SVG in, normalized solid out.

use approx::assert_relative_eq;
use glam::Vec3;

use glasswork_geometry::{
    extrude_shapes, normalize, parse_svg, Aabb, ExtrusionParams, NormalizeCache, PathSet,
    DEFAULT_TARGET_SIZE,
};

fn parse(svg: &str) -> PathSet {
    parse_svg(svg.as_bytes()).expect("valid svg")
}

const TWO_RECTS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
    <rect x="0" y="0" width="40" height="40" fill="#3776ab"/>
    <g transform="translate(100 20)">
        <rect x="0" y="0" width="60" height="80" fill="#ffd43b"/>
    </g>
</svg>"##;

fn transformed_bounds(svg: &str, roundness: f32, params: &ExtrusionParams) -> Aabb {
    let norm = normalize(&parse(svg), roundness, DEFAULT_TARGET_SIZE);
    let mesh = extrude_shapes(norm.shapes.iter().map(|s| &s.shape), params);
    let m = norm.outer_transform(1.0);
    let points: Vec<Vec3> = mesh.positions.iter().map(|p| m.transform_point3(*p)).collect();
    Aabb::from_points(&points).expect("non-empty mesh")
}

#[test]
fn flat_solid_fills_target_and_is_centered() {
    let b = transformed_bounds(TWO_RECTS, 0.0, &ExtrusionParams::unit());
    let size = b.size();
    assert_relative_eq!(size.x.max(size.y), DEFAULT_TARGET_SIZE, epsilon = 1e-4);
    assert_relative_eq!(b.center().x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(b.center().y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(b.center().z, 0.0, epsilon = 1e-4);
}

#[test]
fn roundness_shrinks_the_flat_footprint() {
    let set = parse(TWO_RECTS);
    let sharp = normalize(&set, 0.0, DEFAULT_TARGET_SIZE);
    let round = normalize(&set, 7.0, DEFAULT_TARGET_SIZE);
    assert!(round.scale_factor < sharp.scale_factor);
    // 160 x 100 source, widest side 160
    assert_relative_eq!(sharp.scale_factor, DEFAULT_TARGET_SIZE / 160.0, epsilon = 1e-6);
    assert_relative_eq!(round.scale_factor, DEFAULT_TARGET_SIZE / 174.0, epsilon = 1e-6);
}

#[test]
fn colors_survive_normalization() {
    let set = parse(TWO_RECTS);
    let norm = normalize(&set, 1.0, DEFAULT_TARGET_SIZE);
    let colors: Vec<_> = norm.shapes.iter().map(|s| (s.color.r, s.color.g, s.color.b)).collect();
    assert_eq!(colors, vec![(0x37, 0x76, 0xab), (0xff, 0xd4, 0x3b)]);
}

#[test]
fn cache_tracks_roundness_edits() {
    let set = parse(TWO_RECTS);
    let mut cache = NormalizeCache::new();
    for roundness in [7.0, 7.0, 7.5, 7.5, 7.0] {
        let (r, _) = cache.get_or_compute(&set, roundness, DEFAULT_TARGET_SIZE);
        assert_eq!(*r, normalize(&set, roundness, DEFAULT_TARGET_SIZE));
    }
    assert_eq!(cache.recomputes(), 3);
}

#[test]
fn svg_without_fills_normalizes_to_identity() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <path d="M0 0 L10 10" stroke="black" fill="none"/>
    </svg>"#;
    let set = parse(svg);
    let norm = normalize(&set, 3.0, DEFAULT_TARGET_SIZE);
    assert!(norm.shapes.is_empty());
    assert_eq!(norm.scale_factor, 1.0);
    assert_eq!(norm.center_offset, Vec3::ZERO);
}
