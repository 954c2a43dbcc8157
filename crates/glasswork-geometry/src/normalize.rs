//! Shape normalization: center the combined geometry and scale it so its
//! bevel-inflated footprint fits a fixed target size.

use glam::{Mat4, Vec3};

use crate::extrude::{extrude_shapes, ExtrusionParams};
use crate::path::{PathSet, PathSetId, SourceColor};
use crate::shape::Shape;

/// World-space size the inflated footprint is mapped to.
pub const DEFAULT_TARGET_SIZE: f32 = 3.5;

/// A shape together with the fill color of the path it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeData {
    pub shape: Shape,
    pub color: SourceColor,
}

/// Output of [`normalize`].
///
/// `shapes` are the untouched source shapes; the normalization lives entirely
/// in `scale_factor` and `center_offset`, applied as the outer transform.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationResult {
    pub shapes: Vec<ShapeData>,
    pub scale_factor: f32,
    pub center_offset: Vec3,
}

impl NormalizationResult {
    pub fn empty() -> Self {
        Self { shapes: Vec::new(), scale_factor: 1.0, center_offset: Vec3::ZERO }
    }

    /// `scale(scale_factor * user_scale) * translate(-center_offset)`.
    pub fn outer_transform(&self, user_scale: f32) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale_factor * user_scale))
            * Mat4::from_translation(-self.center_offset)
    }
}

/// Centers and scales the shapes of `path_set`.
///
/// The combined bounds come from a throwaway unit-depth extrusion of every
/// shape, so overlapping or offset shapes are measured together rather than
/// per shape. `2 * roundness` is reserved around the largest planar dimension
/// for the bevel before the scale is derived.
pub fn normalize(path_set: &PathSet, roundness: f32, target_size: f32) -> NormalizationResult {
    if path_set.is_empty() {
        return NormalizationResult::empty();
    }

    let shapes: Vec<ShapeData> = path_set
        .paths()
        .iter()
        .flat_map(|path| {
            path.to_shapes()
                .into_iter()
                .map(move |shape| ShapeData { shape, color: path.color })
        })
        .collect();

    let bounds = {
        let probe = extrude_shapes(shapes.iter().map(|s| &s.shape), &ExtrusionParams::unit());
        probe.bounding_box()
    };

    let Some(bounds) = bounds else {
        log::debug!("path set {:?} has no closed regions; using identity transform", path_set.id());
        return NormalizationResult { shapes, scale_factor: 1.0, center_offset: Vec3::ZERO };
    };

    let center_offset = bounds.center();
    let adjusted_max_size = bounds.max_planar_dimension() + roundness * 2.0;
    let scale_factor = if adjusted_max_size > 0.0 { target_size / adjusted_max_size } else { 1.0 };

    log::debug!(
        "normalized {} shapes: center={center_offset:?} scale={scale_factor}",
        shapes.len()
    );

    NormalizationResult { shapes, scale_factor, center_offset }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct CacheKey {
    source: PathSetId,
    roundness: u32,
    target_size: u32,
}

impl CacheKey {
    fn new(path_set: &PathSet, roundness: f32, target_size: f32) -> Self {
        Self {
            source: path_set.id(),
            roundness: roundness.to_bits(),
            target_size: target_size.to_bits(),
        }
    }
}

/// Memoizes [`normalize`] on `(path set, roundness, target size)`.
///
/// Intended to be queried every frame; it only recomputes when an input
/// changes.
#[derive(Debug, Default)]
pub struct NormalizeCache {
    entry: Option<(CacheKey, NormalizationResult)>,
    recomputes: u64,
}

impl NormalizeCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result and whether it was recomputed by this call.
    pub fn get_or_compute(
        &mut self,
        path_set: &PathSet,
        roundness: f32,
        target_size: f32,
    ) -> (&NormalizationResult, bool) {
        let key = CacheKey::new(path_set, roundness, target_size);
        if !matches!(&self.entry, Some((k, _)) if *k == key) {
            self.entry = None;
        }
        let stale = self.entry.is_none();
        if stale {
            self.recomputes += 1;
        }
        let (_, result) = self
            .entry
            .get_or_insert_with(|| (key, normalize(path_set, roundness, target_size)));
        (&*result, stale)
    }

    /// Number of times the cache had to recompute.
    #[inline]
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}
