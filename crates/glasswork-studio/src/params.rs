//! Demo parameters.
//!
//! Every knob has a default and a range; values are clamped after loading
//! and after every keyboard edit. A JSON file may override any subset:
//!
//! ```json
//! { "geometry": { "roundness": 4.0 }, "glass": { "ior": 1.5 } }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use glasswork_engine::paint::Color;
use glasswork_engine::render::{GlassMaterial, RefractionQuality};
use glasswork_geometry::{BevelResolution, ExtrusionParams};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub geometry: Geometry,
    pub quality: Quality,
    pub glass: Glass,
    pub reflections: Reflections,
    pub background: Background,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub scale: f32,
    pub depth: f32,
    pub roundness: f32,
    pub steps: u32,
    pub curve_segments: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self { scale: 1.0, depth: 100.0, roundness: 7.0, steps: 1, curve_segments: 12 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quality {
    pub high_res: bool,
}

impl Default for Quality {
    fn default() -> Self {
        Self { high_res: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glass {
    pub thickness: f32,
    pub ior: f32,
    pub chromatic_aberration: f32,
    pub anisotropy: f32,
    pub distortion: f32,
    pub distortion_scale: f32,
    pub temporal_distortion: f32,
    pub clearcoat: f32,
    /// Hex string, `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub color: String,
    pub attenuation_color: String,
    pub attenuation_distance: f32,
    pub resolution: u32,
    pub roughness: f32,
}

impl Default for Glass {
    fn default() -> Self {
        Self {
            thickness: 0.2,
            ior: 1.2,
            chromatic_aberration: 0.02,
            anisotropy: 0.1,
            distortion: 0.4,
            distortion_scale: 0.3,
            temporal_distortion: 0.6,
            clearcoat: 0.0,
            color: "#ffffff".to_string(),
            attenuation_color: "#ffffff".to_string(),
            attenuation_distance: 0.5,
            resolution: 1024,
            roughness: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reflections {
    pub enable_hdr: bool,
    pub hdr_intensity: f32,
}

impl Default for Reflections {
    fn default() -> Self {
        Self { enable_hdr: true, hdr_intensity: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub show_demo_elements: bool,
    pub caption: String,
    /// Optional picture files; procedural pictures fill the missing slots.
    pub images: Vec<PathBuf>,
}

impl Default for Background {
    fn default() -> Self {
        Self { show_demo_elements: true, caption: "glasswork".to_string(), images: Vec::new() }
    }
}

/// Serde mirror of the engine's [`RefractionQuality`]: `"low"`, `"medium"`
/// or `"high"`.
#[derive(Serialize, Deserialize)]
#[serde(remote = "RefractionQuality", rename_all = "lowercase")]
enum RefractionQualityDef {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    #[serde(with = "RefractionQualityDef")]
    pub refraction_quality: RefractionQuality,
}

impl Params {
    /// Reads a JSON override file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read params file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid params file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let mut params: Params = serde_json::from_str(text)?;
        params.clamp();
        Ok(params)
    }

    /// Forces every knob into its range.
    pub fn clamp(&mut self) {
        let g = &mut self.geometry;
        g.scale = clamp_f(g.scale, 0.1, 2.0, 1.0);
        g.depth = clamp_f(g.depth, 1.0, 300.0, 100.0);
        g.roundness = clamp_f(g.roundness, 0.0, 20.0, 7.0);
        g.steps = g.steps.clamp(1, 10);
        g.curve_segments = g.curve_segments.clamp(1, 64);

        let m = &mut self.glass;
        m.thickness = clamp_f(m.thickness, 0.0, 3.0, 0.2);
        m.ior = clamp_f(m.ior, 0.0, 3.0, 1.2);
        m.chromatic_aberration = clamp_f(m.chromatic_aberration, 0.0, 1.0, 0.02);
        m.anisotropy = clamp_f(m.anisotropy, 0.0, 1.0, 0.1);
        m.distortion = clamp_f(m.distortion, 0.0, 1.0, 0.4);
        m.distortion_scale = clamp_f(m.distortion_scale, 0.01, 1.0, 0.3);
        m.temporal_distortion = clamp_f(m.temporal_distortion, 0.0, 1.0, 0.6);
        m.clearcoat = clamp_f(m.clearcoat, 0.0, 1.0, 0.0);
        m.attenuation_distance = clamp_f(m.attenuation_distance, 0.0, 10.0, 0.5);
        m.resolution = m.resolution.clamp(128, 2048);
        m.roughness = clamp_f(m.roughness, 0.0, 1.0, 0.1);

        let r = &mut self.reflections;
        r.hdr_intensity = clamp_f(r.hdr_intensity, 0.0, 5.0, 1.0);
    }

    /// Extrusion settings of the displayed solid.
    pub fn extrusion(&self) -> ExtrusionParams {
        let g = &self.geometry;
        ExtrusionParams::rounded(
            g.depth,
            g.roundness,
            BevelResolution::from_high_res(self.quality.high_res),
            g.steps,
            g.curve_segments,
        )
    }

    /// Material handed to the glass draw. Unparseable colors fall back to
    /// white.
    pub fn material(&self) -> GlassMaterial {
        let m = &self.glass;
        GlassMaterial {
            thickness: m.thickness,
            ior: m.ior,
            chromatic_aberration: m.chromatic_aberration,
            anisotropy: m.anisotropy,
            distortion: m.distortion,
            distortion_scale: m.distortion_scale,
            temporal_distortion: m.temporal_distortion,
            clearcoat: m.clearcoat,
            roughness: m.roughness,
            color: parse_color(&m.color),
            attenuation_color: parse_color(&m.attenuation_color),
            attenuation_distance: m.attenuation_distance,
            hdr_intensity: if self.reflections.enable_hdr { self.reflections.hdr_intensity } else { 0.0 },
            quality: self.performance.refraction_quality,
        }
    }
}

fn clamp_f(v: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if v.is_nan() { fallback } else { v.clamp(min, max) }
}

fn parse_color(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|err| {
        log::warn!("color '{hex}': {err}; using white");
        Color::WHITE
    })
}
