use crate::paint::Color;

/// Number of backdrop taps per fragment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RefractionQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl RefractionQuality {
    #[inline]
    pub const fn samples(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 4,
            Self::High => 8,
        }
    }

    /// Low -> Medium -> High -> Low.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Parameters of the refractive glass material, in shader units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlassMaterial {
    pub thickness: f32,
    pub ior: f32,
    pub chromatic_aberration: f32,
    pub anisotropy: f32,
    pub distortion: f32,
    pub distortion_scale: f32,
    pub temporal_distortion: f32,
    pub clearcoat: f32,
    pub roughness: f32,
    pub color: Color,
    pub attenuation_color: Color,
    pub attenuation_distance: f32,
    /// Scales the reflective rim; 0 when reflections are off.
    pub hdr_intensity: f32,
    pub quality: RefractionQuality,
}

impl Default for GlassMaterial {
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
            roughness: 0.1,
            color: Color::WHITE,
            attenuation_color: Color::WHITE,
            attenuation_distance: 0.5,
            hdr_intensity: 1.0,
            quality: RefractionQuality::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_cycles_and_maps_to_samples() {
        let q = RefractionQuality::Low;
        assert_eq!(q.samples(), 1);
        assert_eq!(q.next().samples(), 4);
        assert_eq!(q.next().next().samples(), 8);
        assert_eq!(q.next().next().next(), RefractionQuality::Low);
    }
}
