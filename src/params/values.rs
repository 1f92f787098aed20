//! Live parameter values.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::params::color::Rgb;
use crate::params::spec::{ParamId, ParamRange, ParamValue};

/// Current value of every field parameter.
///
/// Numeric fields always lie inside the ranges of [`PARAM_SPECS`](super::PARAM_SPECS);
/// all writes go through [`set`](Self::set) or [`clamp_all`](Self::clamp_all).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    // Fog
    pub fog_color: Rgb,
    pub fog_near: f32,
    pub fog_far: f32,

    // Particles
    pub particle_size: f32,
    pub particle_spacing: f32,
    pub particle_area_w: f32,
    pub particle_area_h: f32,
    pub pixel_ratio: f32,

    // Camera
    pub cam_x: f32,
    pub cam_y: f32,
    pub cam_z: f32,
    pub cam_fov: f32,
    pub cam_near: f32,
    pub cam_far: f32,

    // Color
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub noise_color_scale: f32,
    pub noise_color_speed: f32,
    pub bg_color_top: Rgb,
    pub bg_color_btm: Rgb,
    pub bg_rotation: f32,

    // Wave noise A
    pub noise_a_scale: f32,
    pub noise_a_speed: f32,
    pub noise_a_level: f32,

    // Wave noise B
    pub noise_b_scale: f32,
    pub noise_b_speed: f32,
    pub noise_b_level: f32,

    pub lines_enabled: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        fn num(id: ParamId) -> f32 {
            match id.spec().range {
                ParamRange::Number { default, .. } => default,
                _ => 0.0,
            }
        }
        fn col(id: ParamId) -> Rgb {
            match id.spec().range {
                ParamRange::Color { default } => default,
                _ => Rgb::BLACK,
            }
        }

        Self {
            fog_color: col(ParamId::FogColor),
            fog_near: num(ParamId::FogNear),
            fog_far: num(ParamId::FogFar),
            particle_size: num(ParamId::ParticleSize),
            particle_spacing: num(ParamId::ParticleSpacing),
            particle_area_w: num(ParamId::ParticleAreaW),
            particle_area_h: num(ParamId::ParticleAreaH),
            pixel_ratio: num(ParamId::PixelRatio),
            cam_x: num(ParamId::CamX),
            cam_y: num(ParamId::CamY),
            cam_z: num(ParamId::CamZ),
            cam_fov: num(ParamId::CamFov),
            cam_near: num(ParamId::CamNear),
            cam_far: num(ParamId::CamFar),
            color_a: col(ParamId::ColorA),
            color_b: col(ParamId::ColorB),
            noise_color_scale: num(ParamId::NoiseColorScale),
            noise_color_speed: num(ParamId::NoiseColorSpeed),
            bg_color_top: col(ParamId::BgColorTop),
            bg_color_btm: col(ParamId::BgColorBtm),
            bg_rotation: num(ParamId::BgRotation),
            noise_a_scale: num(ParamId::NoiseAScale),
            noise_a_speed: num(ParamId::NoiseASpeed),
            noise_a_level: num(ParamId::NoiseALevel),
            noise_b_scale: num(ParamId::NoiseBScale),
            noise_b_speed: num(ParamId::NoiseBSpeed),
            noise_b_level: num(ParamId::NoiseBLevel),
            lines_enabled: matches!(
                ParamId::LinesEnabled.spec().range,
                ParamRange::Flag { default: true }
            ),
        }
    }
}

impl FieldParams {
    /// Mutable slot of a numeric parameter.
    pub(crate) fn number_mut(&mut self, id: ParamId) -> Option<&mut f32> {
        Some(match id {
            ParamId::FogNear => &mut self.fog_near,
            ParamId::FogFar => &mut self.fog_far,
            ParamId::ParticleSize => &mut self.particle_size,
            ParamId::ParticleSpacing => &mut self.particle_spacing,
            ParamId::ParticleAreaW => &mut self.particle_area_w,
            ParamId::ParticleAreaH => &mut self.particle_area_h,
            ParamId::PixelRatio => &mut self.pixel_ratio,
            ParamId::CamX => &mut self.cam_x,
            ParamId::CamY => &mut self.cam_y,
            ParamId::CamZ => &mut self.cam_z,
            ParamId::CamFov => &mut self.cam_fov,
            ParamId::CamNear => &mut self.cam_near,
            ParamId::CamFar => &mut self.cam_far,
            ParamId::NoiseColorScale => &mut self.noise_color_scale,
            ParamId::NoiseColorSpeed => &mut self.noise_color_speed,
            ParamId::BgRotation => &mut self.bg_rotation,
            ParamId::NoiseAScale => &mut self.noise_a_scale,
            ParamId::NoiseASpeed => &mut self.noise_a_speed,
            ParamId::NoiseALevel => &mut self.noise_a_level,
            ParamId::NoiseBScale => &mut self.noise_b_scale,
            ParamId::NoiseBSpeed => &mut self.noise_b_speed,
            ParamId::NoiseBLevel => &mut self.noise_b_level,
            ParamId::FogColor
            | ParamId::ColorA
            | ParamId::ColorB
            | ParamId::BgColorTop
            | ParamId::BgColorBtm
            | ParamId::LinesEnabled => return None,
        })
    }

    /// Mutable slot of a color parameter.
    fn color_mut(&mut self, id: ParamId) -> Option<&mut Rgb> {
        match id {
            ParamId::FogColor => Some(&mut self.fog_color),
            ParamId::ColorA => Some(&mut self.color_a),
            ParamId::ColorB => Some(&mut self.color_b),
            ParamId::BgColorTop => Some(&mut self.bg_color_top),
            ParamId::BgColorBtm => Some(&mut self.bg_color_btm),
            _ => None,
        }
    }

    /// Read a parameter.
    pub fn get(&self, id: ParamId) -> ParamValue {
        use ParamValue::{Color, Flag, Number};
        match id {
            ParamId::FogColor => Color(self.fog_color),
            ParamId::FogNear => Number(self.fog_near),
            ParamId::FogFar => Number(self.fog_far),
            ParamId::ParticleSize => Number(self.particle_size),
            ParamId::ParticleSpacing => Number(self.particle_spacing),
            ParamId::ParticleAreaW => Number(self.particle_area_w),
            ParamId::ParticleAreaH => Number(self.particle_area_h),
            ParamId::PixelRatio => Number(self.pixel_ratio),
            ParamId::CamX => Number(self.cam_x),
            ParamId::CamY => Number(self.cam_y),
            ParamId::CamZ => Number(self.cam_z),
            ParamId::CamFov => Number(self.cam_fov),
            ParamId::CamNear => Number(self.cam_near),
            ParamId::CamFar => Number(self.cam_far),
            ParamId::ColorA => Color(self.color_a),
            ParamId::ColorB => Color(self.color_b),
            ParamId::NoiseColorScale => Number(self.noise_color_scale),
            ParamId::NoiseColorSpeed => Number(self.noise_color_speed),
            ParamId::BgColorTop => Color(self.bg_color_top),
            ParamId::BgColorBtm => Color(self.bg_color_btm),
            ParamId::BgRotation => Number(self.bg_rotation),
            ParamId::NoiseAScale => Number(self.noise_a_scale),
            ParamId::NoiseASpeed => Number(self.noise_a_speed),
            ParamId::NoiseALevel => Number(self.noise_a_level),
            ParamId::NoiseBScale => Number(self.noise_b_scale),
            ParamId::NoiseBSpeed => Number(self.noise_b_speed),
            ParamId::NoiseBLevel => Number(self.noise_b_level),
            ParamId::LinesEnabled => Flag(self.lines_enabled),
        }
    }

    /// Read a numeric parameter. Returns `None` for colors and flags.
    pub fn number(&self, id: ParamId) -> Option<f32> {
        self.get(id).as_number()
    }

    /// Write a parameter, clamping numbers into range.
    ///
    /// Returns whether the stored value changed. A value of the wrong type
    /// is rejected with [`Error::ParameterType`].
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<bool> {
        let spec = id.spec();
        let mismatch = || Error::ParameterType {
            name: spec.name,
            expected: spec.range.type_name(),
        };

        match value {
            ParamValue::Number(v) => {
                let slot = self.number_mut(id).ok_or_else(mismatch)?;
                let clamped = spec.clamp(v);
                if clamped != v {
                    log::debug!("{}: clamped {} to {}", spec.name, v, clamped);
                }
                let changed = *slot != clamped;
                *slot = clamped;
                Ok(changed)
            }
            ParamValue::Color(c) => {
                let slot = self.color_mut(id).ok_or_else(mismatch)?;
                let changed = *slot != c;
                *slot = c;
                Ok(changed)
            }
            ParamValue::Flag(b) => {
                if id != ParamId::LinesEnabled {
                    return Err(mismatch());
                }
                let changed = self.lines_enabled != b;
                self.lines_enabled = b;
                Ok(changed)
            }
        }
    }

    /// Clamp every numeric field into its declared range.
    pub fn clamp_all(&mut self) {
        for id in ParamId::ALL {
            let spec = id.spec();
            if let Some(slot) = self.number_mut(id) {
                *slot = spec.clamp(*slot);
            }
        }
    }

    /// True when every numeric field is inside its range.
    pub fn in_bounds(&self) -> bool {
        ParamId::ALL.iter().all(|&id| match (self.number(id), id.spec().bounds()) {
            (Some(v), Some((min, max))) => (min..=max).contains(&v),
            _ => true,
        })
    }
}
