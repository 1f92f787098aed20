//! Static parameter table: names, kinds, ranges and defaults.
//!
//! Every parameter of the field has exactly one [`ParamSpec`] in
//! [`PARAM_SPECS`], stored in [`ParamId`] declaration order. The table is the
//! single source for GUI slider bounds, scene randomization bounds and the
//! clamping applied on every write.

use std::fmt;

use crate::core::{Error, Result};
use crate::params::color::Rgb;

/// Identifies one field parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamId {
    FogColor,
    FogNear,
    FogFar,
    ParticleSize,
    ParticleSpacing,
    ParticleAreaW,
    ParticleAreaH,
    PixelRatio,
    CamX,
    CamY,
    CamZ,
    CamFov,
    CamNear,
    CamFar,
    ColorA,
    ColorB,
    NoiseColorScale,
    NoiseColorSpeed,
    BgColorTop,
    BgColorBtm,
    BgRotation,
    NoiseAScale,
    NoiseASpeed,
    NoiseALevel,
    NoiseBScale,
    NoiseBSpeed,
    NoiseBLevel,
    LinesEnabled,
}

impl ParamId {
    pub const COUNT: usize = 28;

    /// All parameters in declaration order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::FogColor,
        ParamId::FogNear,
        ParamId::FogFar,
        ParamId::ParticleSize,
        ParamId::ParticleSpacing,
        ParamId::ParticleAreaW,
        ParamId::ParticleAreaH,
        ParamId::PixelRatio,
        ParamId::CamX,
        ParamId::CamY,
        ParamId::CamZ,
        ParamId::CamFov,
        ParamId::CamNear,
        ParamId::CamFar,
        ParamId::ColorA,
        ParamId::ColorB,
        ParamId::NoiseColorScale,
        ParamId::NoiseColorSpeed,
        ParamId::BgColorTop,
        ParamId::BgColorBtm,
        ParamId::BgRotation,
        ParamId::NoiseAScale,
        ParamId::NoiseASpeed,
        ParamId::NoiseALevel,
        ParamId::NoiseBScale,
        ParamId::NoiseBSpeed,
        ParamId::NoiseBLevel,
        ParamId::LinesEnabled,
    ];

    /// Table entry for this parameter.
    #[inline]
    pub fn spec(self) -> &'static ParamSpec {
        &PARAM_SPECS[self as usize]
    }

    /// Snake-case name, e.g. `particle_size`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look up by snake-case name or camelCase alias (`particleSize`).
    pub fn from_name(name: &str) -> Option<Self> {
        PARAM_SPECS
            .iter()
            .find(|s| s.name == name || s.alias == name)
            .map(|s| s.id)
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which easing rate a smoothly animated parameter uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseGroup {
    Particle,
    Camera,
}

/// How a write to the parameter takes effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Applied as-is on the next frame.
    Instant,
    /// Applied immediately and forces a grid/edge rebuild.
    Structural,
    /// Approached gradually through the ease set.
    Eased(EaseGroup),
}

/// Value domain of a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamRange {
    Number { min: f32, max: f32, default: f32 },
    Color { default: Rgb },
    Flag { default: bool },
}

impl ParamRange {
    /// Human readable type name, used in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamRange::Number { .. } => "number",
            ParamRange::Color { .. } => "color",
            ParamRange::Flag { .. } => "flag",
        }
    }

    /// Default value as a [`ParamValue`].
    pub fn default_value(&self) -> ParamValue {
        match *self {
            ParamRange::Number { default, .. } => ParamValue::Number(default),
            ParamRange::Color { default } => ParamValue::Color(default),
            ParamRange::Flag { default } => ParamValue::Flag(default),
        }
    }
}

/// One row of the parameter table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub name: &'static str,
    pub alias: &'static str,
    /// Panel folder the control belongs to.
    pub folder: &'static str,
    pub kind: ParamKind,
    pub range: ParamRange,
    /// Whether scene randomization draws a new value.
    pub randomized: bool,
}

impl ParamSpec {
    /// `(min, max)` for numeric parameters.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        match self.range {
            ParamRange::Number { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }

    /// Clamp a numeric value into range. NaN maps to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        match self.range {
            ParamRange::Number { min, max, default } => {
                if value.is_nan() {
                    default
                } else {
                    value.clamp(min, max)
                }
            }
            _ => value,
        }
    }
}

const fn number(
    id: ParamId,
    name: &'static str,
    alias: &'static str,
    folder: &'static str,
    kind: ParamKind,
    bounds: (f32, f32, f32),
    randomized: bool,
) -> ParamSpec {
    ParamSpec {
        id,
        name,
        alias,
        folder,
        kind,
        range: ParamRange::Number {
            min: bounds.0,
            max: bounds.1,
            default: bounds.2,
        },
        randomized,
    }
}

const fn color(
    id: ParamId,
    name: &'static str,
    alias: &'static str,
    folder: &'static str,
    default: u32,
    randomized: bool,
) -> ParamSpec {
    ParamSpec {
        id,
        name,
        alias,
        folder,
        kind: ParamKind::Instant,
        range: ParamRange::Color { default: Rgb::from_u32(default) },
        randomized,
    }
}

use EaseGroup::{Camera, Particle};
use ParamKind::{Eased, Instant, Structural};

/// The parameter table, indexed by `ParamId as usize`.
pub static PARAM_SPECS: [ParamSpec; ParamId::COUNT] = [
    color(ParamId::FogColor, "fog_color", "fogColor", "Fog", 0x163646, false),
    number(ParamId::FogNear, "fog_near", "fogNear", "Fog", Instant, (0.0, 50.0, 5.0), false),
    number(ParamId::FogFar, "fog_far", "fogFar", "Fog", Instant, (0.0, 100.0, 15.0), false),
    number(ParamId::ParticleSize, "particle_size", "particleSize", "Particles", Eased(Particle), (0.25, 2.0, 1.0), true),
    number(ParamId::ParticleSpacing, "particle_spacing", "particleSpacing", "Particles", Structural, (0.25, 0.75, 0.5), true),
    number(ParamId::ParticleAreaW, "particle_area_w", "particleAreaW", "Particles", Structural, (1.0, 50.0, 25.0), true),
    number(ParamId::ParticleAreaH, "particle_area_h", "particleAreaH", "Particles", Structural, (1.0, 50.0, 25.0), true),
    number(ParamId::PixelRatio, "pixel_ratio", "pixelRatio", "Particles", Instant, (0.5, 3.0, 2.0), false),
    number(ParamId::CamX, "cam_x", "camX", "Camera", Eased(Camera), (-20.0, 20.0, 0.0), true),
    number(ParamId::CamY, "cam_y", "camY", "Camera", Eased(Camera), (-20.0, 20.0, -7.0), true),
    number(ParamId::CamZ, "cam_z", "camZ", "Camera", Eased(Camera), (-20.0, 20.0, 3.0), true),
    number(ParamId::CamFov, "cam_fov", "camFov", "Camera", Eased(Camera), (0.0, 180.0, 60.0), true),
    number(ParamId::CamNear, "cam_near", "camNear", "Camera", Instant, (0.0, 10.0, 0.1), false),
    number(ParamId::CamFar, "cam_far", "camFar", "Camera", Instant, (1.0, 100.0, 100.0), false),
    color(ParamId::ColorA, "color_a", "colorA", "Color", 0x66ddff, true),
    color(ParamId::ColorB, "color_b", "colorB", "Color", 0x66ffbb, true),
    number(ParamId::NoiseColorScale, "noise_color_scale", "noiseColorScale", "Color", Instant, (0.0, 1.0, 0.2), true),
    number(ParamId::NoiseColorSpeed, "noise_color_speed", "noiseColorSpeed", "Color", Instant, (0.0, 1.0, 0.25), true),
    color(ParamId::BgColorTop, "bg_color_top", "bgColorTop", "Color", 0x000000, false),
    color(ParamId::BgColorBtm, "bg_color_btm", "bgColorBtm", "Color", 0x000000, false),
    number(ParamId::BgRotation, "bg_rotation", "bgRotation", "Color", Instant, (0.0, 1.0, 0.0), false),
    number(ParamId::NoiseAScale, "noise_a_scale", "noiseAScale", "Wave Noise A", Instant, (0.0, 1.0, 0.45), true),
    number(ParamId::NoiseASpeed, "noise_a_speed", "noiseASpeed", "Wave Noise A", Instant, (0.0, 1.0, 0.45), true),
    number(ParamId::NoiseALevel, "noise_a_level", "noiseALevel", "Wave Noise A", Instant, (0.0, 2.0, 0.75), true),
    number(ParamId::NoiseBScale, "noise_b_scale", "noiseBScale", "Wave Noise B", Instant, (0.0, 1.0, 0.2), true),
    number(ParamId::NoiseBSpeed, "noise_b_speed", "noiseBSpeed", "Wave Noise B", Instant, (0.0, 1.0, 0.25), true),
    number(ParamId::NoiseBLevel, "noise_b_level", "noiseBLevel", "Wave Noise B", Instant, (0.0, 2.0, 1.5), true),
    ParamSpec {
        id: ParamId::LinesEnabled,
        name: "lines_enabled",
        alias: "linesEnabled",
        folder: "Particles",
        kind: Structural,
        range: ParamRange::Flag { default: false },
        randomized: false,
    },
];

// ---------------------------------------------------------------------------
// ParamValue
// ---------------------------------------------------------------------------

/// A value written to or read from a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(Rgb),
    Flag(bool),
}

impl ParamValue {
    /// Parse GUI text for the given parameter.
    pub fn parse(spec: &ParamSpec, text: &str) -> Result<Self> {
        let text = text.trim();
        let mismatch = || Error::ParameterType {
            name: spec.name,
            expected: spec.range.type_name(),
        };
        match spec.range {
            ParamRange::Number { .. } => text
                .parse::<f32>()
                .map(ParamValue::Number)
                .map_err(|_| mismatch()),
            ParamRange::Color { .. } => Rgb::from_hex(text).map(ParamValue::Color),
            ParamRange::Flag { .. } => match text {
                "true" | "1" | "on" => Ok(ParamValue::Flag(true)),
                "false" | "0" | "off" => Ok(ParamValue::Flag(false)),
                _ => Err(mismatch()),
            },
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match *self {
            ParamValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match *self {
            ParamValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            ParamValue::Flag(b) => Some(b),
            _ => None,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Number(v)
    }
}

impl From<Rgb> for ParamValue {
    fn from(c: Rgb) -> Self {
        ParamValue::Color(c)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Flag(b)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Color(c) => write!(f, "{c}"),
            ParamValue::Flag(b) => write!(f, "{b}"),
        }
    }
}
