//! Render-facing state handed to the collaborator each frame

use bytemuck::{Pod, Zeroable};

use crate::core::camera::FieldCamera;
use crate::field::LineVertex;
use crate::params::{FieldParams, Rgb};

/// Page background gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub top: Rgb,
    pub bottom: Rgb,
    /// Gradient angle in turns
    pub rotation: f32,
}

impl Background {
    pub fn from_params(params: &FieldParams) -> Self {
        Self {
            top: params.bg_color_top,
            bottom: params.bg_color_btm,
            rotation: params.bg_rotation,
        }
    }

    /// CSS `background` value for this gradient.
    pub fn css_gradient(&self) -> String {
        format!(
            "linear-gradient({}turn, {}, {})",
            self.rotation, self.top, self.bottom
        )
    }
}

/// Linear distance fog
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn from_params(params: &FieldParams) -> Self {
        Self {
            color: params.fog_color,
            near: params.fog_near,
            far: params.fog_far,
        }
    }

    /// Fog amount at `depth`: smoothstep from `near` to `far`.
    ///
    /// Returns a value in `[0.0, 1.0]`. When `near >= far` the fog is a hard
    /// step at `far`.
    pub fn factor(&self, depth: f32) -> f32 {
        if self.far <= self.near {
            return if depth >= self.far { 1.0 } else { 0.0 };
        }
        let t = ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// GPU-ready particle uniform.
///
/// `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FieldUniform {
    // -- Colors (16 + 16 = 32 bytes) --
    pub color_a: [f32; 3],
    pub particle_size: f32,
    pub color_b: [f32; 3],
    pub elapsed_ms: f32,

    // -- Fog (16 + 16 = 32 bytes) --
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub pixel_ratio: f32,
    pub _pad: [f32; 2],
}

impl FieldUniform {
    pub fn new(params: &FieldParams, elapsed_ms: f64) -> Self {
        Self {
            color_a: params.color_a.to_array(),
            particle_size: params.particle_size,
            color_b: params.color_b.to_array(),
            elapsed_ms: elapsed_ms as f32,
            fog_color: params.fog_color.to_array(),
            fog_near: params.fog_near,
            fog_far: params.fog_far,
            pixel_ratio: params.pixel_ratio,
            _pad: [0.0; 2],
        }
    }
}

impl Default for FieldUniform {
    fn default() -> Self {
        Self::new(&FieldParams::default(), 0.0)
    }
}

/// Borrowed view of everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    pub positions: &'a [[f32; 3]],
    pub color_ratios: &'a [f32],
    /// Present only while lines are enabled
    pub lines: Option<&'a [LineVertex]>,
    pub camera: &'a FieldCamera,
    pub background: Background,
    pub fog: Fog,
    pub uniform: FieldUniform,
    pub elapsed_ms: f64,
}

impl<'a> FrameView<'a> {
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn color_ratio_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.color_ratios)
    }

    pub fn line_bytes(&self) -> Option<&'a [u8]> {
        self.lines.map(|lines| bytemuck::cast_slice(lines))
    }

    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_alignment() {
        let size = std::mem::size_of::<FieldUniform>();
        assert_eq!(size % 16, 0, "FieldUniform size {size} is not 16-byte aligned");
        assert_eq!(size, 64);
    }

    #[test]
    fn test_uniform_from_params() {
        let params = FieldParams::default();
        let u = FieldUniform::new(&params, 1500.0);
        assert_eq!(u.particle_size, 1.0);
        assert_eq!(u.elapsed_ms, 1500.0);
        assert_eq!(u.color_a, params.color_a.to_array());
        assert_eq!(u.pixel_ratio, 2.0);
        assert_eq!(bytemuck::bytes_of(&u).len(), 64);
    }

    #[test]
    fn test_css_gradient() {
        let bg = Background::from_params(&FieldParams::default());
        assert_eq!(bg.css_gradient(), "linear-gradient(0turn, #000000, #000000)");

        let bg = Background {
            top: Rgb::new(0xff, 0, 0),
            bottom: Rgb::new(0, 0, 0xff),
            rotation: 0.25,
        };
        assert_eq!(bg.css_gradient(), "linear-gradient(0.25turn, #ff0000, #0000ff)");
    }

    #[test]
    fn test_fog_factor_smoothstep() {
        let fog = Fog::from_params(&FieldParams::default());
        assert_eq!(fog.factor(0.0), 0.0);
        assert_eq!(fog.factor(5.0), 0.0);
        assert_eq!(fog.factor(10.0), 0.5);
        assert_eq!(fog.factor(15.0), 1.0);
        assert_eq!(fog.factor(100.0), 1.0);

        let mut prev = 0.0;
        for i in 0..=200 {
            let f = fog.factor(i as f32 * 0.1);
            assert!(f >= prev && (0.0..=1.0).contains(&f));
            prev = f;
        }
    }

    #[test]
    fn test_fog_degenerate_range() {
        let fog = Fog {
            color: Rgb::BLACK,
            near: 10.0,
            far: 10.0,
        };
        assert_eq!(fog.factor(9.9), 0.0);
        assert_eq!(fog.factor(10.0), 1.0);
    }
}
