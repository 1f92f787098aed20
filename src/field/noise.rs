//! Coherent noise sources for the displacement and color fields.

use std::fmt;

use noise::{NoiseFn, Simplex};

/// One of the three independent noise layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseLayer {
    /// First vertical displacement layer.
    DisplacementA,
    /// Second vertical displacement layer.
    DisplacementB,
    /// Color ratio layer.
    Color,
}

impl NoiseLayer {
    pub const ALL: [NoiseLayer; 3] = [
        NoiseLayer::DisplacementA,
        NoiseLayer::DisplacementB,
        NoiseLayer::Color,
    ];
}

/// Source of 3D coherent noise, sampled at `(x, y, t)`.
///
/// Implementations must be pure: equal inputs give equal outputs, and the
/// result lies in `[-1.0, 1.0]`.
pub trait FieldSampler {
    fn sample(&self, layer: NoiseLayer, x: f64, y: f64, t: f64) -> f64;
}

/// Three simplex generators seeded once at construction.
#[derive(Clone)]
pub struct NoiseField {
    seed: u32,
    displacement_a: Simplex,
    displacement_b: Simplex,
    color: Simplex,
}

impl NoiseField {
    /// Seed the layers with `seed`, `seed + 1` and `seed + 2`.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            displacement_a: Simplex::new(seed),
            displacement_b: Simplex::new(seed.wrapping_add(1)),
            color: Simplex::new(seed.wrapping_add(2)),
        }
    }

    /// Base seed
    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn generator(&self, layer: NoiseLayer) -> &Simplex {
        match layer {
            NoiseLayer::DisplacementA => &self.displacement_a,
            NoiseLayer::DisplacementB => &self.displacement_b,
            NoiseLayer::Color => &self.color,
        }
    }
}

impl FieldSampler for NoiseField {
    #[inline]
    fn sample(&self, layer: NoiseLayer, x: f64, y: f64, t: f64) -> f64 {
        self.generator(layer).get([x, y, t]).clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> impl Iterator<Item = (f64, f64, f64)> {
        (0..200).map(|i| {
            let f = i as f64;
            (f * 0.37 - 30.0, f * 0.11 - 9.0, f * 0.05)
        })
    }

    #[test]
    fn test_output_in_unit_range() {
        let field = NoiseField::new(7);
        for layer in NoiseLayer::ALL {
            for (x, y, t) in sample_points() {
                let v = field.sample(layer, x, y, t);
                assert!((-1.0..=1.0).contains(&v), "{layer:?} gave {v}");
            }
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for (x, y, t) in sample_points() {
            let first = a.sample(NoiseLayer::Color, x, y, t);
            assert_eq!(first.to_bits(), a.sample(NoiseLayer::Color, x, y, t).to_bits());
            assert_eq!(first.to_bits(), b.sample(NoiseLayer::Color, x, y, t).to_bits());
        }
    }

    #[test]
    fn test_layers_are_independent() {
        let field = NoiseField::new(3);
        let differing = sample_points()
            .filter(|&(x, y, t)| {
                let a = field.sample(NoiseLayer::DisplacementA, x, y, t);
                let b = field.sample(NoiseLayer::DisplacementB, x, y, t);
                (a - b).abs() > 1e-9
            })
            .count();
        assert!(differing > 150, "only {differing} of 200 samples differ");
    }

    #[test]
    fn test_noise_is_coherent() {
        let field = NoiseField::new(11);
        let v0 = field.sample(NoiseLayer::DisplacementA, 1.0, 2.0, 0.5);
        let v1 = field.sample(NoiseLayer::DisplacementA, 1.0 + 1e-4, 2.0, 0.5);
        assert!((v0 - v1).abs() < 1e-2);
    }

    #[test]
    fn test_seed_is_kept() {
        assert_eq!(NoiseField::new(u32::MAX).seed(), u32::MAX);
    }
}
