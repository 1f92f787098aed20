//! Per-frame field evaluation.
//!
//! Rewrites vertex `z` and color ratio from the noise layers, then mirrors
//! the result into the line buffers. Output depends only on the elapsed
//! time, the parameters and the sampler, so repeated calls with the same
//! inputs are bit-identical.

use crate::field::grid::Grid;
use crate::field::noise::{FieldSampler, NoiseLayer};
use crate::field::topology::LineField;
use crate::params::{FieldParams, Lerp, Rgb};
use crate::params::color::mix;

/// Noise settings for one frame, extracted from [`FieldParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldInputs {
    pub a_scale: f64,
    pub a_speed: f64,
    pub a_level: f64,
    pub b_scale: f64,
    pub b_speed: f64,
    pub b_level: f64,
    pub color_scale: f64,
    pub color_speed: f64,
}

impl From<&FieldParams> for FieldInputs {
    fn from(p: &FieldParams) -> Self {
        Self {
            a_scale: p.noise_a_scale as f64,
            a_speed: p.noise_a_speed as f64,
            a_level: p.noise_a_level as f64,
            b_scale: p.noise_b_scale as f64,
            b_speed: p.noise_b_speed as f64,
            b_level: p.noise_b_level as f64,
            color_scale: p.noise_color_scale as f64,
            color_speed: p.noise_color_speed as f64,
        }
    }
}

/// Vertical displacement of the point `(x, y)` at `seconds`.
#[inline]
pub fn displacement<S: FieldSampler + ?Sized>(
    sampler: &S,
    inputs: &FieldInputs,
    x: f64,
    y: f64,
    seconds: f64,
) -> f64 {
    let a = sampler.sample(
        NoiseLayer::DisplacementA,
        x * inputs.a_scale,
        y * inputs.a_scale,
        inputs.a_speed * seconds,
    );
    let b = sampler.sample(
        NoiseLayer::DisplacementB,
        x * inputs.b_scale,
        y * inputs.b_scale,
        inputs.b_speed * seconds,
    );
    inputs.a_level * a + inputs.b_level * b
}

/// Map raw color noise in `[-1, 1]` to a ratio: remap to `[0, 1]`, clamp,
/// then square. The square biases the distribution toward color A.
#[inline]
pub fn shape_color_ratio(noise: f64) -> f32 {
    let ratio = (0.5 * noise + 0.5).clamp(0.0, 1.0);
    (ratio * ratio) as f32
}

/// Color ratio of the point `(x, y)` at `seconds`.
#[inline]
pub fn color_ratio<S: FieldSampler + ?Sized>(
    sampler: &S,
    inputs: &FieldInputs,
    x: f64,
    y: f64,
    seconds: f64,
) -> f32 {
    let noise = sampler.sample(
        NoiseLayer::Color,
        x * inputs.color_scale,
        y * inputs.color_scale,
        inputs.color_speed * seconds,
    );
    shape_color_ratio(noise)
}

/// Color of an edge: the midpoint of its endpoint ratios mixes A toward B.
#[inline]
pub fn edge_color(color_a: Rgb, color_b: Rgb, ratio_a: f32, ratio_b: f32) -> [f32; 3] {
    let ratio = ratio_a.lerp(&ratio_b, 0.5);
    mix(color_a, color_b, ratio)
}

/// Recompute `z` and color ratio for every grid vertex at `elapsed_ms`.
pub fn update_grid<S: FieldSampler + ?Sized>(
    grid: &mut Grid,
    params: &FieldParams,
    sampler: &S,
    elapsed_ms: f64,
) {
    let inputs = FieldInputs::from(params);
    let seconds = elapsed_ms / 1000.0;
    let (positions, ratios) = grid.buffers_mut();

    for (pos, ratio) in positions.iter_mut().zip(ratios.iter_mut()) {
        let x = pos[0] as f64;
        let y = pos[1] as f64;
        pos[2] = displacement(sampler, &inputs, x, y, seconds) as f32;
        *ratio = color_ratio(sampler, &inputs, x, y, seconds);
    }
}

/// Copy endpoint positions from `grid` and recolor every edge.
///
/// If `lines` was built for a different lattice size it is rebuilt from the
/// grid's layout first, so edge indices always stay inside the grid.
pub fn update_lines(lines: &mut LineField, grid: &Grid, color_a: Rgb, color_b: Rgb) {
    if !lines.matches(grid.layout()) {
        log::warn!(
            "Line edges do not match the {}x{} grid, rebuilding",
            grid.layout().cols,
            grid.layout().rows
        );
        *lines = LineField::build(grid.layout());
    }
    let positions = grid.positions();
    let ratios = grid.color_ratios();
    let (edges, vertices) = lines.parts_mut();

    for (edge, pair) in edges.iter().zip(vertices.chunks_exact_mut(2)) {
        let (a, b) = (edge[0] as usize, edge[1] as usize);
        let color = edge_color(color_a, color_b, ratios[a], ratios[b]);
        pair[0].position = positions[a];
        pair[0].color = color;
        pair[1].position = positions[b];
        pair[1].color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::grid::GridLayout;
    use crate::field::noise::NoiseField;

    /// Returns a fixed value per layer.
    struct ConstSampler {
        a: f64,
        b: f64,
        color: f64,
    }

    impl FieldSampler for ConstSampler {
        fn sample(&self, layer: NoiseLayer, _x: f64, _y: f64, _t: f64) -> f64 {
            match layer {
                NoiseLayer::DisplacementA => self.a,
                NoiseLayer::DisplacementB => self.b,
                NoiseLayer::Color => self.color,
            }
        }
    }

    fn small_grid() -> Grid {
        Grid::build(GridLayout::new(4.0, 3.0, 0.5).unwrap())
    }

    #[test]
    fn test_stub_layer_a_gives_unit_z() {
        let params = FieldParams {
            noise_a_level: 1.0,
            noise_b_level: 0.0,
            ..Default::default()
        };
        let sampler = ConstSampler { a: 1.0, b: 0.7, color: 0.0 };
        let mut grid = small_grid();
        update_grid(&mut grid, &params, &sampler, 1234.0);
        for p in grid.positions() {
            assert_eq!(p[2], 1.0);
        }
    }

    #[test]
    fn test_levels_weight_layers() {
        let params = FieldParams {
            noise_a_level: 0.5,
            noise_b_level: 2.0,
            ..Default::default()
        };
        let sampler = ConstSampler { a: -1.0, b: 0.25, color: 0.0 };
        let mut grid = small_grid();
        update_grid(&mut grid, &params, &sampler, 0.0);
        for p in grid.positions() {
            assert!((p[2] - 0.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_color_ratio_shaping() {
        assert_eq!(shape_color_ratio(-1.0), 0.0);
        assert_eq!(shape_color_ratio(1.0), 1.0);
        assert_eq!(shape_color_ratio(0.0), 0.25);
        // Out-of-range noise is clamped before squaring
        assert_eq!(shape_color_ratio(-5.0), 0.0);
        assert_eq!(shape_color_ratio(5.0), 1.0);
        for i in 0..=200 {
            let n = -1.0 + i as f64 * 0.01;
            let r = shape_color_ratio(n);
            assert!((0.0..=1.0).contains(&r), "noise {n} gave ratio {r}");
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let params = FieldParams::default();
        let noise = NoiseField::new(99);
        let mut first = small_grid();
        let mut second = small_grid();
        update_grid(&mut first, &params, &noise, 4567.0);
        update_grid(&mut second, &params, &noise, 4567.0);
        update_grid(&mut second, &params, &noise, 4567.0);

        let bits = |g: &Grid| -> Vec<u32> {
            g.positions()
                .iter()
                .flat_map(|p| p.iter().map(|v| v.to_bits()))
                .chain(g.color_ratios().iter().map(|r| r.to_bits()))
                .collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn test_planar_positions_are_untouched() {
        let params = FieldParams::default();
        let noise = NoiseField::new(5);
        let mut grid = small_grid();
        let before: Vec<[f32; 2]> = grid.positions().iter().map(|p| [p[0], p[1]]).collect();
        update_grid(&mut grid, &params, &noise, 10_000.0);
        let after: Vec<[f32; 2]> = grid.positions().iter().map(|p| [p[0], p[1]]).collect();
        assert_eq!(before, after);
        assert!(grid.color_ratios().iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn test_edge_color_uses_ratio_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 255, 255);
        let c = edge_color(a, b, 0.0, 1.0);
        for ch in c {
            assert!((ch - 0.5).abs() < 1e-6);
        }
        assert_eq!(edge_color(a, b, 0.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mismatched_lines_are_rebuilt() {
        let small = GridLayout::new(3.0, 3.0, 1.0).unwrap();
        let large = GridLayout::new(6.0, 4.0, 1.0).unwrap();
        let sampler = ConstSampler { a: 0.0, b: 0.0, color: 0.0 };
        let params = FieldParams::default();

        // Edges from the larger lattice would index past the small grid
        let mut grid = Grid::build(small);
        let mut lines = LineField::build(&large);
        update_grid(&mut grid, &params, &sampler, 0.0);
        update_lines(&mut lines, &grid, params.color_a, params.color_b);
        assert!(lines.matches(&small));
        assert_eq!(lines.edges(), LineField::build(&small).edges());

        // And the other way round: a small edge set on a large grid is regrown
        let mut grid = Grid::build(large);
        let mut lines = LineField::build(&small);
        update_grid(&mut grid, &params, &sampler, 0.0);
        update_lines(&mut lines, &grid, params.color_a, params.color_b);
        assert_eq!(lines.len(), LineField::build(&large).len());
        for (edge, pair) in lines.edges().iter().zip(lines.vertices().chunks_exact(2)) {
            assert_eq!(pair[0].position, grid.positions()[edge[0] as usize]);
        }
    }

    #[test]
    fn test_lines_mirror_grid() {
        let layout = GridLayout::new(3.0, 3.0, 1.0).unwrap();
        let mut grid = Grid::build(layout);
        let mut lines = LineField::build(&layout);
        let params = FieldParams::default();
        let sampler = ConstSampler { a: 0.5, b: 0.0, color: 1.0 };
        update_grid(&mut grid, &params, &sampler, 0.0);
        update_lines(&mut lines, &grid, params.color_a, params.color_b);

        let expected_color = params.color_b.to_array();
        for (edge, pair) in lines.edges().iter().zip(lines.vertices().chunks_exact(2)) {
            assert_eq!(pair[0].position, grid.positions()[edge[0] as usize]);
            assert_eq!(pair[1].position, grid.positions()[edge[1] as usize]);
            // Every ratio is 1.0, so every edge is pure color B
            for v in pair {
                for ch in 0..3 {
                    assert!((v.color[ch] - expected_color[ch]).abs() < 1e-6);
                }
            }
            assert_eq!(pair[0].position[2], 0.375);
        }
    }
}
