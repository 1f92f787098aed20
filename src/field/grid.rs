//! Staggered particle lattice.
//!
//! Vertices are stored row-major (`index = col + row * cols`). Odd rows are
//! shifted right by half the spacing, giving a hex-like pattern. Planar
//! positions are fixed at build time; `z` and the color ratio are rewritten
//! every frame by [`super::updater`].

use crate::core::{Error, Result};

/// Color ratio given to freshly built vertices.
pub const INITIAL_COLOR_RATIO: f32 = 0.5;

/// Grid dimensions derived from area and spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub area_w: f32,
    pub area_h: f32,
    pub spacing: f32,
    pub cols: u32,
    pub rows: u32,
}

impl GridLayout {
    /// Validate inputs and compute `cols = ceil(w / s)`, `rows = ceil(h / s)`.
    pub fn new(area_w: f32, area_h: f32, spacing: f32) -> Result<Self> {
        let degenerate = || Error::DegenerateGrid {
            width: area_w,
            height: area_h,
            spacing,
        };
        if !(area_w.is_finite() && area_h.is_finite() && spacing.is_finite()) {
            return Err(degenerate());
        }
        if area_w <= 0.0 || area_h <= 0.0 || spacing <= 0.0 {
            return Err(degenerate());
        }

        let cols = (area_w / spacing).ceil();
        let rows = (area_h / spacing).ceil();
        if cols * rows > u32::MAX as f32 {
            return Err(degenerate());
        }

        Ok(Self {
            area_w,
            area_h,
            spacing,
            cols: cols as u32,
            rows: rows as u32,
        })
    }

    /// Total vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Row-major index of `(col, row)`
    #[inline]
    pub fn index(&self, col: u32, row: u32) -> u32 {
        col + row * self.cols
    }

    /// Rest position of `(col, row)` on the XY plane
    #[inline]
    pub fn position(&self, col: u32, row: u32) -> [f32; 3] {
        let stagger = (row % 2) as f32 * (self.spacing / 2.0);
        [
            -self.area_w / 2.0 + col as f32 * self.spacing + stagger,
            -self.area_h / 2.0 + row as f32 * self.spacing,
            0.0,
        ]
    }
}

/// Owned vertex buffers for the particle lattice.
#[derive(Clone, Debug)]
pub struct Grid {
    layout: GridLayout,
    positions: Vec<[f32; 3]>,
    color_ratios: Vec<f32>,
}

impl Grid {
    /// Build the lattice. Every vertex starts at `z = 0`.
    pub fn build(layout: GridLayout) -> Self {
        let count = layout.vertex_count();
        let mut positions = Vec::with_capacity(count);
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                positions.push(layout.position(col, row));
            }
        }

        Self {
            layout,
            positions,
            color_ratios: vec![INITIAL_COLOR_RATIO; count],
        }
    }

    /// Empty grid used before initialization and after disposal.
    pub fn empty() -> Self {
        Self {
            layout: GridLayout {
                area_w: 0.0,
                area_h: 0.0,
                spacing: 0.0,
                cols: 0,
                rows: 0,
            },
            positions: Vec::new(),
            color_ratios: Vec::new(),
        }
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex positions `[x, y, z]`
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex color ratios in `[0, 1]`, parallel to [`positions`](Self::positions)
    #[inline]
    pub fn color_ratios(&self) -> &[f32] {
        &self.color_ratios
    }

    /// Position buffer as raw bytes for upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color ratio buffer as raw bytes for upload
    pub fn color_ratio_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_ratios)
    }

    /// Both buffers, mutably, for the per-frame update.
    pub(crate) fn buffers_mut(&mut self) -> (&mut [[f32; 3]], &mut [f32]) {
        (&mut self.positions, &mut self.color_ratios)
    }

    /// Release the buffers. Calling this twice is a no-op.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}
