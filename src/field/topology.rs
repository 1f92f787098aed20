//! Edge list connecting neighbouring lattice vertices.

use crate::field::grid::GridLayout;

/// Line vertex uploaded to the renderer: two per edge.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Build the edge list for a `cols` x `rows` staggered lattice.
///
/// Each vertex, visited row-major, emits up to three edges in this order:
/// right `(c+1, r)`, down `(c, r+1)`, and a diagonal that follows the
/// stagger: `(c+1, r+1)` on odd rows, `(c-1, r+1)` on even rows. Any
/// neighbour outside the grid is dropped.
pub fn build_edges(cols: u32, rows: u32) -> Vec<[u32; 2]> {
    let mut edges = Vec::with_capacity(cols as usize * rows as usize * 3);
    let index = |c: u32, r: u32| c + r * cols;

    for row in 0..rows {
        for col in 0..cols {
            let from = index(col, row);

            let diagonal_col = if row % 2 == 1 {
                col.checked_add(1)
            } else {
                col.checked_sub(1)
            };
            let candidates = [
                (col.checked_add(1), Some(row)),
                (Some(col), row.checked_add(1)),
                (diagonal_col, row.checked_add(1)),
            ];

            for (c, r) in candidates {
                if let (Some(c), Some(r)) = (c, r) {
                    if c < cols && r < rows {
                        edges.push([from, index(c, r)]);
                    }
                }
            }
        }
    }

    edges
}

/// Line geometry that mirrors the grid: edge indices plus vertex buffer.
#[derive(Clone, Debug, Default)]
pub struct LineField {
    cols: u32,
    rows: u32,
    edges: Vec<[u32; 2]>,
    vertices: Vec<LineVertex>,
}

impl LineField {
    /// Build edges for `layout`. Positions and colors are filled by the updater.
    pub fn build(layout: &GridLayout) -> Self {
        let edges = build_edges(layout.cols, layout.rows);
        let vertices = vec![LineVertex::default(); edges.len() * 2];
        Self {
            cols: layout.cols,
            rows: layout.rows,
            edges,
            vertices,
        }
    }

    /// Whether these edges index a lattice of the same size as `layout`
    #[inline]
    pub fn matches(&self, layout: &GridLayout) -> bool {
        self.cols == layout.cols && self.rows == layout.rows
    }

    /// Edge index pairs in build order
    #[inline]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Two vertices per edge, in edge order
    #[inline]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Vertex buffer as raw bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub(crate) fn parts_mut(&mut self) -> (&[[u32; 2]], &mut [LineVertex]) {
        (&self.edges, &mut self.vertices)
    }
}
