//! Procedural particle field: noise layers, lattice, edges and the
//! per-frame update that ties them together.

pub mod grid;
pub mod noise;
pub mod topology;
pub mod updater;

pub use grid::{Grid, GridLayout};
pub use noise::{FieldSampler, NoiseField, NoiseLayer};
pub use topology::{build_edges, LineField, LineVertex};
pub use updater::{update_grid, update_lines, FieldInputs};
