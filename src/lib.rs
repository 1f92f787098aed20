//! Wavefield - a procedural particle field driven by layered simplex noise
//!
//! A staggered lattice of particles is displaced every frame by two noise
//! layers and colored by a third. Camera pose and particle size ease toward
//! randomized targets, and a scene director periodically draws new scenes.
//! Rendering is left to the host: [`FieldVisualization::frame`] exposes the
//! buffers and render state as borrowed slices.

pub mod core;
pub mod params;
pub mod field;
pub mod animation;
pub mod scene;
pub mod visualization;

pub use crate::core::{Error, Result};
pub use crate::params::{FieldParams, ParamId, ParamValue, Rgb};
pub use crate::visualization::{FieldConfig, FieldVisualization, FrameView, Viewport};
