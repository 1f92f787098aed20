//! Parameter easing

pub mod easing;

pub use easing::{ease, EaseSet, Eased, EasingConfig};
