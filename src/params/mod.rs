//! Field parameters: the static bounds table and the live value set.
//!
//! [`PARAM_SPECS`] describes every control an external panel can bind to;
//! [`FieldParams`] holds the current values. Named access goes through
//! [`ParamId`], so no reflection is involved.

pub mod color;
pub mod spec;
pub mod values;

pub use color::{Lerp, Rgb};
pub use spec::{EaseGroup, ParamId, ParamKind, ParamRange, ParamSpec, ParamValue, PARAM_SPECS};
pub use values::FieldParams;
