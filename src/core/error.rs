//! Error types for the wavefield crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("parameter {name} expects a {expected} value")]
    ParameterType {
        name: &'static str,
        expected: &'static str,
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("degenerate grid: area {width}x{height}, spacing {spacing}")]
    DegenerateGrid {
        width: f32,
        height: f32,
        spacing: f32,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
