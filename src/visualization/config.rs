//! Startup configuration for a field visualization

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::EasingConfig;
use crate::core::Result;
use crate::params::FieldParams;
use crate::scene::SceneConfig;

/// Everything needed to initialize a [`FieldVisualization`](super::FieldVisualization).
///
/// Every section is optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for the noise layers and the scene RNG. `None` draws one at startup.
    pub seed: Option<u32>,
    pub scene: SceneConfig,
    pub easing: EasingConfig,
    /// Initial parameter values
    pub params: FieldParams,
}

impl FieldConfig {
    /// Parse from JSON. Parameter values are clamped into range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: FieldConfig = serde_json::from_str(json)?;
        config.params.clamp_all();
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded field config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Drawable surface size in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width over height, or `None` for a degenerate viewport
    pub fn aspect(&self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::params::Rgb;
    use crate::scene::SceneSchedule;

    #[test]
    fn test_empty_json_is_default() {
        let config = FieldConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FieldConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_loaded_params_are_clamped() {
        let config = FieldConfig::from_json_str(
            r#"{"seed": 9, "params": {"particle_spacing": 0.01, "cam_z": 400}}"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.params.particle_spacing, 0.25);
        assert_eq!(config.params.cam_z, 20.0);
    }

    #[test]
    fn test_bad_input_is_config_error() {
        assert!(matches!(FieldConfig::from_json_str("{ nope"), Err(Error::Config(_))));
        assert!(matches!(
            FieldConfig::from_json_str(r##"{"params": {"color_a": "#zzzzzz"}}"##),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.json");

        let mut config = FieldConfig {
            seed: Some(1234),
            ..Default::default()
        };
        config.scene.schedule = SceneSchedule::Once;
        config.easing.camera_rate = 0.01;
        config.params.color_b = Rgb::new(10, 20, 30);
        config.params.lines_enabled = true;
        config.save(&path).unwrap();

        let loaded = FieldConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FieldConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(200.0, 100.0).aspect(), Some(2.0));
        assert_eq!(Viewport::new(0.0, 100.0).aspect(), None);
        assert_eq!(Viewport::new(100.0, f32::NAN).aspect(), None);
    }
}
