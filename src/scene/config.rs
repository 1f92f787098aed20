//! Scene scheduling configuration

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default lower bound of the delay between scenes, in milliseconds
pub const DEFAULT_MIN_DELAY_MS: f64 = 3000.0;
/// Default upper bound of the delay between scenes, in milliseconds
pub const DEFAULT_MAX_DELAY_MS: f64 = 10000.0;

/// When scenes are drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SceneSchedule {
    /// A new scene after a uniform random delay, forever
    Recurring { min_delay_ms: f64, max_delay_ms: f64 },
    /// One scene at startup, then nothing
    Once,
    /// Only explicit `randomize_scene()` calls
    Manual,
}

impl Default for SceneSchedule {
    fn default() -> Self {
        SceneSchedule::Recurring {
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl SceneSchedule {
    /// Delay before the next scene, or `None` when the schedule does not recur.
    ///
    /// Reversed or negative bounds are normalized rather than rejected.
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        match *self {
            SceneSchedule::Recurring {
                min_delay_ms,
                max_delay_ms,
            } => {
                let lo = min_delay_ms.min(max_delay_ms).max(0.0);
                let hi = min_delay_ms.max(max_delay_ms).max(0.0);
                if !(lo.is_finite() && hi.is_finite()) {
                    return Some(DEFAULT_MIN_DELAY_MS);
                }
                if lo == hi {
                    Some(lo)
                } else {
                    Some(rng.gen_range(lo..=hi))
                }
            }
            SceneSchedule::Once | SceneSchedule::Manual => None,
        }
    }
}

/// Scene settings loaded with the field configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub schedule: SceneSchedule,
}
