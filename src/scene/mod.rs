//! Scene randomization and scheduling

pub mod config;
pub mod director;
pub mod timer;

pub use config::{SceneConfig, SceneSchedule};
pub use director::{DirectorState, Scene, SceneDirector};
pub use timer::SceneTimer;
