//! Random scene generation and scheduling

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::{ParamId, ParamRange, ParamValue, Rgb, PARAM_SPECS};
use crate::scene::config::SceneSchedule;
use crate::scene::timer::SceneTimer;

/// Ordered parameter assignments drawn by [`SceneDirector::randomize`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub assignments: Vec<(ParamId, ParamValue)>,
}

impl Scene {
    /// Assigned value for `id`, if the scene touches it
    pub fn get(&self, id: ParamId) -> Option<ParamValue> {
        self.assignments
            .iter()
            .find(|(assigned, _)| *assigned == id)
            .map(|(_, v)| *v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Director lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectorState {
    /// Waiting for the timer or a manual request
    Idle,
    /// A scene has been drawn and is being applied
    Randomizing,
    /// No further scenes will be scheduled
    Finished,
}

/// Draws scenes and decides when the next one is due.
#[derive(Debug)]
pub struct SceneDirector {
    rng: StdRng,
    schedule: SceneSchedule,
    timer: SceneTimer,
    state: DirectorState,
    scenes_played: u64,
}

impl SceneDirector {
    /// Create a director. `seed = None` seeds from OS entropy.
    pub fn new(schedule: SceneSchedule, seed: Option<u32>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed as u64),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            schedule,
            timer: SceneTimer::new(),
            state: DirectorState::Idle,
            scenes_played: 0,
        }
    }

    /// Arm the first deadline. `Recurring` and `Once` both play a scene on
    /// the next poll; the random delay starts after that scene completes.
    pub fn start(&mut self, now_ms: f64) {
        self.state = DirectorState::Idle;
        match self.schedule {
            SceneSchedule::Recurring { .. } | SceneSchedule::Once => self.timer.arm(now_ms, 0.0),
            SceneSchedule::Manual => self.timer.cancel(),
        }
    }

    fn arm_next(&mut self, now_ms: f64) {
        if let Some(delay) = self.schedule.next_delay(&mut self.rng) {
            log::debug!("Next scene in {:.0} ms", delay);
            self.timer.arm(now_ms, delay);
        }
    }

    /// Draw a scene if the timer has fired.
    ///
    /// The caller applies it and then calls [`complete`](Self::complete).
    pub fn poll(&mut self, now_ms: f64) -> Option<Scene> {
        if self.state == DirectorState::Finished || !self.timer.poll(now_ms) {
            return None;
        }
        Some(self.request())
    }

    /// Draw a scene immediately, outside the schedule.
    pub fn request(&mut self) -> Scene {
        self.state = DirectorState::Randomizing;
        self.randomize()
    }

    /// Mark the drawn scene as applied and schedule the next one.
    ///
    /// In `Recurring` mode this replaces any pending deadline, so manual
    /// requests never stack timers.
    pub fn complete(&mut self, now_ms: f64) {
        if self.state != DirectorState::Randomizing {
            return;
        }
        self.scenes_played += 1;
        match self.schedule {
            SceneSchedule::Recurring { .. } => {
                self.state = DirectorState::Idle;
                self.arm_next(now_ms);
            }
            SceneSchedule::Once => {
                self.state = DirectorState::Finished;
                self.timer.cancel();
            }
            SceneSchedule::Manual => self.state = DirectorState::Idle,
        }
    }

    /// Stop scheduling for good.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.state = DirectorState::Finished;
    }

    /// Draw a uniform value for every randomizable parameter.
    pub fn randomize(&mut self) -> Scene {
        let assignments = PARAM_SPECS
            .iter()
            .filter(|spec| spec.randomized)
            .filter_map(|spec| {
                let value = match spec.range {
                    ParamRange::Number { min, max, .. } => {
                        ParamValue::Number(self.rng.gen_range(min..=max))
                    }
                    ParamRange::Color { .. } => ParamValue::Color(Rgb::new(
                        self.rng.gen_range(0..=255u8),
                        self.rng.gen_range(0..=255u8),
                        self.rng.gen_range(0..=255u8),
                    )),
                    ParamRange::Flag { .. } => return None,
                };
                Some((spec.id, value))
            })
            .collect();
        Scene { assignments }
    }

    #[inline]
    pub fn state(&self) -> DirectorState {
        self.state
    }

    #[inline]
    pub fn schedule(&self) -> SceneSchedule {
        self.schedule
    }

    #[inline]
    pub fn timer(&self) -> &SceneTimer {
        &self.timer
    }

    /// Scenes applied so far
    #[inline]
    pub fn scenes_played(&self) -> u64 {
        self.scenes_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recurring(min: f64, max: f64) -> SceneSchedule {
        SceneSchedule::Recurring {
            min_delay_ms: min,
            max_delay_ms: max,
        }
    }

    #[test]
    fn test_scenes_stay_in_bounds() {
        let mut director = SceneDirector::new(SceneSchedule::Manual, Some(7));
        for _ in 0..500 {
            let scene = director.randomize();
            assert!(!scene.is_empty());
            for (id, value) in &scene.assignments {
                let spec = id.spec();
                assert!(spec.randomized, "{id} should not be randomized");
                if let (Some(v), Some((min, max))) = (value.as_number(), spec.bounds()) {
                    assert!((min..=max).contains(&v), "{id} = {v} outside [{min}, {max}]");
                }
            }
        }
    }

    #[test]
    fn test_scene_covers_randomized_params() {
        let mut director = SceneDirector::new(SceneSchedule::Manual, Some(1));
        let scene = director.randomize();
        let expected = PARAM_SPECS.iter().filter(|s| s.randomized).count();
        assert_eq!(scene.len(), expected);
        assert!(scene.get(ParamId::ColorA).and_then(|v| v.as_color()).is_some());
        assert!(scene.get(ParamId::FogNear).is_none());
        assert!(scene.get(ParamId::LinesEnabled).is_none());
    }

    #[test]
    fn test_same_seed_same_scenes() {
        let mut a = SceneDirector::new(SceneSchedule::Manual, Some(42));
        let mut b = SceneDirector::new(SceneSchedule::Manual, Some(42));
        for _ in 0..5 {
            assert_eq!(a.randomize(), b.randomize());
        }
    }

    #[test]
    fn test_recurring_rearms_without_stacking() {
        let mut director = SceneDirector::new(recurring(100.0, 100.0), Some(3));
        director.start(0.0);
        // Startup scene, then the first random delay
        assert!(director.poll(0.0).is_some());
        director.complete(0.0);
        assert_eq!(director.timer().deadline(), Some(100.0));
        assert!(director.poll(50.0).is_none());
        assert!(director.poll(100.0).is_some());
        assert_eq!(director.state(), DirectorState::Randomizing);
        director.complete(100.0);
        assert_eq!(director.state(), DirectorState::Idle);
        assert_eq!(director.timer().deadline(), Some(200.0));

        // A manual scene at 150 pushes the deadline out instead of adding one
        let _ = director.request();
        director.complete(150.0);
        assert_eq!(director.timer().deadline(), Some(250.0));
        assert!(director.poll(200.0).is_none());
        assert!(director.poll(250.0).is_some());
        director.complete(250.0);
        assert_eq!(director.scenes_played(), 4);
    }

    #[test]
    fn test_recurring_plays_scene_at_startup() {
        let mut director = SceneDirector::new(SceneSchedule::default(), Some(5));
        director.start(0.0);
        assert_eq!(director.timer().deadline(), Some(0.0));
        assert!(director.poll(0.0).is_some());
        director.complete(0.0);
        let next = director.timer().deadline().unwrap();
        assert!((3000.0..=10000.0).contains(&next), "next deadline {next}");
    }

    #[test]
    fn test_once_fires_exactly_once() {
        let mut director = SceneDirector::new(SceneSchedule::Once, Some(3));
        director.start(0.0);
        let mut fired = 0;
        for frame in 0..1000 {
            let now = frame as f64 * 16.0;
            if director.poll(now).is_some() {
                fired += 1;
                director.complete(now);
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(director.state(), DirectorState::Finished);
    }

    #[test]
    fn test_manual_never_fires_on_its_own() {
        let mut director = SceneDirector::new(SceneSchedule::Manual, Some(3));
        director.start(0.0);
        assert!(director.poll(1e9).is_none());
        let _ = director.request();
        director.complete(10.0);
        assert_eq!(director.state(), DirectorState::Idle);
        assert!(!director.timer().is_armed());
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut director = SceneDirector::new(recurring(10.0, 20.0), Some(3));
        director.start(0.0);
        director.cancel();
        assert!(director.poll(0.0).is_none());
        assert!(director.poll(1e6).is_none());
        assert_eq!(director.state(), DirectorState::Finished);
    }
}
