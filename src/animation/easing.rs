//! Exponential easing toward target values.
//!
//! Every parameter whose kind is [`ParamKind::Eased`] gets one [`Eased`]
//! entry in an [`EaseSet`]. Scene changes write targets; each tick moves the
//! current values a fixed fraction of the remaining distance.

use serde::{Deserialize, Serialize};

use crate::params::{EaseGroup, FieldParams, ParamId, ParamKind, PARAM_SPECS};

/// Move `current` toward `target` by `rate` of the remaining distance.
///
/// The step is at least `floor` (a minimum speed) but never more than the
/// remaining distance, so the result never overshoots. With `floor == 0.0`
/// this is exactly `current + (target - current) * rate`.
#[inline]
pub fn ease(current: f32, target: f32, rate: f32, floor: f32) -> f32 {
    let diff = target - current;
    if diff == 0.0 || !diff.is_finite() {
        return if diff.is_finite() { current } else { target };
    }
    let rate = rate.clamp(0.0, 1.0);
    if floor <= 0.0 {
        return current + diff * rate;
    }
    let step = (diff.abs() * rate).max(floor).min(diff.abs());
    current + diff.signum() * step
}

/// Per-group easing rates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingConfig {
    /// Fraction per tick for particle size.
    pub particle_rate: f32,
    /// Fraction per tick for camera position and FOV.
    pub camera_rate: f32,
    /// Minimum step per tick (0 = pure exponential).
    pub floor: f32,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self {
            particle_rate: 0.025,
            camera_rate: 0.0025,
            floor: 0.0,
        }
    }
}

impl EasingConfig {
    /// Rate for the given group
    pub fn rate(&self, group: EaseGroup) -> f32 {
        match group {
            EaseGroup::Particle => self.particle_rate,
            EaseGroup::Camera => self.camera_rate,
        }
    }
}

/// A value that approaches its target a little every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eased {
    pub current: f32,
    pub target: f32,
    pub rate: f32,
    pub floor: f32,
}

impl Eased {
    /// Start settled at `value`.
    pub fn new(value: f32, rate: f32, floor: f32) -> Self {
        Self {
            current: value,
            target: value,
            rate,
            floor,
        }
    }

    /// Advance one tick and return the new current value.
    #[inline]
    pub fn step(&mut self) -> f32 {
        self.current = ease(self.current, self.target, self.rate, self.floor);
        self.current
    }

    /// Set current and target together (no transition).
    pub fn jump(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Whether current is within `epsilon` of target.
    #[inline]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.current).abs() <= epsilon
    }
}

/// Eased entries for every parameter of kind [`ParamKind::Eased`].
#[derive(Clone, Debug)]
pub struct EaseSet {
    entries: Vec<(ParamId, Eased)>,
}

impl EaseSet {
    /// Build from the current parameter values; every entry starts settled.
    pub fn new(params: &FieldParams, config: &EasingConfig) -> Self {
        let entries = PARAM_SPECS
            .iter()
            .filter_map(|spec| match spec.kind {
                ParamKind::Eased(group) => {
                    let value = params.number(spec.id)?;
                    Some((spec.id, Eased::new(value, config.rate(group), config.floor)))
                }
                _ => None,
            })
            .collect();
        Self { entries }
    }

    fn entry_mut(&mut self, id: ParamId) -> Option<&mut Eased> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, e)| e)
    }

    /// Entry for `id`, if it is eased
    pub fn get(&self, id: ParamId) -> Option<&Eased> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, e)| e)
    }

    /// Target value for `id`, if it is eased
    pub fn target(&self, id: ParamId) -> Option<f32> {
        self.get(id).map(|e| e.target)
    }

    /// Set a new target (clamped to the parameter range). Returns false if
    /// `id` is not an eased parameter.
    pub fn set_target(&mut self, id: ParamId, value: f32) -> bool {
        let clamped = id.spec().clamp(value);
        match self.entry_mut(id) {
            Some(e) => {
                e.target = clamped;
                true
            }
            None => false,
        }
    }

    /// Move both current and target to `value` (clamped).
    pub fn jump(&mut self, id: ParamId, value: f32) -> bool {
        let clamped = id.spec().clamp(value);
        match self.entry_mut(id) {
            Some(e) => {
                e.jump(clamped);
                true
            }
            None => false,
        }
    }

    /// Apply new rates from config, keeping current/target values.
    pub fn set_rates(&mut self, config: &EasingConfig) {
        for (id, e) in &mut self.entries {
            if let ParamKind::Eased(group) = id.spec().kind {
                e.rate = config.rate(group);
                e.floor = config.floor;
            }
        }
    }

    /// Advance every entry one tick and write the current values to `params`.
    pub fn step(&mut self, params: &mut FieldParams) {
        for (id, e) in &mut self.entries {
            let value = id.spec().clamp(e.step());
            if let Some(slot) = params.number_mut(*id) {
                *slot = value;
            }
        }
    }

    /// Whether every entry is within `epsilon` of its target.
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.entries.iter().all(|(_, e)| e.is_settled(epsilon))
    }

    /// Parameters managed by this set
    pub fn ids(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_is_convex_step() {
        assert_eq!(ease(0.0, 10.0, 0.1, 0.0), 1.0);
        assert_eq!(ease(10.0, 0.0, 0.5, 0.0), 5.0);
        assert_eq!(ease(3.0, 3.0, 0.5, 0.0), 3.0);
        assert_eq!(ease(0.0, 10.0, 1.0, 0.0), 10.0);
    }

    #[test]
    fn test_ease_converges_monotonically_without_overshoot() {
        for &rate in &[0.0025f32, 0.025, 0.3, 0.9, 1.0] {
            for &(start, target) in &[(0.0f32, 10.0f32), (5.0, -7.0), (-20.0, 20.0)] {
                let mut current = start;
                let mut prev_dist = (target - start).abs();
                for _ in 0..20_000 {
                    current = ease(current, target, rate, 0.0);
                    let dist = (target - current).abs();
                    assert!(dist <= prev_dist, "rate {rate}: distance grew");
                    // Never crosses to the other side of the target
                    assert!((target - current) * (target - start) >= 0.0);
                    prev_dist = dist;
                }
                assert!(prev_dist < 1e-3, "rate {rate} did not converge: {prev_dist}");
            }
        }
    }

    #[test]
    fn test_floor_sets_minimum_step() {
        // 1% of 1.0 is 0.01, below the floor of 0.1
        assert!((ease(0.0, 1.0, 0.01, 0.1) - 0.1).abs() < 1e-6);
        // Floor larger than remaining distance snaps to target
        assert_eq!(ease(0.95, 1.0, 0.01, 0.1), 1.0);
        assert!((ease(1.0, 0.0, 0.01, 0.1) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(ease(0.0, 1.0, 5.0, 0.0), 1.0);
        assert_eq!(ease(0.0, 1.0, -1.0, 0.0), 0.0);
    }

    #[test]
    fn test_ease_set_covers_eased_params() {
        let set = EaseSet::new(&FieldParams::default(), &EasingConfig::default());
        let ids: Vec<ParamId> = set.ids().collect();
        assert_eq!(
            ids,
            vec![ParamId::ParticleSize, ParamId::CamX, ParamId::CamY, ParamId::CamZ, ParamId::CamFov]
        );
        assert_eq!(set.get(ParamId::ParticleSize).unwrap().rate, 0.025);
        assert_eq!(set.get(ParamId::CamFov).unwrap().rate, 0.0025);
        assert!(set.get(ParamId::ParticleSpacing).is_none());
        assert!(set.is_settled(0.0));
    }

    #[test]
    fn test_ease_set_moves_params_toward_targets() {
        let mut params = FieldParams::default();
        let mut set = EaseSet::new(&params, &EasingConfig::default());
        assert!(set.set_target(ParamId::ParticleSize, 2.0));
        assert!(!set.set_target(ParamId::NoiseALevel, 1.0));

        set.step(&mut params);
        assert!((params.particle_size - 1.025).abs() < 1e-6);

        for _ in 0..2000 {
            set.step(&mut params);
        }
        assert!((params.particle_size - 2.0).abs() < 1e-4);
        assert!(params.particle_size <= 2.0);
    }

    #[test]
    fn test_targets_are_clamped() {
        let params = FieldParams::default();
        let mut set = EaseSet::new(&params, &EasingConfig::default());
        set.set_target(ParamId::CamX, 1000.0);
        assert_eq!(set.target(ParamId::CamX), Some(20.0));
        set.jump(ParamId::CamFov, -5.0);
        let e = set.get(ParamId::CamFov).unwrap();
        assert_eq!((e.current, e.target), (0.0, 0.0));
    }

    #[test]
    fn test_set_rates_updates_entries() {
        let params = FieldParams::default();
        let mut set = EaseSet::new(&params, &EasingConfig::default());
        set.set_rates(&EasingConfig {
            particle_rate: 0.5,
            camera_rate: 0.25,
            floor: 0.01,
        });
        assert_eq!(set.get(ParamId::ParticleSize).unwrap().rate, 0.5);
        assert_eq!(set.get(ParamId::CamY).unwrap().rate, 0.25);
        assert_eq!(set.get(ParamId::CamY).unwrap().floor, 0.01);
    }
}
