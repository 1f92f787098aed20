//! One-shot deadline timer driven by the frame clock.

/// Holds at most one pending deadline, in elapsed milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneTimer {
    deadline: Option<f64>,
}

impl SceneTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `delay_ms` after `now_ms`. Replaces any pending deadline.
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline = Some(now_ms + delay_ms.max(0.0));
    }

    /// Returns true once when the deadline has passed, then disarms.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}
