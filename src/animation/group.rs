use std::time::Duration;

use crate::{
    animation::{ease::Ease, lerp::Lerp},
    foundation::error::{RevealError, RevealResult},
    geometry::ring::RingPath,
};

/// One interpolated property: `from` at the start of the animation, `to` at the end.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PropertyAnimation<T> {
    /// Property name, for diagnostics.
    pub key: &'static str,
    /// Value at `t = 0`.
    pub from: T,
    /// Value at `t = 1`.
    pub to: T,
}

impl<T> PropertyAnimation<T>
where
    T: Lerp + Clone,
{
    /// Animate `key` from `from` to `to`.
    pub fn new(key: &'static str, from: T, to: T) -> Self {
        Self { key, from, to }
    }

    /// Value at eased progress `t`.
    pub fn sample(&self, t: f64) -> T {
        if t <= 0.0 {
            return self.from.clone();
        }
        if t >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, t)
    }
}

/// How an animation group ended. Reported exactly once per group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationStop {
    /// `true` when the full duration elapsed, `false` when cancelled.
    pub finished: bool,
}

/// Interpolated values of the ring at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSample {
    /// Ring geometry.
    pub path: RingPath,
    /// Stroke width.
    pub line_width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Status {
    Running,
    Stopped(AnimationStop),
}

/// Path and stroke width animated in lock-step: shared duration, shared easing.
#[derive(Clone, Debug)]
pub struct AnimationGroup {
    path: PropertyAnimation<RingPath>,
    line_width: PropertyAnimation<f64>,
    duration: Duration,
    ease: Ease,
    elapsed: Duration,
    status: Status,
}

impl AnimationGroup {
    /// Build a running group. `duration` must be non-zero.
    pub fn new(
        path: PropertyAnimation<RingPath>,
        line_width: PropertyAnimation<f64>,
        duration: Duration,
        ease: Ease,
    ) -> RevealResult<Self> {
        if duration.is_zero() {
            return Err(RevealError::validation("animation duration must be > 0"));
        }
        Ok(Self {
            path,
            line_width,
            duration,
            ease,
            elapsed: Duration::ZERO,
            status: Status::Running,
        })
    }

    /// Path property.
    pub fn path(&self) -> &PropertyAnimation<RingPath> {
        &self.path
    }

    /// Stroke width property.
    pub fn line_width(&self) -> &PropertyAnimation<f64> {
        &self.line_width
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Timing curve applied to both properties.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Time advanced so far (saturates at `duration`).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Return `true` until the group finishes or is cancelled.
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// How the group ended, if it has.
    pub fn stop(&self) -> Option<AnimationStop> {
        match self.status {
            Status::Running => None,
            Status::Stopped(stop) => Some(stop),
        }
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    pub fn linear_progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Values on screen now. Once stopped, the target values.
    pub fn sample(&self) -> GroupSample {
        match self.status {
            Status::Running => self.sample_at(self.elapsed),
            Status::Stopped(_) => self.sample_at(self.duration),
        }
    }

    /// Values at an arbitrary offset from the start.
    pub fn sample_at(&self, elapsed: Duration) -> GroupSample {
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        let te = self.ease.apply(t);
        GroupSample {
            path: self.path.sample(te),
            line_width: self.line_width.sample(te),
        }
    }

    /// Advance the clock. Returns the stop notification on the call that reaches the end,
    /// `None` on every other call.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationStop> {
        if self.status != Status::Running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.elapsed < self.duration {
            return None;
        }
        let stop = AnimationStop { finished: true };
        self.status = Status::Stopped(stop);
        Some(stop)
    }

    /// Stop early. Returns the stop notification unless the group already stopped.
    pub fn cancel(&mut self) -> Option<AnimationStop> {
        if self.status != Status::Running {
            return None;
        }
        let stop = AnimationStop { finished: false };
        self.status = Status::Stopped(stop);
        Some(stop)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/group.rs"]
mod tests;
