use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::{
    animation::group::{AnimationGroup, AnimationStop, PropertyAnimation},
    foundation::core::{Rect, Rgba8},
    foundation::error::{RevealError, RevealResult},
    geometry::ring::{RingGeometry, RingPath, RingShape},
    host::mask::IndicatorId,
    host::view::{HostView, SharedHost},
    indicator::config::IndicatorConfig,
};

/// Externally visible lifecycle of a [`LoaderIndicator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    /// Accepting progress; ring drawn over the placeholder.
    Loading,
    /// Mask installed on the host and expanding.
    Revealing,
    /// Mask removed. Terminal.
    Revealed,
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Revealing => "revealing",
            Self::Revealed => "revealed",
        })
    }
}

/// What the indicator draws on top of the host while it is still a regular sub-view.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    /// Placeholder fill covering the whole host.
    pub background: Rgba8,
    /// Ring drawn over the fill.
    pub ring: RingShape,
    /// Ring stroke color.
    pub stroke_color: Rgba8,
}

type RevealedCallback = Box<dyn FnOnce(AnimationStop)>;

/// Outcome of a mutable visit to the host.
enum HostAccess<R> {
    Done(R),
    /// Host alive but its `RefCell` is borrowed elsewhere.
    Busy,
    /// Host dropped.
    Gone,
}

enum Phase {
    Loading,
    Revealing {
        model: RingShape,
        animation: AnimationGroup,
        /// Set once the group stopped but the mask could not be cleared yet.
        pending: Option<AnimationStop>,
    },
    Revealed {
        model: RingShape,
        stop: AnimationStop,
    },
}

/// Download-progress ring that turns into an expanding mask once the image is ready.
///
/// The indicator reads its host's bounds and, between [`Self::reveal`] and the end of the
/// reveal animation, owns the host's mask slot. The host is held weakly: a host dropped
/// mid-reveal is simply skipped when the mask would be cleared.
pub struct LoaderIndicator {
    id: IndicatorId,
    host: Weak<RefCell<HostView>>,
    geometry: RingGeometry,
    config: IndicatorConfig,
    reveal_duration: Duration,
    stroke_end: f64,
    phase: Phase,
    on_revealed: Option<RevealedCallback>,
}

impl fmt::Debug for LoaderIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderIndicator")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("stroke_end", &self.stroke_end)
            .finish_non_exhaustive()
    }
}

impl LoaderIndicator {
    /// Attach a new indicator to `host`. The config is validated here.
    pub fn attach(host: &SharedHost, config: IndicatorConfig) -> RevealResult<Self> {
        config.validate()?;
        let geometry = RingGeometry::new(config.style.radius)?;
        let reveal_duration = config.reveal.duration()?;
        let id = IndicatorId::next();
        tracing::debug!(?id, bounds = ?host.borrow().bounds(), "indicator attached");
        Ok(Self {
            id,
            host: Rc::downgrade(host),
            geometry,
            config,
            reveal_duration,
            stroke_end: 0.0,
            phase: Phase::Loading,
            on_revealed: None,
        })
    }

    /// Mask-slot identity of this indicator.
    pub fn id(&self) -> IndicatorId {
        self.id
    }

    /// Configuration in effect.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IndicatorState {
        match self.phase {
            Phase::Loading => IndicatorState::Loading,
            Phase::Revealing { .. } => IndicatorState::Revealing,
            Phase::Revealed { .. } => IndicatorState::Revealed,
        }
    }

    /// Applied drawn fraction of the ring, always in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.stroke_end
    }

    /// Return `true` while the host is alive.
    pub fn host_alive(&self) -> bool {
        self.host.strong_count() > 0
    }

    fn host_bounds(&self) -> Rect {
        match self.host.upgrade() {
            Some(host) => match host.try_borrow() {
                Ok(view) => view.bounds(),
                Err(_) => {
                    tracing::warn!(id = ?self.id, "host is mutably borrowed; using empty bounds");
                    Rect::ZERO
                }
            },
            None => Rect::ZERO,
        }
    }

    fn with_host_mut<R>(&self, f: impl FnOnce(&mut HostView) -> R) -> HostAccess<R> {
        let Some(host) = self.host.upgrade() else {
            return HostAccess::Gone;
        };
        let Ok(mut view) = host.try_borrow_mut() else {
            return HostAccess::Busy;
        };
        HostAccess::Done(f(&mut view))
    }

    fn reject(&self, op: &'static str) -> RevealError {
        let state = self.state();
        tracing::warn!(id = ?self.id, op, %state, "ignored call in wrong state");
        RevealError::invalid_state(op, state)
    }

    /// Ring geometry right now. Derived from the host's current bounds while loading,
    /// frozen once a reveal starts.
    pub fn ring_path(&self) -> RingPath {
        match &self.phase {
            Phase::Loading => self.geometry.base_path(self.host_bounds()),
            Phase::Revealing { model, .. } | Phase::Revealed { model, .. } => model.path,
        }
    }

    /// Applied (model) values: during a reveal these are already the targets.
    pub fn model_shape(&self) -> RingShape {
        match &self.phase {
            Phase::Loading => RingShape {
                path: self.geometry.base_path(self.host_bounds()),
                line_width: self.config.style.line_width,
                stroke_end: self.stroke_end,
            },
            Phase::Revealing { model, .. } | Phase::Revealed { model, .. } => model.clone(),
        }
    }

    /// What is on screen: the interpolated values while the reveal animation runs.
    pub fn presentation_shape(&self) -> RingShape {
        match &self.phase {
            Phase::Revealing { animation, .. } => {
                let sample = animation.sample();
                RingShape {
                    path: sample.path,
                    line_width: sample.line_width,
                    stroke_end: self.stroke_end,
                }
            }
            _ => self.model_shape(),
        }
    }

    /// The running reveal animation, if any.
    pub fn reveal_animation(&self) -> Option<&AnimationGroup> {
        match &self.phase {
            Phase::Revealing { animation, .. } => Some(animation),
            _ => None,
        }
    }

    /// Placeholder and ring drawn over the host. `None` once the reveal began: the ring
    /// has become the host's mask and the placeholder is cleared.
    pub fn overlay(&self) -> Option<Overlay> {
        match self.phase {
            Phase::Loading => Some(Overlay {
                background: self.config.style.background,
                ring: self.model_shape(),
                stroke_color: self.config.style.stroke_color,
            }),
            _ => None,
        }
    }

    /// Register a listener called once when the indicator reaches
    /// [`IndicatorState::Revealed`]. Runs immediately if it already has.
    pub fn on_revealed(&mut self, callback: impl FnOnce(AnimationStop) + 'static) {
        if let Phase::Revealed { stop, .. } = self.phase {
            callback(stop);
            return;
        }
        self.on_revealed = Some(Box::new(callback));
    }

    /// Apply a drawn fraction directly. Out-of-range values saturate; NaN is ignored.
    pub fn set_fraction(&mut self, fraction: f64) -> RevealResult<()> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(self.reject("set_fraction"));
        }
        if fraction.is_nan() {
            tracing::debug!(id = ?self.id, "ignoring NaN progress");
            return Ok(());
        }
        self.stroke_end = fraction.clamp(0.0, 1.0);
        Ok(())
    }

    /// Apply a `(received, expected)` byte-count pair.
    ///
    /// `expected <= 0` means the total is unknown: progress is left as it is. The ratio of
    /// the latest call wins; no smoothing.
    pub fn set_progress(&mut self, received: i64, expected: i64) -> RevealResult<()> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(self.reject("set_progress"));
        }
        if expected <= 0 {
            tracing::debug!(id = ?self.id, received, expected, "unknown total; progress unchanged");
            return Ok(());
        }
        self.set_fraction(received as f64 / expected as f64)
    }

    /// Turn the ring into the host's mask and start expanding it.
    ///
    /// Only valid while loading. Any other state returns
    /// [`RevealError::InvalidState`] and changes nothing. A host that is borrowed elsewhere
    /// returns [`RevealError::Mask`], also without a state change, so the call can be retried.
    #[tracing::instrument(skip(self), fields(id = ?self.id))]
    pub fn reveal(&mut self) -> RevealResult<()> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(self.reject("reveal"));
        }

        let bounds = self.host_bounds();
        let from_path = self.geometry.base_path(bounds);
        let from_width = self.config.style.line_width;

        let expanded = self.geometry.expanded_path(bounds);
        let to_path = expanded.path();
        let to_width = expanded.target_line_width();

        let animation = AnimationGroup::new(
            PropertyAnimation::new("path", from_path, to_path),
            PropertyAnimation::new("lineWidth", from_width, to_width),
            self.reveal_duration,
            self.config.reveal.ease,
        )?;

        // Complete ring before it starts to grow.
        let mask_shape = RingShape {
            path: from_path,
            line_width: from_width,
            stroke_end: 1.0,
        };

        // Model values jump to the targets; the group interpolates the on-screen values
        // from the snapshot.
        let model = RingShape {
            path: to_path,
            line_width: to_width,
            stroke_end: 1.0,
        };

        let id = self.id;
        let host_alive = match self.with_host_mut(|host| host.mask_mut().install(id, mask_shape)) {
            HostAccess::Done(installed) => {
                installed?;
                true
            }
            HostAccess::Busy => {
                tracing::warn!(?id, "host is borrowed; reveal not started");
                return Err(RevealError::mask("host is borrowed elsewhere"));
            }
            HostAccess::Gone => false,
        };

        self.stroke_end = 1.0;
        self.phase = Phase::Revealing {
            model,
            animation,
            pending: None,
        };
        if !host_alive {
            tracing::warn!(?id, "host dropped before reveal; settling without a mask");
            self.animation_did_stop(false);
            return Ok(());
        }

        tracing::debug!(
            final_radius = expanded.final_radius(),
            to_width,
            duration_secs = self.reveal_duration.as_secs_f64(),
            "reveal started"
        );
        Ok(())
    }

    /// Drive the reveal animation by `dt`. Returns the stop notification on the step that
    /// ends it. Outside a reveal this does nothing. A mask clear deferred by a busy host is
    /// retried here.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationStop> {
        let Phase::Revealing {
            animation, pending, ..
        } = &mut self.phase
        else {
            return None;
        };
        if let Some(deferred) = *pending {
            self.animation_did_stop(deferred.finished);
            return None;
        }
        let stop = animation.advance(dt);
        if stop.is_none() {
            let shape = self.presentation_shape();
            let id = self.id;
            match self.with_host_mut(|host| host.mask_mut().update(id, shape)) {
                HostAccess::Done(Ok(())) | HostAccess::Gone => {}
                HostAccess::Done(Err(e)) => {
                    tracing::debug!(?id, error = %e, "mask update skipped");
                }
                HostAccess::Busy => tracing::debug!(?id, "host borrowed; mask update skipped"),
            }
        }
        if let Some(stop) = stop {
            self.animation_did_stop(stop.finished);
        }
        stop
    }

    /// Stop a running reveal early. Completion still runs, so the host ends up unmasked.
    pub fn interrupt(&mut self) -> bool {
        let Phase::Revealing { animation, .. } = &mut self.phase else {
            return false;
        };
        let stopped = animation.cancel().is_some();
        self.animation_did_stop(false);
        stopped
    }

    /// Completion of the reveal animation: clears the host's mask and settles in
    /// [`IndicatorState::Revealed`].
    ///
    /// Safe to call any number of times; only the first call during a reveal that reaches the
    /// host has an effect. While the host is borrowed elsewhere the clear is deferred and the
    /// indicator stays [`IndicatorState::Revealing`]; the next `advance`, `interrupt`,
    /// completion or drop retries it. The `finished` flag of the first call is kept.
    pub fn animation_did_stop(&mut self, finished: bool) {
        let Phase::Revealing { pending, .. } = &mut self.phase else {
            tracing::debug!(id = ?self.id, state = %self.state(), "ignoring stray completion");
            return;
        };
        let stop = *pending.get_or_insert(AnimationStop { finished });

        let id = self.id;
        match self.with_host_mut(|host| {
            if host.mask().get().is_some_and(|m| m.owner == id) {
                host.mask_mut().clear(id)
            } else {
                Ok(())
            }
        }) {
            HostAccess::Done(Ok(())) => {
                tracing::debug!(?id, finished = stop.finished, "mask cleared");
            }
            HostAccess::Done(Err(e)) => tracing::warn!(?id, error = %e, "mask clear failed"),
            HostAccess::Gone => tracing::debug!(?id, "host gone; no mask to clear"),
            HostAccess::Busy => {
                tracing::warn!(?id, "host is borrowed; mask clear deferred");
                return;
            }
        }

        let phase = std::mem::replace(&mut self.phase, Phase::Loading);
        let Phase::Revealing { model, .. } = phase else {
            self.phase = phase;
            return;
        };
        self.phase = Phase::Revealed { model, stop };
        if let Some(callback) = self.on_revealed.take() {
            callback(stop);
        }
    }
}

impl Drop for LoaderIndicator {
    fn drop(&mut self) {
        if matches!(self.phase, Phase::Revealing { .. }) {
            self.animation_did_stop(false);
            if matches!(self.phase, Phase::Revealing { .. }) {
                tracing::error!(
                    id = ?self.id,
                    "dropped while host is borrowed; mask left installed"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/loader.rs"]
mod tests;
