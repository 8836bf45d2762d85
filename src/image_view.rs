use std::time::Duration;

use crate::{
    animation::group::AnimationStop,
    foundation::core::Rect,
    foundation::error::RevealResult,
    host::view::{HostView, SharedHost},
    indicator::config::IndicatorConfig,
    indicator::loader::LoaderIndicator,
};

/// Notification from the image fetcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchEvent {
    /// Bytes received so far out of the expected total (`<= 0` when unknown).
    Progress {
        /// Bytes received so far.
        received: i64,
        /// Expected total, `<= 0` when the server did not announce one.
        expected: i64,
    },
    /// The fetch ended.
    Complete {
        /// `true` when the image decoded successfully.
        success: bool,
    },
}

/// Image placeholder carrying a [`LoaderIndicator`] sized to its bounds.
///
/// Forwards fetch events to the indicator and starts the reveal when the image arrives.
pub struct LoadingImageView {
    // Dropped before `host` so an in-flight reveal can still unmask it.
    indicator: LoaderIndicator,
    host: SharedHost,
    failed: bool,
}

impl LoadingImageView {
    /// New view with the given bounds.
    pub fn new(bounds: Rect, config: IndicatorConfig) -> RevealResult<Self> {
        let host = HostView::shared(bounds);
        let indicator = LoaderIndicator::attach(&host, config)?;
        Ok(Self {
            indicator,
            host,
            failed: false,
        })
    }

    /// The container whose mask the indicator drives.
    pub fn host(&self) -> &SharedHost {
        &self.host
    }

    /// The attached indicator.
    pub fn indicator(&self) -> &LoaderIndicator {
        &self.indicator
    }

    /// Mutable access to the attached indicator.
    pub fn indicator_mut(&mut self) -> &mut LoaderIndicator {
        &mut self.indicator
    }

    /// Return `true` if the fetch reported failure.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Resize the container; the ring recenters while loading.
    pub fn resize(&mut self, bounds: Rect) {
        self.host.borrow_mut().set_bounds(bounds);
    }

    /// Route one fetch event.
    ///
    /// A failed fetch leaves the ring at its last progress and never reveals.
    pub fn handle(&mut self, event: FetchEvent) -> RevealResult<()> {
        match event {
            FetchEvent::Progress { received, expected } => {
                self.indicator.set_progress(received, expected)
            }
            FetchEvent::Complete { success: true } => self.indicator.reveal(),
            FetchEvent::Complete { success: false } => {
                tracing::warn!(
                    progress = self.indicator.progress(),
                    "image fetch failed; keeping placeholder"
                );
                self.failed = true;
                Ok(())
            }
        }
    }

    /// Drive the reveal animation.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationStop> {
        self.indicator.advance(dt)
    }
}

#[cfg(test)]
#[path = "../tests/unit/image_view.rs"]
mod tests;
