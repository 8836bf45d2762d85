//! Ring-reveal renders a circular progress ring over an image placeholder while the image
//! downloads, then expands the ring into a mask until the image is fully visible.
//!
//! # Flow
//!
//! 1. **Attach**: a [`LoaderIndicator`] is attached to a [`HostView`] (bounds + mask slot).
//! 2. **Progress**: `(received, expected)` byte counts are clamped into the ring's drawn
//!    fraction.
//! 3. **Reveal**: the ring becomes the host's mask and its path and stroke width grow in
//!    lock-step until the stroke floods the circle circumscribing the host.
//! 4. **Cleanup**: when the animation stops (finished, interrupted, or the indicator is
//!    dropped) the host's mask is cleared exactly once.
//!
//! [`LoadingImageView`] wires fetch events to an indicator the way an image view would.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod geometry;
mod host;
mod image_view;
mod indicator;
mod render;

pub use animation::ease::Ease;
pub use animation::group::{AnimationGroup, AnimationStop, GroupSample, PropertyAnimation};
pub use animation::lerp::Lerp;
pub use foundation::core::{BezPath, Fps, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{RevealError, RevealResult};
pub use geometry::ring::{
    DEFAULT_RING_RADIUS, ExpandedRingPath, RingGeometry, RingPath, RingShape, bounds_center,
    circumscribed_radius,
};
pub use host::mask::{IndicatorId, Mask, MaskSlot};
pub use host::view::{HostView, SharedHost};
pub use image_view::{FetchEvent, LoadingImageView};
pub use indicator::config::{IndicatorConfig, RevealTiming, RingStyle};
pub use indicator::loader::{IndicatorState, LoaderIndicator, Overlay};
pub use render::preview::{render_preview, render_view, solid};
