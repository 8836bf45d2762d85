use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::Shape as _;

use crate::{
    animation::lerp::Lerp,
    foundation::core::{BezPath, Point, Rect, Vec2},
    foundation::error::{RevealError, RevealResult},
};

/// Radius of the loading ring, in view units.
pub const DEFAULT_RING_RADIUS: f64 = 20.0;

/// Flattening tolerance used when exporting ring geometry as Bézier paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Center of `bounds`, or the origin when `bounds` has no area (e.g. before first layout).
pub fn bounds_center(bounds: Rect) -> Point {
    let area = bounds.area();
    if !area.is_finite() || area == 0.0 {
        return Point::ZERO;
    }
    bounds.center()
}

/// Distance from the center of `bounds` to any of its corners.
pub fn circumscribed_radius(bounds: Rect) -> f64 {
    let area = bounds.area();
    if !area.is_finite() || area == 0.0 {
        return 0.0;
    }
    let half_w = bounds.width().abs() * 0.5;
    let half_h = bounds.height().abs() * 0.5;
    (half_w * half_w + half_h * half_h).sqrt()
}

/// Immutable circle description: center and radius.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingPath {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
}

impl RingPath {
    /// Create a ring path.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The square that bounds this circle.
    pub fn frame(&self) -> Rect {
        kurbo::Circle::new(self.center, self.radius).bounding_box()
    }

    /// The full circle as a Bézier path.
    pub fn to_bez_path(&self) -> BezPath {
        kurbo::Circle::new(self.center, self.radius).to_path(PATH_TOLERANCE)
    }

    /// The drawn part of the ring: `fraction` of the circumference, starting at
    /// 12 o'clock and running clockwise (y-down).
    pub fn trimmed(&self, fraction: f64) -> BezPath {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction == 0.0 {
            return BezPath::new();
        }
        if fraction == 1.0 {
            return self.to_bez_path();
        }
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: -FRAC_PI_2,
            sweep_angle: TAU * fraction,
            x_rotation: 0.0,
        }
        .to_path(PATH_TOLERANCE)
    }
}

impl Lerp for RingPath {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            center: <Point as Lerp>::lerp(&a.center, &b.center, t),
            radius: <f64 as Lerp>::lerp(&a.radius, &b.radius, t),
        }
    }
}

/// A [`RingPath`] grown until it circumscribes the bounds it was computed from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExpandedRingPath(RingPath);

impl ExpandedRingPath {
    /// The expanded circle.
    pub fn path(&self) -> RingPath {
        self.0
    }

    /// Radius of the expanded circle (center to corner of the bounds).
    pub fn final_radius(&self) -> f64 {
        self.0.radius
    }

    /// Stroke width at the end of a reveal.
    ///
    /// The stroke grows twice as fast as the radius: its inner edge reaches the center
    /// while its outer edge passes every corner.
    pub fn target_line_width(&self) -> f64 {
        2.0 * self.final_radius()
    }
}

/// Bounds-to-path derivation for the loading ring. Stateless apart from the fixed radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    radius: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RING_RADIUS,
        }
    }
}

impl RingGeometry {
    /// Geometry with a custom fixed ring radius (finite, `> 0`).
    pub fn new(radius: f64) -> RevealResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RevealError::validation(
                "ring radius must be finite and > 0",
            ));
        }
        Ok(Self { radius })
    }

    /// Fixed loading radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Loading ring: fixed radius, centered in `bounds`.
    pub fn base_path(&self, bounds: Rect) -> RingPath {
        RingPath::new(bounds_center(bounds), self.radius)
    }

    /// Reveal target: same center as [`Self::base_path`], radius reaching the corners of `bounds`.
    pub fn expanded_path(&self, bounds: Rect) -> ExpandedRingPath {
        ExpandedRingPath(RingPath::new(
            bounds_center(bounds),
            circumscribed_radius(bounds),
        ))
    }
}

/// Everything needed to draw the ring (or to use it as a mask).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RingShape {
    /// Circle the stroke follows.
    pub path: RingPath,
    /// Stroke width, centered on the circle.
    pub line_width: f64,
    /// Drawn fraction of the circumference in `[0, 1]`.
    pub stroke_end: f64,
}

impl RingShape {
    /// Return `true` if `p` lies inside the stroked (drawn) part of the ring. Butt caps.
    pub fn covers(&self, p: Point) -> bool {
        if self.stroke_end <= 0.0 || self.line_width <= 0.0 {
            return false;
        }
        let d = p - self.path.center;
        let dist = d.hypot();
        if (dist - self.path.radius).abs() > self.line_width * 0.5 {
            return false;
        }
        if self.stroke_end >= 1.0 {
            return true;
        }
        // Clockwise angle from 12 o'clock in y-down space.
        let mut theta = d.x.atan2(-d.y);
        if theta < 0.0 {
            theta += TAU;
        }
        theta <= self.stroke_end * TAU
    }

    /// Outline of the drawn stroke's centerline.
    pub fn centerline(&self) -> BezPath {
        self.path.trimmed(self.stroke_end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
