use std::path::Path;
use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::core::Rgba8,
    foundation::error::{RevealError, RevealResult},
    geometry::ring::DEFAULT_RING_RADIUS,
};

/// Indicator configuration. Every field has a default, so `{}` is a valid document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Ring appearance while loading.
    pub style: RingStyle,
    /// Reveal animation timing.
    pub reveal: RevealTiming,
}

/// Ring appearance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingStyle {
    /// Fixed loading radius.
    pub radius: f64,
    /// Stroke width while loading.
    pub line_width: f64,
    /// Stroke color while loading.
    pub stroke_color: Rgba8,
    /// Placeholder fill hiding the image while loading. Cleared on reveal.
    pub background: Rgba8,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RING_RADIUS,
            line_width: 2.0,
            stroke_color: Rgba8::RED,
            background: Rgba8::WHITE,
        }
    }
}

/// Reveal animation timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealTiming {
    /// Duration of the expanding-mask animation, in seconds.
    pub duration_secs: f64,
    /// Timing curve shared by path and stroke width.
    pub ease: Ease,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            ease: Ease::EaseInEaseOut,
        }
    }
}

impl RevealTiming {
    /// Duration as a [`Duration`].
    pub fn duration(&self) -> RevealResult<Duration> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(RevealError::validation(
                "reveal.duration_secs must be finite and > 0",
            ));
        }
        let d = Duration::try_from_secs_f64(self.duration_secs)
            .map_err(|e| RevealError::validation(format!("reveal.duration_secs: {e}")))?;
        if d.is_zero() {
            return Err(RevealError::validation(
                "reveal.duration_secs rounds to zero",
            ));
        }
        Ok(d)
    }
}

impl IndicatorConfig {
    /// Check numeric ranges.
    pub fn validate(&self) -> RevealResult<()> {
        if !self.style.radius.is_finite() || self.style.radius <= 0.0 {
            return Err(RevealError::validation(
                "style.radius must be finite and > 0",
            ));
        }
        if !self.style.line_width.is_finite() || self.style.line_width < 0.0 {
            return Err(RevealError::validation(
                "style.line_width must be finite and >= 0",
            ));
        }
        self.reveal.duration()?;
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> RevealResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| RevealError::serde(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_json_path(path: &Path) -> RevealResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RevealResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevealError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/config.rs"]
mod tests;
