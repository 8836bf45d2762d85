/// Result alias used across the crate.
pub type RevealResult<T> = Result<T, RevealError>;

/// Error type for indicator, mask, and configuration failures.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Input or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation is not allowed in the indicator's current state.
    #[error("invalid state: `{op}` is not allowed while {state}")]
    InvalidState {
        /// Rejected operation name.
        op: &'static str,
        /// State the indicator was in when `op` was called.
        state: crate::indicator::loader::IndicatorState,
    },

    /// Mask slot misuse (double install, clear by a non-owner).
    #[error("mask error: {0}")]
    Mask(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Image encode/decode failure.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Mask`].
    pub fn mask(msg: impl Into<String>) -> Self {
        Self::Mask(msg.into())
    }

    /// Build a [`RevealError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RevealError::InvalidState`].
    pub fn invalid_state(op: &'static str, state: crate::indicator::loader::IndicatorState) -> Self {
        Self::InvalidState { op, state }
    }

    /// Return `true` for host-side state machine misuse.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
