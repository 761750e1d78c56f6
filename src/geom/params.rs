//! Construction constants for a Möbius strip and their validation.

use serde::{Deserialize, Serialize};

/// Resolutions below this make the one-sided boundary differences dominate
/// the estimates.
pub const COARSE_RESOLUTION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl StripError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Immutable constants a strip is built from.
///
/// `width` is the full strip width: the cross-section parameter runs over
/// `[-width / 2, width / 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripParams {
    pub radius: f64,
    pub width: f64,
    pub resolution: usize,
}

impl StripParams {
    pub const DEFAULT_RADIUS: f64 = 1.0;
    pub const DEFAULT_WIDTH: f64 = 0.3;
    pub const DEFAULT_RESOLUTION: usize = 200;

    #[must_use]
    pub const fn new(radius: f64, width: f64, resolution: usize) -> Self {
        Self {
            radius,
            width,
            resolution,
        }
    }

    /// Checks the constants before any grid is allocated.
    pub fn validate(&self) -> Result<(), StripError> {
        if self.resolution < 2 {
            return Err(StripError::invalid(
                "resolution",
                format!("need at least 2 samples per axis, got {}", self.resolution),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(StripError::invalid(
                "radius",
                format!("must be finite and > 0, got {}", self.radius),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(StripError::invalid(
                "width",
                format!("must be finite and > 0, got {}", self.width),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[must_use]
    pub fn is_coarse(&self) -> bool {
        self.resolution < COARSE_RESOLUTION
    }
}

impl Default for StripParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_RADIUS,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_RESOLUTION,
        )
    }
}
