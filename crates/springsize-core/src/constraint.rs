#![forbid(unsafe_code)]

//! Size bounds and aspect-ratio resolution.
//!
//! [`Constraints::apply`] takes a proposed `(width, height)` and returns the
//! pair that satisfies the configured min/max bounds and, when set, a fixed
//! aspect ratio (`width / height`).
//!
//! # Algorithm
//!
//! 1. Clamp width and height independently to their bounds.
//! 2. With an aspect ratio, pick the *driving* axis: the one whose clamped
//!    value moved further from its input. Ties go to height. The other axis
//!    is re-derived from the ratio.
//! 3. Re-check the bounds in the fixed order min-width, max-width,
//!    min-height, max-height. Each violated check pins that axis to the
//!    bound and re-derives the other axis, so in conflicting configurations
//!    the last violated check wins.
//!
//! # Invariants
//!
//! 1. `apply` is pure.
//! 2. Without an aspect ratio, `apply(apply(w, h)) == apply(w, h)` exactly.
//! 3. With an aspect ratio and satisfiable bounds, the result has
//!    `width / height == ratio` up to floating-point rounding.
//!
//! # Failure Modes
//!
//! - `min > max` on an axis is a caller contract violation; the result is
//!   whatever the clamp order produces. [`Constraints::validate`] reports it.
//! - Step 3 is a tie-break, not a general solver. Near-equal deltas can make
//!   the driving axis alternate between calls, which shows up as jitter
//!   close to the ratio boundary.

use serde::{Deserialize, Serialize};

/// Optional per-axis bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBound {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl SizeBound {
    #[must_use]
    pub const fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    #[must_use]
    pub const fn height(height: f64) -> Self {
        Self {
            width: None,
            height: Some(height),
        }
    }

    #[must_use]
    pub const fn both(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Size bounds plus an optional fixed aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub min: Option<SizeBound>,
    pub max: Option<SizeBound>,
    /// `width / height`.
    pub aspect_ratio: Option<f64>,
}

impl Constraints {
    /// No bounds and no ratio; `apply` is the identity.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            min: None,
            max: None,
            aspect_ratio: None,
        }
    }

    #[must_use]
    pub const fn with_min(mut self, min: SizeBound) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn with_max(mut self, max: SizeBound) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub const fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn min_width(&self) -> Option<f64> {
        self.min.and_then(|b| b.width)
    }

    #[must_use]
    pub fn min_height(&self) -> Option<f64> {
        self.min.and_then(|b| b.height)
    }

    #[must_use]
    pub fn max_width(&self) -> Option<f64> {
        self.max.and_then(|b| b.width)
    }

    #[must_use]
    pub fn max_height(&self) -> Option<f64> {
        self.max.and_then(|b| b.height)
    }

    /// Whether `apply` can change anything.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none_or(|b| b.is_empty())
            && self.max.is_none_or(|b| b.is_empty())
            && self.aspect_ratio.is_none()
    }

    /// Resolve a proposed size against these constraints.
    #[must_use]
    pub fn apply(&self, width: f64, height: f64) -> (f64, f64) {
        let mut w = width;
        let mut h = height;

        if let Some(min) = self.min_width() {
            w = w.max(min);
        }
        if let Some(max) = self.max_width() {
            w = w.min(max);
        }
        if let Some(min) = self.min_height() {
            h = h.max(min);
        }
        if let Some(max) = self.max_height() {
            h = h.min(max);
        }

        let Some(ratio) = self.aspect_ratio else {
            return (w, h);
        };

        if (w - width).abs() > (h - height).abs() {
            h = w / ratio;
        } else {
            w = h * ratio;
        }

        // Order matters: a later check may undo an earlier one.
        if let Some(min) = self.min_width()
            && w < min
        {
            w = min;
            h = w / ratio;
        }
        if let Some(max) = self.max_width()
            && w > max
        {
            w = max;
            h = w / ratio;
        }
        if let Some(min) = self.min_height()
            && h < min
        {
            h = min;
            w = h * ratio;
        }
        if let Some(max) = self.max_height()
            && h > max
        {
            h = max;
            w = h * ratio;
        }

        #[cfg(feature = "tracing")]
        if (w, h) != (width, height) {
            tracing::trace!(
                width,
                height,
                resolved_width = w,
                resolved_height = h,
                ratio,
                "constraints adjusted size"
            );
        }

        (w, h)
    }

    /// Report contract violations. An empty list means the constraints are
    /// well-formed.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(ratio) = self.aspect_ratio
            && !(ratio.is_finite() && ratio > 0.0)
        {
            errors.push(format!(
                "constraints.aspect_ratio must be finite and > 0, got {ratio}"
            ));
        }

        let bounds = [
            ("min.width", self.min_width()),
            ("min.height", self.min_height()),
            ("max.width", self.max_width()),
            ("max.height", self.max_height()),
        ];
        for (name, value) in bounds {
            if let Some(v) = value
                && !v.is_finite()
            {
                errors.push(format!("constraints.{name} must be finite, got {v}"));
            }
        }

        if let (Some(min), Some(max)) = (self.min_width(), self.max_width())
            && min > max
        {
            errors.push(format!(
                "constraints.min.width ({min}) exceeds constraints.max.width ({max})"
            ));
        }
        if let (Some(min), Some(max)) = (self.min_height(), self.max_height())
            && min > max
        {
            errors.push(format!(
                "constraints.min.height ({min}) exceeds constraints.max.height ({max})"
            ));
        }

        errors
    }
}

/// Free-function form of [`Constraints::apply`].
#[must_use]
pub fn apply_constraints(width: f64, height: f64, constraints: &Constraints) -> (f64, f64) {
    constraints.apply(width, height)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
