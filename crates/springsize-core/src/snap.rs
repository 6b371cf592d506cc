#![forbid(unsafe_code)]

//! Snap quantization for proposed sizes.
//!
//! A value snaps to the closest candidate *point* within `threshold`, or,
//! failing that, to the nearest multiple of `increment` within `threshold`.
//! Otherwise it is returned unchanged.
//!
//! Priority is fixed: points, then increment, then identity.
//!
//! Only the increment path is reachable from drag handling. Point snapping
//! is available to direct callers of [`snap`] and [`SnapConfig::snap`].

use serde::{Deserialize, Serialize};

/// Default maximum distance at which snapping applies.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// Snap `value` to a candidate point or increment.
///
/// - Among `points` within `threshold`, the closest wins; on equal distance
///   the earliest point in the slice wins.
/// - `increment` is only considered when it is greater than 1.
#[must_use]
pub fn snap(value: f64, points: &[f64], increment: Option<f64>, threshold: f64) -> f64 {
    let mut closest: Option<(f64, f64)> = None;
    for &point in points {
        let diff = (value - point).abs();
        if diff <= threshold && closest.is_none_or(|(best, _)| diff < best) {
            closest = Some((diff, point));
        }
    }
    if let Some((_, point)) = closest {
        return point;
    }

    if let Some(increment) = increment
        && increment > 1.0
    {
        let rounded = round_half_up(value / increment) * increment;
        if (value - rounded).abs() <= threshold {
            return rounded;
        }
    }

    value
}

/// Round with ties toward positive infinity (`floor(x + 0.5)`).
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Snap behavior for one resizable region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Candidate values. Not consulted by drag handling.
    pub points: Vec<f64>,
    /// Quantization step. Values `<= 1` disable increment snapping.
    pub increment: Option<f64>,
    /// Maximum distance at which a snap applies.
    pub threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            increment: None,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl SnapConfig {
    /// Increment snapping with the default threshold.
    #[must_use]
    pub fn increment(increment: f64) -> Self {
        Self {
            increment: Some(increment),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: impl Into<Vec<f64>>) -> Self {
        self.points = points.into();
        self
    }

    /// Whether drag handling should quantize at all (an increment is set
    /// and non-zero).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.increment.is_some_and(|inc| inc != 0.0)
    }

    /// Snap using every configured source.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        snap(value, &self.points, self.increment, self.threshold)
    }

    /// Snap using only the increment, as drag handling does.
    #[must_use]
    pub fn snap_increment(&self, value: f64) -> f64 {
        snap(value, &[], self.increment, self.threshold)
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            errors.push(format!(
                "snap.threshold must be finite and >= 0, got {}",
                self.threshold
            ));
        }
        if let Some(inc) = self.increment
            && !inc.is_finite()
        {
            errors.push(format!("snap.increment must be finite, got {inc}"));
        }
        if self.points.iter().any(|p| !p.is_finite()) {
            errors.push("snap.points must all be finite".to_owned());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
