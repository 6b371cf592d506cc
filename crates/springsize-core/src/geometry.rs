#![forbid(unsafe_code)]

//! Size payloads published to the presentation layer.

use serde::{Deserialize, Serialize};

/// Change notification payload: the eased size plus drag status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub is_dragging: bool,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64, is_dragging: bool) -> Self {
        Self {
            width,
            height,
            is_dragging,
        }
    }

    /// Whole-pixel size for hosts that lay out integer sizes.
    ///
    /// Rounds half away from zero and saturates at the `i64` range.
    #[must_use]
    pub fn rounded(&self) -> (i64, i64) {
        (self.width.round() as i64, self.height.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_pixels() {
        let dims = Dimensions::new(369.5, 229.49, false);
        assert_eq!(dims.rounded(), (370, 229));
    }

    #[test]
    fn rounded_saturates() {
        let dims = Dimensions::new(f64::MAX, f64::NAN, true);
        assert_eq!(dims.rounded(), (i64::MAX, 0));
    }
}
