#![forbid(unsafe_code)]

//! Compass directions for resize handles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which edge or corner a handle drags.
///
/// Corners combine one horizontal and one vertical edge: dragging `se`
/// applies both the `s` and the `e` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
    ];

    /// `+1` when the handle grows width with rightward motion (east),
    /// `-1` for west, `0` when width is unaffected.
    #[must_use]
    pub const fn width_sign(self) -> f64 {
        match self {
            Self::E | Self::Ne | Self::Se => 1.0,
            Self::W | Self::Nw | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// `+1` when the handle grows height with downward motion (south),
    /// `-1` for north, `0` when height is unaffected.
    #[must_use]
    pub const fn height_sign(self) -> f64 {
        match self {
            Self::S | Self::Se | Self::Sw => 1.0,
            Self::N | Self::Ne | Self::Nw => -1.0,
            Self::E | Self::W => 0.0,
        }
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Nw | Self::Se | Self::Sw)
    }

    /// Size delta produced by a pointer moving `(dx, dy)` from the drag origin.
    #[must_use]
    pub fn size_delta(self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.width_sign(), dy * self.height_sign())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }

    /// Host cursor name, e.g. `"se-resize"`.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::S => "s-resize",
            Self::E => "e-resize",
            Self::W => "w-resize",
            Self::Ne => "ne-resize",
            Self::Nw => "nw-resize",
            Self::Se => "se-resize",
            Self::Sw => "sw-resize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resize direction {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_combine_edges() {
        assert_eq!(Direction::Se.size_delta(50.0, 30.0), (50.0, 30.0));
        assert_eq!(Direction::Nw.size_delta(50.0, 30.0), (-50.0, -30.0));
        assert_eq!(Direction::Ne.size_delta(50.0, 30.0), (50.0, -30.0));
        assert_eq!(Direction::Sw.size_delta(50.0, 30.0), (-50.0, 30.0));
    }

    #[test]
    fn edges_affect_one_axis() {
        let (w, h) = Direction::E.size_delta(10.0, 99.0);
        assert_eq!((w, h.abs()), (10.0, 0.0));
        let (w, h) = Direction::N.size_delta(99.0, 10.0);
        assert_eq!((w.abs(), h), (0.0, -10.0));
    }

    #[test]
    fn corner_classification() {
        let corners: Vec<_> = Direction::ALL.into_iter().filter(|d| d.is_corner()).collect();
        assert_eq!(
            corners,
            vec![Direction::Ne, Direction::Nw, Direction::Se, Direction::Sw]
        );
    }

    #[test]
    fn parse_and_display_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
            assert_eq!(dir.cursor(), format!("{dir}-resize"));
        }
        assert!("north".parse::<Direction>().is_err());
        assert!("SE".parse::<Direction>().is_err());
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&Direction::Nw).unwrap();
        assert_eq!(json, "\"nw\"");
    }
}
