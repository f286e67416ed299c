use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// Text-flow orientation of a document.
///
/// Always one of exactly two values. Detection never produces an "unknown"
/// direction: anything that cannot be resolved falls back to [`Direction::Ltr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right text flow (the default).
    Ltr,
    /// Right-to-left text flow.
    Rtl,
}

impl Direction {
    /// The canonical attribute value for this direction (`"ltr"` / `"rtl"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// The marker class the applicator maintains on root and container.
    pub fn marker_class(self) -> &'static str {
        match self {
            Direction::Ltr => "is-ltr",
            Direction::Rtl => "is-rtl",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a direction attribute value that is neither
/// `"ltr"` nor `"rtl"`.
///
/// Callers inspecting document attributes treat this as "marker absent"
/// rather than an error: an invalid marker is ignored, not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction value: {0:?}")]
pub struct DirectionParseError(pub SmolStr);

impl FromStr for Direction {
    type Err = DirectionParseError;

    /// Accepts exactly `"ltr"` or `"rtl"`. No trimming, no case folding:
    /// a marker attribute is trusted verbatim or not at all.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            other => Err(DirectionParseError(SmolStr::new(other))),
        }
    }
}
