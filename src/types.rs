use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::ConfigError;

/// Sentinel for a dimension that has not been measured yet.
pub const UNKNOWN: i64 = -1;

/// The direction the list scrolls in.
///
/// The axis decides which item dimension is walked by the scroll position and which one
/// is "cross" (the number of items sharing a line).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    /// Rows stack vertically; `scroll_position` is a Y offset.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Y"))]
    Vertical,
    /// Columns stack horizontally; `scroll_position` is an X offset.
    #[cfg_attr(feature = "serde", serde(rename = "X"))]
    Horizontal,
}

impl ScrollAxis {
    /// The binding spelling of the axis (`"Y"` or `"X"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "Y",
            Self::Horizontal => "X",
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

impl fmt::Display for ScrollAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollAxis {
    type Err = ConfigError;

    /// Parses `"Y"`/`"X"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("Y") {
            Ok(Self::Vertical)
        } else if trimmed.eq_ignore_ascii_case("X") {
            Ok(Self::Horizontal)
        } else {
            Err(ConfigError::InvalidScrollAxis(s.to_string()))
        }
    }
}

/// How a burst of triggers is folded into commit evaluations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateLimitMethod {
    /// The first trigger arms the deadline; later triggers ride along with it.
    ///
    /// Evaluations happen at most once per interval while input keeps arriving.
    #[default]
    FixedRate,
    /// Every trigger pushes the deadline back; evaluation waits for a quiet interval.
    WhenChangesStop,
}
