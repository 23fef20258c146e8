//! Page-count limit attached to a plan.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when building a [`PageLimit`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageLimitError {
    /// Only `-1` may be used as a negative value.
    #[error("page limit must be -1 (unlimited) or non-negative, got {0}")]
    OutOfRange(i64),
}

/// Maximum number of pages a plan allows.
///
/// On the wire this is a plain integer where `-1` means unlimited.
///
/// ```
/// use mytrack_core::PageLimit;
///
/// assert_eq!(PageLimit::from_wire(-1), Ok(PageLimit::Unlimited));
/// assert_eq!(PageLimit::from_wire(3), Ok(PageLimit::Limited(3)));
/// assert!(PageLimit::from_wire(-5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLimit {
    Unlimited,
    Limited(u32),
}

impl PageLimit {
    /// Wire value meaning "no limit".
    pub const UNLIMITED_WIRE: i64 = -1;

    /// Decode the backend's integer representation.
    ///
    /// # Errors
    ///
    /// Returns [`PageLimitError::OutOfRange`] for values below `-1` or above `u32::MAX`.
    pub fn from_wire(value: i64) -> Result<Self, PageLimitError> {
        if value == Self::UNLIMITED_WIRE {
            return Ok(Self::Unlimited);
        }
        u32::try_from(value)
            .map(Self::Limited)
            .map_err(|_| PageLimitError::OutOfRange(value))
    }

    /// Encode to the backend's integer representation.
    #[must_use]
    pub fn to_wire(self) -> i64 {
        match self {
            Self::Unlimited => Self::UNLIMITED_WIRE,
            Self::Limited(n) => i64::from(n),
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::Limited(0)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Limited(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for PageLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for PageLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::from_wire(value).map_err(serde::de::Error::custom)
    }
}
