//! Key/value settings.

use serde::{Deserialize, Serialize};

/// A named, string-valued configuration entry.
///
/// Values are stored verbatim and parsed by callers: booleans as `"0"`/`"1"`,
/// integers as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Unique key (primary)
    pub key: String,

    /// Raw value
    pub value: String,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Interpret the value as a `"0"`/`"1"` flag.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self.value.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        }
    }

    /// Interpret the value as a decimal integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_flag() {
        assert_eq!(Setting::new("A", "1").as_flag(), Some(true));
        assert_eq!(Setting::new("A", "0").as_flag(), Some(false));
        assert_eq!(Setting::new("A", "yes").as_flag(), None);
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Setting::new("A", " 14 ").as_int(), Some(14));
        assert_eq!(Setting::new("A", "seven").as_int(), None);
    }
}
