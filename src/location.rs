// 📍 Location Codes
// Relative suffixes, validated codes and the keystroke filter

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::check::CODE_LEN;

// ============================================================================
// RELATIVE SUFFIX
// ============================================================================

/// Trailing marker placing a location after (`+`) or before (`-`) a base location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeSuffix {
    After,
    Before,
}

impl RelativeSuffix {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(RelativeSuffix::After),
            '-' => Some(RelativeSuffix::Before),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            RelativeSuffix::After => '+',
            RelativeSuffix::Before => '-',
        }
    }

    /// Spoken prefix for the relative location
    pub fn word(&self) -> &'static str {
        match self {
            RelativeSuffix::After => "AFTER",
            RelativeSuffix::Before => "BEFORE",
        }
    }
}

// ============================================================================
// INPUT FILTER
// ============================================================================

/// Whether `next` may be typed after `current`.
///
/// Alphanumerics are accepted up to four characters; `+`/`-` only as the
/// fourth. `current` is assumed to be filtered already.
pub fn accepts(current: &str, next: char) -> bool {
    let len = current.chars().count();
    if len >= CODE_LEN {
        return false;
    }

    if next.is_ascii_alphanumeric() {
        return true;
    }

    RelativeSuffix::from_char(next).is_some() && len == CODE_LEN - 1
}

/// Apply the keystroke filter to a whole string: uppercase, drop rejected
/// characters, stop at four.
pub fn filter_input(raw: &str) -> String {
    let mut filtered = String::with_capacity(CODE_LEN);
    for c in raw.chars().map(|c| c.to_ascii_uppercase()) {
        if accepts(&filtered, c) {
            filtered.push(c);
        }
    }
    filtered
}

// ============================================================================
// LOCATION CODE
// ============================================================================

/// A code that already satisfies the input filter's format
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationCode(String);

impl LocationCode {
    /// Parse a code strictly. Lowercase is accepted and normalized; any
    /// character the filter would drop is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        let len = normalized.chars().count();

        if len > CODE_LEN {
            return Err(anyhow!(
                "location code {:?} is {} characters long (max {})",
                raw, len, CODE_LEN
            ));
        }

        let mut accepted = String::with_capacity(CODE_LEN);
        for (pos, c) in normalized.chars().enumerate() {
            if !accepts(&accepted, c) {
                return Err(anyhow!(
                    "location code {:?} has invalid character {:?} at position {}",
                    raw, c, pos + 1
                ));
            }
            accepted.push(c);
        }

        Ok(LocationCode(accepted))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relative suffix, if the code ends with one
    pub fn relative(&self) -> Option<RelativeSuffix> {
        self.0.chars().last().and_then(RelativeSuffix::from_char)
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
