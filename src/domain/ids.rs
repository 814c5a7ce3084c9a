//! Domain identifier types with validation
//!
//! Newtype wrappers for area codes and owner names. Owner names double as
//! destination sheet names, so they are kept distinct from free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phone area code (DDD)
///
/// Holds whatever integer the source cell carried; validity against the
/// routing tables is decided by the resolver, not here.
///
/// # Examples
///
/// ```
/// use lead_router::domain::ids::AreaCode;
///
/// assert_eq!(AreaCode::parse_lenient(" 21 ").map(|c| c.value()), Some(21));
/// assert_eq!(AreaCode::parse_lenient("11 - SP").map(|c| c.value()), Some(11));
/// assert!(AreaCode::parse_lenient("n/a").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaCode(u32);

impl AreaCode {
    /// Creates an area code from its numeric value
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parses the leading integer of a cell value
    ///
    /// Leading whitespace and an optional `+` are skipped, then the longest
    /// run of ASCII digits is taken. A decimal cell such as `"21.0"` yields
    /// `21`. Returns `None` when no digits lead the value or the number does
    /// not fit.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = unsigned
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AreaCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Owner name
///
/// The internal key of an owner. It addresses the owner's destination sheet
/// and may differ from the published label written into exported rows.
///
/// # Examples
///
/// ```
/// use lead_router::domain::ids::OwnerName;
/// use std::str::FromStr;
///
/// let owner = OwnerName::from_str("HEDER").unwrap();
/// assert_eq!(owner.as_str(), "HEDER");
/// assert!(OwnerName::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerName(String);

impl OwnerName {
    /// Creates a new owner name
    ///
    /// # Returns
    ///
    /// Returns `Err` if the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Owner name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the owner name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OwnerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
