//! Site and payload selection used by both charts.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selector value meaning "every launch site".
pub const ALL_SITES: &str = "All";

/// Launch site selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Parse a selector value. Blank input selects every site, the same as
    /// the selector's default.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(name) => name == site,
        }
    }

    pub fn site(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Site(name) => Some(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for SiteFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SiteFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SITES),
            Self::Site(name) => f.write_str(name),
        }
    }
}

/// Closed payload interval `[lo, hi]` in kilograms.
///
/// A reversed interval (`lo > hi`) or one with a NaN bound selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Every non-negative payload.
    pub const fn unbounded() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.lo && payload_mass_kg <= self.hi
    }

    pub fn is_empty(&self) -> bool {
        !matches!(
            self.lo.partial_cmp(&self.hi),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_filter_parse() {
        assert_eq!(SiteFilter::parse("All"), SiteFilter::All);
        assert_eq!(SiteFilter::parse(""), SiteFilter::All);
        assert_eq!(
            SiteFilter::parse(" VAFB SLC-4E "),
            SiteFilter::Site("VAFB SLC-4E".to_string())
        );
        // The sentinel is case sensitive, like the selector values.
        assert_eq!(SiteFilter::parse("all"), SiteFilter::Site("all".to_string()));
    }

    #[test]
    fn test_site_filter_matches() {
        let site = SiteFilter::from("KSC LC-39A");
        assert!(site.matches("KSC LC-39A"));
        assert!(!site.matches("CCAFS LC-40"));
        assert!(SiteFilter::All.matches("anything"));
        assert_eq!(site.site(), Some("KSC LC-39A"));
        assert_eq!(SiteFilter::All.to_string(), "All");
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 2000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(2000.1));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = PayloadRange::new(5000.0, 1000.0);
        assert!(range.is_empty());
        assert!(!range.contains(3000.0));
        assert!(!range.contains(5000.0));

        let nan = PayloadRange::new(f64::NAN, 1000.0);
        assert!(nan.is_empty());
        assert!(!nan.contains(500.0));

        assert!(!PayloadRange::new(7.0, 7.0).is_empty());
    }
}
