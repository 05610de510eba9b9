use serde::Serialize;
use std::ops::Add;

use crate::error::InvalidRecord;
use crate::filter::{PayloadRange, SiteFilter};
use crate::record::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Outcome Counts
// ---------------------------------------------------------------------------

/// Failure/success tally behind the pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub failures: usize,
    pub successes: usize,
}

impl OutcomeCounts {
    pub const fn new(failures: usize, successes: usize) -> Self {
        Self {
            failures,
            successes,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Failure => self.failures += 1,
            Outcome::Success => self.successes += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.failures + self.successes
    }

    /// `(failed, success)` shares of the total; `(0.0, 0.0)` when empty.
    pub fn proportions(&self) -> (f64, f64) {
        let total = self.total();
        if total == 0 {
            return (0.0, 0.0);
        }
        let total = total as f64;
        (self.failures as f64 / total, self.successes as f64 / total)
    }

    pub fn success_rate(&self) -> f64 {
        self.proportions().1
    }
}

impl Add for OutcomeCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.failures + rhs.failures, self.successes + rhs.successes)
    }
}

impl FromIterator<Outcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut counts = Self::default();
        for outcome in iter {
            counts.record(outcome);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Scatter Point
// ---------------------------------------------------------------------------

/// One launch as plotted on the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub site: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(record: &LaunchRecord) -> Self {
        Self {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            booster_category: record.booster_category.clone(),
            site: record.site.clone(),
            flight_number: record.flight_number,
            booster_version: record.booster_version.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Launch Table
// ---------------------------------------------------------------------------

/// Immutable, ordered set of launch records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    /// Validate every record; the error names the first bad one by index.
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self, InvalidRecord> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| InvalidRecord { index, source })?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site names in order of first appearance.
    pub fn sites(&self) -> Vec<&str> {
        let mut sites: Vec<&str> = Vec::new();
        for record in &self.records {
            if !sites.contains(&record.site.as_str()) {
                sites.push(&record.site);
            }
        }
        sites
    }

    /// Observed `(min, max)` payload mass, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
            })
        })
    }

    pub fn select<'a>(&'a self, site: &'a SiteFilter) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        self.records.iter().filter(move |r| site.matches(&r.site))
    }

    /// Pie aggregation: failures and successes for the selected site(s).
    ///
    /// An unknown site yields `(0, 0)`.
    pub fn outcome_counts(&self, site: &SiteFilter) -> OutcomeCounts {
        self.select(site).map(|r| r.outcome).collect()
    }

    /// Records of the selected site(s) whose payload lies in `range`, in
    /// table order.
    pub fn filter_records(&self, site: &SiteFilter, range: PayloadRange) -> Vec<&LaunchRecord> {
        if range.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| site.matches(&r.site) && range.contains(r.payload_mass_kg))
            .collect()
    }

    /// Scatter filter: the points to plot for the selected site(s) and range.
    pub fn payload_scatter(&self, site: &SiteFilter, range: PayloadRange) -> Vec<ScatterPoint> {
        self.filter_records(site, range)
            .into_iter()
            .map(ScatterPoint::from)
            .collect()
    }
}
