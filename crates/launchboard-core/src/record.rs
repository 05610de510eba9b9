use serde::{Deserialize, Serialize};

use crate::error::RecordError;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Launch result, stored in the source data as `class` 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
#[repr(u8)]
pub enum Outcome {
    Failure = 0,
    Success = 1,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Failure => "Failed",
            Self::Success => "Success",
        }
    }

    /// Numeric class as plotted on the scatter y axis.
    pub fn class(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RecordError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(RecordError::InvalidOutcome(other)),
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

// ---------------------------------------------------------------------------
// Launch Record
// ---------------------------------------------------------------------------

/// One row of the launch table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub site: String,
    pub payload_mass_kg: f64,
    /// Full booster identifier, e.g. `F9 v1.1 B1011`.
    pub booster_version: Option<String>,
    /// Booster family used for colour grouping, e.g. `v1.1` or `FT`.
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Result<Self, RecordError> {
        let record = Self {
            flight_number: None,
            site: site.into(),
            payload_mass_kg,
            booster_version: None,
            booster_category: booster_category.into(),
            outcome,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_flight_number(mut self, flight_number: u32) -> Self {
        self.flight_number = Some(flight_number);
        self
    }

    pub fn with_booster_version(mut self, booster_version: impl Into<String>) -> Self {
        self.booster_version = Some(booster_version.into());
        self
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.site.trim().is_empty() {
            return Err(RecordError::EmptySite);
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload(self.payload_mass_kg));
        }
        Ok(())
    }
}
