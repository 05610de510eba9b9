use thiserror::Error;

/// Reasons a launch record is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("invalid outcome class {0}: expected 0 (failure) or 1 (success)")]
    InvalidOutcome(i64),

    #[error("invalid payload mass {0} kg: must be finite and non-negative")]
    InvalidPayload(f64),

    #[error("launch site name is empty")]
    EmptySite,
}

/// A record rejected while building a table, with its position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record {index}: {source}")]
pub struct InvalidRecord {
    pub index: usize,
    #[source]
    pub source: RecordError,
}
