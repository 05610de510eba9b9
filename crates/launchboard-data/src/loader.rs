//! CSV loading for launch records.
//!
//! Expected header (extra columns such as the unnamed index are ignored):
//!
//! ```text
//! ,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
//! ```

use launchboard_core::{InvalidRecord, LaunchRecord, LaunchTable, Outcome, RecordError};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open launch data {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed launch data: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid launch record on line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: RecordError,
    },
}

/// Line 1 is the header.
fn line_of(index: usize) -> u64 {
    index as u64 + 2
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl CsvRow {
    /// Field checks are left to `LaunchTable::new`.
    fn into_record(self) -> Result<LaunchRecord, RecordError> {
        Ok(LaunchRecord {
            flight_number: self.flight_number,
            site: self.site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
            booster_category: self.booster_category,
            outcome: Outcome::try_from(self.class)?,
        })
    }
}

/// Load a launch table from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<LaunchTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(file)?;
    info!(path = %path.display(), records = table.len(), "loaded launch records");
    Ok(table)
}

/// Read a launch table from any CSV source.
pub fn read_csv<R: Read>(reader: R) -> Result<LaunchTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let record = row?.into_record().map_err(|source| LoadError::Record {
            line: line_of(idx),
            source,
        })?;
        records.push(record);
    }
    debug!(rows = records.len(), "parsed launch csv");

    LaunchTable::new(records).map_err(|InvalidRecord { index, source }| LoadError::Record {
        line: line_of(index),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchboard_core::{OutcomeCounts, SiteFilter};
    use std::io::Write;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,14,VAFB SLC-4E,1,9600.0,F9 FT B1036.1,FT
3,20,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
4,33,CCAFS SLC-40,1,4707.0,F9 B4 B1039.2,B4
";

    #[test]
    fn test_read_sample() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.sites(),
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );

        let first = &table.records()[0];
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(first.outcome, Outcome::Failure);

        let counts = table.outcome_counts(&SiteFilter::All);
        assert_eq!((counts.failures, counts.successes), (2, 3));
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let data = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,2490,FT\n";
        let table = read_csv(data.as_bytes()).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.flight_number, None);
        assert_eq!(record.booster_version, None);
        assert_eq!(record.payload_mass_kg, 2490.0);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let data = "Launch Site , class , Payload Mass (kg) , Booster Version Category\n\
                    \x20KSC LC-39A , 1 , 2490.0 , FT \n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.records()[0].site, "KSC LC-39A");
        assert_eq!(table.records()[0].booster_category, "FT");
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let data = ",Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_bad_class() {
        let data = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,2490,FT\n\
                    KSC LC-39A,2,2490,FT\n";
        match read_csv(data.as_bytes()) {
            Err(LoadError::Record { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source, RecordError::InvalidOutcome(2));
            }
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_negative_payload() {
        let data = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,-10,FT\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(LoadError::Record {
                line: 2,
                source: RecordError::InvalidPayload(_)
            })
        ));
    }

    #[test]
    fn test_invalid_record_reports_its_line() {
        let data = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,2490,FT\n\
                    KSC LC-39A,0,3310,FT\n\
                    ,1,500,FT\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Record {
                line: 4,
                source: RecordError::EmptySite
            }
        ));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_rejects_unparsable_payload() {
        let data = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,heavy,FT\n";
        assert!(matches!(read_csv(data.as_bytes()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.payload_bounds(), Some((0.0, 9600.0)));
    }

    #[test]
    fn test_bundled_dataset() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/spacex_launch_dash.csv");
        let table = load_csv(path).unwrap();
        assert_eq!(
            table.sites(),
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        let (_, max) = table.payload_bounds().unwrap();
        assert!(max <= 10000.0);

        let all = table.outcome_counts(&SiteFilter::All);
        let by_site = table
            .sites()
            .into_iter()
            .map(|site| table.outcome_counts(&SiteFilter::from(site)))
            .fold(OutcomeCounts::default(), |acc, counts| acc + counts);
        assert_eq!(all, by_site);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
