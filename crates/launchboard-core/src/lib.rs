//! # Launchboard Core
//!
//! Launch record model and the two computations behind the dashboard charts:
//! - outcome counts for one launch site or all of them (pie chart)
//! - payload/outcome points filtered by site and payload range (scatter chart)
//!
//! Everything in this crate is pure. A [`LaunchTable`] is built once and only
//! ever read afterwards, so it can be shared freely between request handlers.

pub mod chart;
pub mod error;
pub mod filter;
pub mod record;
pub mod table;

// Re-export core types
pub use chart::{pie_chart, scatter_chart, Chart, PieChart, ScatterChart, ScatterSeries};
pub use error::{InvalidRecord, RecordError};
pub use filter::{PayloadRange, SiteFilter, ALL_SITES};
pub use record::{LaunchRecord, Outcome};
pub use table::{LaunchTable, OutcomeCounts, ScatterPoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
