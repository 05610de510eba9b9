//! Launchboard Data Library
//!
//! Loads launch records from CSV and describes the dashboard controls.

pub mod loader;
pub mod params;

// Re-export main types
pub use loader::{load_csv, read_csv, LoadError};
pub use params::{dashboard_layout, payload_slider_for, DashboardLayout, SliderSpec};
