//! Chart descriptions handed to the rendering layer.
//!
//! These carry data and labels only. Colours, fonts and layout are left to the
//! renderer; the scatter chart is pre-grouped by booster category so the
//! renderer can assign one colour per series.

use serde::Serialize;

use crate::filter::{PayloadRange, SiteFilter};
use crate::record::Outcome;
use crate::table::{LaunchTable, OutcomeCounts, ScatterPoint};

pub const PIE_LABELS: [&str; 2] = ["Failed (0)", "Success (1)"];
pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome";
pub const OUTCOME_HOVER_LABEL: &str = "Launch Outcome (0=Failed, 1=Success)";

/// Either chart, tagged with `chart_type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart_type", rename_all = "lowercase")]
pub enum Chart {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Self::Pie(chart) => &chart.title,
            Self::Scatter(chart) => &chart.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl PieChart {
    pub fn from_counts(site: &SiteFilter, counts: OutcomeCounts) -> Self {
        let title = match site.site() {
            None => "Total Success vs Failed Launches (All Sites)".to_string(),
            Some(name) => format!("Success vs Failed Launches for {name}"),
        };
        Self {
            title,
            labels: PIE_LABELS.iter().map(|l| l.to_string()).collect(),
            values: vec![counts.failures, counts.successes],
        }
    }
}

/// Points sharing one booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    /// Hover text, one entry per point.
    pub text: Vec<String>,
}

impl ScatterSeries {
    fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            x: Vec::new(),
            y: Vec::new(),
            text: Vec::new(),
        }
    }

    fn push(&mut self, point: &ScatterPoint) {
        self.x.push(point.payload_mass_kg);
        self.y.push(point.outcome.class());
        self.text.push(hover_text(point));
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub hover_label: String,
    pub y_tick_values: Vec<u8>,
    pub y_tick_text: Vec<String>,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Series are ordered by the first point of each category.
    pub fn from_points(site: &SiteFilter, points: &[ScatterPoint]) -> Self {
        let title = match site.site() {
            None => "Payload Mass vs Success/Failure (All Sites)".to_string(),
            Some(name) => format!("Payload Mass vs Success/Failure for {name}"),
        };

        let mut series: Vec<ScatterSeries> = Vec::new();
        for point in points {
            let idx = match series
                .iter()
                .position(|s| s.category == point.booster_category)
            {
                Some(idx) => idx,
                None => {
                    series.push(ScatterSeries::new(&point.booster_category));
                    series.len() - 1
                }
            };
            series[idx].push(point);
        }

        Self {
            title,
            x_label: PAYLOAD_AXIS_LABEL.to_string(),
            y_label: OUTCOME_AXIS_LABEL.to_string(),
            hover_label: OUTCOME_HOVER_LABEL.to_string(),
            y_tick_values: vec![Outcome::Failure.class(), Outcome::Success.class()],
            y_tick_text: vec![
                Outcome::Failure.label().to_string(),
                Outcome::Success.label().to_string(),
            ],
            series,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(ScatterSeries::len).sum()
    }
}

fn hover_text(point: &ScatterPoint) -> String {
    let mut text = point.site.clone();
    if let Some(flight) = point.flight_number {
        text.push_str(&format!(" | flight {flight}"));
    }
    if let Some(version) = &point.booster_version {
        text.push_str(&format!(" | {version}"));
    }
    text
}

pub fn pie_chart(table: &LaunchTable, site: &SiteFilter) -> PieChart {
    PieChart::from_counts(site, table.outcome_counts(site))
}

pub fn scatter_chart(table: &LaunchTable, site: &SiteFilter, range: PayloadRange) -> ScatterChart {
    ScatterChart::from_points(site, &table.payload_scatter(site, range))
}
