//! Dashboard control definitions.

use launchboard_core::{LaunchTable, PayloadRange, ALL_SITES};
use serde::Serialize;

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const ALL_SITES_LABEL: &str = "All sites";
pub const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

/// Upper bound on labelled slider marks.
pub const MAX_MARKS: usize = 20;

/// Range slider specification with bounds and step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    /// Human-readable label.
    pub label: &'static str,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step size and mark spacing.
    pub step: f64,
}

impl SliderSpec {
    /// Create a new slider specification.
    pub const fn new(label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            min,
            max,
            step,
        }
    }

    /// Mark positions from `min` up to, not including, `max`: every step,
    /// or a whole multiple of the step once that would exceed [`MAX_MARKS`].
    pub fn marks(&self) -> Vec<f64> {
        let span = self.max - self.min;
        if self.step <= 0.0 || !self.step.is_finite() || !(span > 0.0) || !span.is_finite() {
            return vec![self.min];
        }
        let steps = (span / self.step).ceil();
        let spacing = if steps > MAX_MARKS as f64 {
            self.step * (steps / MAX_MARKS as f64).ceil()
        } else {
            self.step
        };
        let count = ((span / spacing).ceil() as usize).min(MAX_MARKS);
        (0..count)
            .map(|i| self.min + spacing * i as f64)
            .collect()
    }

    /// Initial selection: the whole slider.
    pub fn default_range(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }

    /// Raise `max` to the next step multiple at or above `observed_max`, so the
    /// default selection covers every record.
    pub fn covering(self, observed_max: f64) -> Self {
        if observed_max <= self.max || self.step <= 0.0 || !observed_max.is_finite() {
            return self;
        }
        let steps = ((observed_max - self.min) / self.step).ceil();
        let max = self.min + steps * self.step;
        Self {
            max: if max.is_finite() { max.max(observed_max) } else { observed_max },
            ..self
        }
    }
}

/// Payload range slider defaults.
pub const PAYLOAD_SLIDER: SliderSpec = SliderSpec::new("Payload range (Kg):", 0.0, 10000.0, 1000.0);

/// Payload slider widened, if needed, to the table's heaviest payload.
pub fn payload_slider_for(table: &LaunchTable) -> SliderSpec {
    match table.payload_bounds() {
        Some((_, max)) => PAYLOAD_SLIDER.covering(max),
        None => PAYLOAD_SLIDER,
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// Selector options: "All sites" first, then each site in order of first
/// appearance.
pub fn site_options(table: &LaunchTable) -> Vec<SiteOption> {
    let mut options = vec![SiteOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(table.sites().into_iter().map(|site| SiteOption {
        label: site.to_string(),
        value: site.to_string(),
    }));
    options
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSelector {
    pub options: Vec<SiteOption>,
    pub default: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub default: [f64; 2],
}

impl From<SliderSpec> for RangeSlider {
    fn from(spec: SliderSpec) -> Self {
        let range = spec.default_range();
        Self {
            label: spec.label.to_string(),
            min: spec.min,
            max: spec.max,
            step: spec.step,
            marks: spec
                .marks()
                .into_iter()
                .map(|value| SliderMark {
                    value,
                    label: format!("{value:.0}"),
                })
                .collect(),
            default: [range.lo, range.hi],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

/// Everything the page needs to build its controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_selector: SiteSelector,
    pub payload_slider: RangeSlider,
    pub payload_bounds: Option<PayloadBounds>,
    pub record_count: usize,
}

pub fn dashboard_layout(table: &LaunchTable) -> DashboardLayout {
    DashboardLayout {
        title: DASHBOARD_TITLE.to_string(),
        site_selector: SiteSelector {
            options: site_options(table),
            default: ALL_SITES.to_string(),
            placeholder: SITE_PLACEHOLDER.to_string(),
            searchable: true,
        },
        payload_slider: payload_slider_for(table).into(),
        payload_bounds: table
            .payload_bounds()
            .map(|(min, max)| PayloadBounds { min, max }),
        record_count: table.len(),
    }
}
