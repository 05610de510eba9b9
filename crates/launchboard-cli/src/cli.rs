//! Launchboard CLI - Command line export of dashboard chart data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use launchboard_core::{
    pie_chart, scatter_chart, LaunchTable, OutcomeCounts, PayloadRange, SiteFilter, ALL_SITES,
};
use launchboard_data::params::site_options;
use launchboard_data::{load_csv, payload_slider_for};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Public function that can be called from the main binary
pub fn run_cli_main(args: &[&str]) -> Result<()> {
    let args = Args::parse_from(args);
    run(args)
}

#[derive(Parser, Debug)]
#[command(name = "launchboard-cli")]
#[command(about = "Export launch dashboard chart data as CSV or JSON")]
#[command(version)]
pub struct Args {
    /// Launch records CSV
    #[arg(short, long, default_value = "data/spacex_launch_dash.csv")]
    data: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Write the report into this directory instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    report: Report,
}

impl Args {
    pub fn data_path(&self) -> &Path {
        &self.data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Report {
    /// Success vs failed counts (pie chart data)
    Pie {
        /// Launch site, or "All"
        #[arg(long, default_value = "All")]
        site: String,
    },
    /// Payload vs outcome points (scatter chart data)
    Scatter {
        /// Launch site, or "All"
        #[arg(long, default_value = "All")]
        site: String,

        /// Lower payload bound in kg (default: slider minimum)
        #[arg(long)]
        min: Option<f64>,

        /// Upper payload bound in kg (default: slider maximum)
        #[arg(long)]
        max: Option<f64>,
    },
    /// Launch site selector options with launch counts
    Sites,
    /// Success vs failed counts for every site
    Summary,
}

impl Report {
    fn name(&self) -> &'static str {
        match self {
            Self::Pie { .. } => "pie",
            Self::Scatter { .. } => "scatter",
            Self::Sites => "sites",
            Self::Summary => "summary",
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let table = load_csv(&args.data)
        .with_context(|| format!("failed to load launch data from {}", args.data.display()))?;

    match &args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let path = dir.join(format!("{}.{}", args.report.name(), args.format.extension()));
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(&table, &args.report, args.format, BufWriter::new(file))?;
            info!(path = %path.display(), "report written");
        }
        None => write_report(&table, &args.report, args.format, io::stdout().lock())?,
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PieRow {
    label: String,
    count: usize,
    proportion: f64,
}

#[derive(Debug, Serialize)]
struct SiteRow {
    label: String,
    value: String,
    launches: usize,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    site: String,
    failures: usize,
    successes: usize,
    total: usize,
    success_rate: f64,
}

impl SummaryRow {
    fn new(site: &str, counts: OutcomeCounts) -> Self {
        Self {
            site: site.to_string(),
            failures: counts.failures,
            successes: counts.successes,
            total: counts.total(),
            success_rate: counts.success_rate(),
        }
    }
}

/// Render one report for `table` into `out`.
pub fn write_report<W: Write>(
    table: &LaunchTable,
    report: &Report,
    format: OutputFormat,
    out: W,
) -> Result<()> {
    debug!(report = report.name(), ?format, "writing report");

    match report {
        Report::Pie { site } => {
            let site = SiteFilter::parse(site);
            let chart = pie_chart(table, &site);
            match format {
                OutputFormat::Json => write_json(out, &chart),
                OutputFormat::Csv => {
                    let (failed, success) = table.outcome_counts(&site).proportions();
                    let rows: Vec<PieRow> = chart
                        .labels
                        .iter()
                        .zip(&chart.values)
                        .zip([failed, success])
                        .map(|((label, &count), proportion)| PieRow {
                            label: label.clone(),
                            count,
                            proportion,
                        })
                        .collect();
                    write_csv(out, &rows)
                }
            }
        }
        Report::Scatter { site, min, max } => {
            let site = SiteFilter::parse(site);
            let slider = payload_slider_for(table);
            let range = PayloadRange::new(min.unwrap_or(slider.min), max.unwrap_or(slider.max));
            match format {
                OutputFormat::Json => write_json(out, &scatter_chart(table, &site, range)),
                OutputFormat::Csv => write_csv(out, &table.payload_scatter(&site, range)),
            }
        }
        Report::Sites => {
            let rows: Vec<SiteRow> = site_options(table)
                .into_iter()
                .map(|option| SiteRow {
                    launches: table
                        .outcome_counts(&SiteFilter::parse(&option.value))
                        .total(),
                    label: option.label,
                    value: option.value,
                })
                .collect();
            write_rows(out, format, &rows)
        }
        Report::Summary => {
            let mut rows: Vec<SummaryRow> = table
                .sites()
                .into_iter()
                .map(|site| SummaryRow::new(site, table.outcome_counts(&SiteFilter::from(site))))
                .collect();
            rows.push(SummaryRow::new(
                ALL_SITES,
                table.outcome_counts(&SiteFilter::All),
            ));
            write_rows(out, format, &rows)
        }
    }
}

fn write_rows<W: Write, T: Serialize>(out: W, format: OutputFormat, rows: &[T]) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(out, rows),
        OutputFormat::Json => write_json(out, &rows),
    }
}

fn write_csv<W: Write, T: Serialize>(out: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
