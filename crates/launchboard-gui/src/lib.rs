//! Launchboard GUI - Web dashboard for launch records
//!
//! Features:
//! - Launch site selector and payload range slider
//! - Success/failure pie chart for all sites or one site
//! - Payload vs outcome scatter chart, one series per booster category
//! - Raw record listing for the current selection

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use launchboard_core::{
    pie_chart, scatter_chart, Chart, LaunchRecord, LaunchTable, PayloadRange, SiteFilter,
};
use launchboard_data::params::{dashboard_layout, payload_slider_for, DashboardLayout, SliderSpec};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::debug;

/// Shared, read-only state for every handler.
#[derive(Clone)]
pub struct AppState {
    table: Arc<LaunchTable>,
    slider: SliderSpec,
}

impl AppState {
    pub fn new(table: LaunchTable) -> Self {
        let slider = payload_slider_for(&table);
        Self {
            table: Arc::new(table),
            slider,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }
}

/// Asset root used when none is configured, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "crates/launchboard-gui";

/// Directories served alongside the API.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDirs {
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl AssetDirs {
    /// `static/` and `templates/` under `root`.
    pub fn from_root(root: impl AsRef<FsPath>) -> Self {
        let root = root.as_ref();
        Self {
            static_dir: root.join("static"),
            templates_dir: root.join("templates"),
        }
    }
}

impl Default for AssetDirs {
    fn default() -> Self {
        Self::from_root(DEFAULT_ASSETS_DIR)
    }
}

/// Creates the Axum router with all routes
pub fn create_router(state: AppState, assets: &AssetDirs) -> Router {
    Router::new()
        .route("/api/layout", get(handle_layout))
        .route("/api/chart/{chart_type}", get(handle_chart_data))
        .route("/api/records", get(handle_records))
        .route("/api/health", get(handle_health))
        .nest_service("/static", ServeDir::new(&assets.static_dir))
        .fallback_service(ServeDir::new(&assets.templates_dir))
        .with_state(state)
}

/// Control values from query params
#[derive(Debug, Clone, PartialEq)]
struct ChartQuery {
    site: SiteFilter,
    range: PayloadRange,
}

/// Parse control values from query parameters. Missing or unparsable values
/// keep the control defaults.
fn parse_query(params: &HashMap<String, String>, slider: &SliderSpec) -> ChartQuery {
    let mut range = slider.default_range();

    macro_rules! parse_param {
        ($target:expr, $name:expr, $type:ty) => {
            if let Some(val) = params.get($name).and_then(|v| v.trim().parse::<$type>().ok()) {
                $target = val;
            }
        };
    }

    parse_param!(range.lo, "lo", f64);
    parse_param!(range.hi, "hi", f64);

    let site = params
        .get("site")
        .map(|v| SiteFilter::parse(v))
        .unwrap_or_default();

    ChartQuery { site, range }
}

/// Handle layout request
async fn handle_layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(dashboard_layout(&state.table))
}

/// Handle specific chart data requests
async fn handle_chart_data(
    State(state): State<AppState>,
    Path(chart_type): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Chart> {
    let query = parse_query(&params, &state.slider);
    let chart = generate_chart_data(&chart_type, &state.table, &query);
    Json(chart)
}

#[derive(Serialize)]
struct RecordsResponse {
    site: String,
    range: PayloadRange,
    records: Vec<LaunchRecord>,
}

/// Handle filtered record listing
async fn handle_records(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<RecordsResponse> {
    let query = parse_query(&params, &state.slider);
    let records = state
        .table
        .filter_records(&query.site, query.range)
        .into_iter()
        .cloned()
        .collect();
    Json(RecordsResponse {
        site: query.site.to_string(),
        range: query.range,
        records,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: state.table.len(),
    })
}

fn generate_chart_data(chart_type: &str, table: &LaunchTable, query: &ChartQuery) -> Chart {
    let chart = match chart_type {
        "scatter" => Chart::Scatter(scatter_chart(table, &query.site, query.range)),
        _ => Chart::Pie(pie_chart(table, &query.site)),
    };
    debug!(
        chart_type,
        site = %query.site,
        lo = query.range.lo,
        hi = query.range.hi,
        "recomputed chart"
    );
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchboard_core::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let records = vec![
            LaunchRecord::new("CCAFS LC-40", 525.0, "v1.0", Outcome::Failure).unwrap(),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Outcome::Success).unwrap(),
            LaunchRecord::new("KSC LC-39A", 2490.0, "FT", Outcome::Success).unwrap(),
            LaunchRecord::new("KSC LC-39A", 5300.0, "FT", Outcome::Failure).unwrap(),
        ];
        AppState::new(LaunchTable::new(records).unwrap())
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_query_defaults() {
        let state = state();
        let query = parse_query(&HashMap::new(), &state.slider);
        assert_eq!(query.site, SiteFilter::All);
        assert_eq!(query.range, PayloadRange::new(0.0, 10000.0));
    }

    #[test]
    fn test_parse_query_values() {
        let state = state();
        let query = parse_query(
            &params(&[("site", "KSC LC-39A"), ("lo", "1000"), ("hi", " 6000 ")]),
            &state.slider,
        );
        assert_eq!(query.site, SiteFilter::Site("KSC LC-39A".to_string()));
        assert_eq!(query.range, PayloadRange::new(1000.0, 6000.0));
    }

    #[test]
    fn test_parse_query_ignores_garbage() {
        let state = state();
        let query = parse_query(&params(&[("lo", "abc"), ("hi", "")]), &state.slider);
        assert_eq!(query.range, PayloadRange::new(0.0, 10000.0));
    }

    #[tokio::test]
    async fn test_pie_handler() {
        let Json(chart) = handle_chart_data(
            State(state()),
            Path("pie".to_string()),
            Query(params(&[("site", "KSC LC-39A")])),
        )
        .await;
        match chart {
            Chart::Pie(pie) => {
                assert_eq!(pie.title, "Success vs Failed Launches for KSC LC-39A");
                assert_eq!(pie.values, vec![1, 1]);
            }
            other => panic!("expected pie chart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scatter_handler() {
        let Json(chart) = handle_chart_data(
            State(state()),
            Path("scatter".to_string()),
            Query(params(&[("lo", "0"), ("hi", "6000")])),
        )
        .await;
        match chart {
            Chart::Scatter(scatter) => {
                assert_eq!(scatter.point_count(), 3);
                assert_eq!(scatter.series.len(), 2);
            }
            other => panic!("expected scatter chart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scatter_handler_reversed_range() {
        let Json(chart) = handle_chart_data(
            State(state()),
            Path("scatter".to_string()),
            Query(params(&[("lo", "6000"), ("hi", "1000")])),
        )
        .await;
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["chart_type"], "scatter");
        assert_eq!(json["series"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_chart_falls_back_to_pie() {
        let Json(chart) = handle_chart_data(
            State(state()),
            Path("histogram".to_string()),
            Query(HashMap::new()),
        )
        .await;
        assert_eq!(chart.title(), "Total Success vs Failed Launches (All Sites)");
    }

    #[tokio::test]
    async fn test_records_handler() {
        let Json(response) = handle_records(
            State(state()),
            Query(params(&[("site", "KSC LC-39A"), ("hi", "3000")])),
        )
        .await;
        assert_eq!(response.site, "KSC LC-39A");
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0].payload_mass_kg, 2490.0);
    }

    #[tokio::test]
    async fn test_layout_and_health() {
        let state = state();
        let Json(layout) = handle_layout(State(state.clone())).await;
        assert_eq!(layout.site_selector.options.len(), 4);
        assert_eq!(layout.record_count, 4);

        let Json(health) = handle_health(State(state)).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.records, 4);
    }

    #[test]
    fn test_default_assets_are_relative() {
        let assets = AssetDirs::default();
        assert!(assets.static_dir.is_relative());
        assert_eq!(
            assets.templates_dir,
            PathBuf::from("crates/launchboard-gui/templates")
        );
    }

    /// Serves the router on a loopback port; `None` when binding is not allowed.
    async fn spawn_server() -> Option<std::net::SocketAddr> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.ok()?;
        let addr = listener.local_addr().ok()?;
        let assets = AssetDirs::from_root(env!("CARGO_MANIFEST_DIR"));
        let router = create_router(state(), &assets);
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Some(addr)
    }

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> (String, String) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let raw = String::from_utf8_lossy(&raw).to_string();
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let status = head.lines().next().unwrap_or_default().to_string();
        (status, body.to_string())
    }

    #[tokio::test]
    async fn test_router_serves_api() {
        let Some(addr) = spawn_server().await else {
            return;
        };

        let (status, body) =
            http_get(addr, "/api/chart/scatter?site=KSC%20LC-39A&lo=0&hi=3000").await;
        assert!(status.contains("200"), "{status}");
        let chart: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(chart["chart_type"], "scatter");
        assert_eq!(chart["series"][0]["x"], serde_json::json!([2490.0]));

        let (status, body) = http_get(addr, "/api/health").await;
        assert!(status.contains("200"), "{status}");
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(health["records"], 4);

        let (status, _) = http_get(addr, "/api/layout").await;
        assert!(status.contains("200"), "{status}");
    }

    #[tokio::test]
    async fn test_router_serves_page_and_static() {
        let Some(addr) = spawn_server().await else {
            return;
        };

        let (status, body) = http_get(addr, "/").await;
        assert!(status.contains("200"), "{status}");
        assert!(body.contains("site-dropdown"));

        let (status, body) = http_get(addr, "/static/app.js").await;
        assert!(status.contains("200"), "{status}");
        assert!(body.contains("renderSiteOptions"));

        let (status, _) = http_get(addr, "/static/missing.js").await;
        assert!(status.contains("404"), "{status}");
    }
}
