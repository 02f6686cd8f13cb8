//! Dashboard HTTP server.
//!
//! Routes:
//! - `/`: dashboard page
//! - `/api/options`: dropdown options and slider defaults
//! - `/api/charts/pie`, `/api/charts/scatter`: Plotly figure JSON
//! - `/charts/pie.svg`, `/charts/scatter.svg`: static renderings
//! - `/api/booster-success`: success rate per booster category

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::charts::{
    ChartPlotter, Figure, RenderError, StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::data::{
    DataProcessor, LaunchTable, LoaderError, PayloadBounds, PayloadRange, SiteSelection, ALL_SITES,
};
use crate::stats::{BoosterSuccessRate, StatsCalculator};
use crate::web::page::{site_options, DropdownOption, SliderConfig, INDEX_HTML};

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    table: LaunchTable,
    sites: Vec<String>,
    bounds: PayloadBounds,
    slider: SliderConfig,
}

impl AppState {
    /// Build the derived lookups once from the loaded table.
    pub fn new(table: LaunchTable, slider: SliderConfig) -> Result<Self, LoaderError> {
        let bounds = DataProcessor::payload_bounds(&table).ok_or(LoaderError::NoData)?;
        let sites = DataProcessor::launch_sites(&table);
        info!(
            "Dashboard state: {} launches, {} sites, payload {}..{} kg",
            table.len(),
            sites.len(),
            bounds.low,
            bounds.high
        );

        Ok(Self {
            table,
            sites,
            bounds,
            slider,
        })
    }

    /// Fill missing ends from the observed bounds and validate.
    fn resolve_range(&self, low: Option<f64>, high: Option<f64>) -> Result<PayloadRange, AppError> {
        let low = low.unwrap_or(self.bounds.low);
        let high = high.unwrap_or(self.bounds.high);
        PayloadRange::new(low, high).ok_or(AppError::InvalidRange { low, high })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid payload range [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },
    #[error("Chart rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    site_options: Vec<DropdownOption>,
    default_site: &'static str,
    slider: SliderConfig,
    payload_default: PayloadBounds,
    row_count: usize,
}

#[derive(Debug, Deserialize)]
struct PieQuery {
    #[serde(default)]
    site: SiteSelection,
}

#[derive(Debug, Deserialize)]
struct ScatterQuery {
    #[serde(default)]
    site: SiteSelection,
    low: Option<f64>,
    high: Option<f64>,
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn options_handler(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        site_options: site_options(&state.sites),
        default_site: ALL_SITES,
        slider: state.slider.clone(),
        payload_default: state.bounds,
        row_count: state.table.len(),
    })
}

fn pie_figure(state: &AppState, query: &PieQuery) -> Figure {
    debug!(site = %query.site, "pie chart");
    ChartPlotter::pie_chart(&state.table, &query.site)
}

fn scatter_figure(state: &AppState, query: &ScatterQuery) -> Result<Figure, AppError> {
    let range = state.resolve_range(query.low, query.high)?;
    let figure = ChartPlotter::scatter_chart(&state.table, &query.site, range);
    debug!(
        site = %query.site,
        low = range.low,
        high = range.high,
        points = figure.point_count(),
        "scatter chart"
    );
    Ok(figure)
}

fn svg_response(figure: &Figure) -> Result<Response, AppError> {
    let svg = StaticChartRenderer::render_svg(figure, DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn pie_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PieQuery>,
) -> Json<Figure> {
    Json(pie_figure(&state, &query))
}

async fn scatter_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<Figure>, AppError> {
    scatter_figure(&state, &query).map(Json)
}

async fn pie_svg_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PieQuery>,
) -> Result<Response, AppError> {
    svg_response(&pie_figure(&state, &query))
}

async fn scatter_svg_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScatterQuery>,
) -> Result<Response, AppError> {
    svg_response(&scatter_figure(&state, &query)?)
}

async fn booster_handler(State(state): State<Arc<AppState>>) -> Json<Vec<BoosterSuccessRate>> {
    Json(StatsCalculator::booster_success_rates(&state.table))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/options", get(options_handler))
        .route("/api/charts/pie", get(pie_handler))
        .route("/api/charts/scatter", get(scatter_handler))
        .route("/charts/pie.svg", get(pie_svg_handler))
        .route("/charts/scatter.svg", get(scatter_svg_handler))
        .route("/api/booster-success", get(booster_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_table;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(sample_table(), SliderConfig::default()).unwrap();
        router(Arc::new(state))
    }

    async fn get_response(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(uri: &str) -> Value {
        let (status, body) = get_response(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn empty_table_has_no_state() {
        let table = LaunchTable::from_records(Vec::new());
        assert!(matches!(
            AppState::new(table, SliderConfig::default()),
            Err(LoaderError::NoData)
        ));
    }

    #[tokio::test]
    async fn index_serves_page() {
        let (status, body) = get_response("/").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("SpaceX Launch Records Dashboard"));
    }

    #[tokio::test]
    async fn options_list_sites_and_defaults() {
        let json = get_json("/api/options").await;

        assert_eq!(json["default_site"], "ALL");
        assert_eq!(json["site_options"][0]["value"], "ALL");
        assert_eq!(json["site_options"][1]["label"], "CCAFS LC-40");
        assert_eq!(json["site_options"].as_array().unwrap().len(), 5);
        assert_eq!(json["payload_default"]["low"], 0.0);
        assert_eq!(json["payload_default"]["high"], 9600.0);
        assert_eq!(json["slider"]["step"], 1000);
        assert_eq!(json["row_count"], 12);
    }

    #[tokio::test]
    async fn pie_defaults_to_all_sites() {
        let json = get_json("/api/charts/pie").await;
        assert_eq!(json["layout"]["title"]["text"], "Total Successful Launches by Site");
        let total: u64 = json["data"][0]["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn blank_site_falls_back_to_all_sites() {
        let json = get_json("/api/charts/pie?site=").await;
        assert_eq!(json["layout"]["title"]["text"], "Total Successful Launches by Site");

        let json = get_json("/api/charts/scatter?site=").await;
        assert_eq!(json["layout"]["title"]["text"], "Payload vs. Outcome for All Sites");
    }

    #[tokio::test]
    async fn pie_for_one_site() {
        let json = get_json("/api/charts/pie?site=KSC%20LC-39A").await;
        assert_eq!(json["data"][0]["labels"][0], "Success");
        assert_eq!(json["data"][0]["values"][0], 3);
        assert_eq!(json["data"][0]["values"][1], 1);
    }

    #[tokio::test]
    async fn scatter_defaults_to_full_range() {
        let json = get_json("/api/charts/scatter").await;
        let points: usize = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|trace| trace["x"].as_array().unwrap().len())
            .sum();
        assert_eq!(points, 12);
    }

    #[tokio::test]
    async fn scatter_filters_site_and_range() {
        let json = get_json("/api/charts/scatter?site=CCAFS%20LC-40&low=500&high=1000").await;
        assert_eq!(json["layout"]["title"]["text"], "Payload vs. Outcome for Site CCAFS LC-40");
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["x"], serde_json::json!([525.0, 677.0]));
    }

    #[tokio::test]
    async fn inverted_range_is_bad_request() {
        let (status, body) = get_response("/api/charts/scatter?low=5000&high=1000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("Invalid payload range"));
    }

    #[tokio::test]
    async fn malformed_number_is_rejected() {
        let (status, _) = get_response("/api/charts/scatter?low=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // Font-less hosts cannot lay out text; the router reports that as a 500
    fn skip_without_fonts(status: StatusCode, body: &[u8]) -> bool {
        status == StatusCode::INTERNAL_SERVER_ERROR
            && String::from_utf8_lossy(body).to_lowercase().contains("font")
    }

    #[tokio::test]
    async fn pie_svg_is_served_as_svg() {
        let response = test_router()
            .oneshot(Request::builder().uri("/charts/pie.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if skip_without_fonts(status, &body) {
            return;
        }

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.unwrap(), "image/svg+xml");
        let svg = String::from_utf8(body.to_vec()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Total Successful Launches by Site"));
    }

    #[tokio::test]
    async fn scatter_svg_validates_range() {
        let (status, _) = get_response("/charts/scatter.svg?low=5000&high=1000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get_response("/charts/scatter.svg?site=KSC%20LC-39A").await;
        if skip_without_fonts(status, &body) {
            return;
        }
        assert_eq!(status, StatusCode::OK);
        let svg = String::from_utf8(body).unwrap();
        assert!(svg.contains("Payload vs. Outcome for Site KSC LC-39A"));
    }

    #[tokio::test]
    async fn booster_summary_is_sorted() {
        let json = get_json("/api/booster-success").await;
        assert_eq!(json[0]["category"], "B4");
        assert_eq!(json[0]["success_rate"], 1.0);
        assert_eq!(json[1]["category"], "FT");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _) = get_response("/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
