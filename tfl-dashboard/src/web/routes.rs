//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::analysis::{
    disruption_alerts, disruption_by_mode, filter_lines, line_options, network_summary,
    search_bus_routes, selected_line_alerts, sorted_bus_table, status_counts, status_options,
};
use crate::planner::{JourneyOutcome, plan, station_names};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/api/summary", get(api_summary))
        .route("/api/lines", get(api_lines))
        .route("/api/bus", get(api_bus))
        .route("/api/stations", get(api_stations))
        .route("/api/stations/map", get(api_station_map))
        .route("/api/journey", get(api_journey))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The dashboard page.
async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let snapshot = state.snapshot().await;
    let stations = snapshot.stations.as_slice();
    let lines = snapshot.lines.as_slice();
    let buses = snapshot.buses.as_slice();

    let selection = query.selection(lines);
    let filtered = filter_lines(lines, &selection.lines, &selection.statuses);

    let journey = match query.journey_stations() {
        Some((from, to)) => {
            let outcome = plan(state.tfl.as_ref(), stations, from, to).await;
            Some(JourneySectionView::from_outcome(&outcome))
        }
        None => None,
    };

    let names = station_names(stations);
    let observed_statuses: Vec<String> = status_options(lines)
        .iter()
        .map(|s| s.to_string())
        .collect();

    let template = DashboardTemplate {
        summary: SummaryView::from_summary(&network_summary(stations, lines)),
        line_options: OptionView::list(&line_options(lines), &selection.lines),
        status_options: OptionView::list(&observed_statuses, &selection.status_names()),
        selected_alerts: selected_line_alerts(lines, &selection.lines)
            .iter()
            .map(AlertView::from_line_alert)
            .collect(),
        disruption_alerts: disruption_alerts(&filtered)
            .into_iter()
            .map(AlertView::disruption)
            .collect(),
        filtered_lines: filtered.iter().map(LineRowView::from_status).collect(),
        route_query: query.route_query().unwrap_or_default().to_string(),
        route_results: query.route_query().map(|route| {
            search_bus_routes(buses, route)
                .into_iter()
                .map(BusRowView::from_bus)
                .collect()
        }),
        bus_table: sorted_bus_table(buses)
            .into_iter()
            .map(BusRowView::from_bus)
            .collect(),
        status_chart: status_chart(&status_counts(lines)),
        mode_chart: mode_chart(&disruption_by_mode(lines)),
        from_options: OptionView::list(&names, query.from.as_slice()),
        to_options: OptionView::list(&names, query.to.as_slice()),
        journey,
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Network KPIs and chart data.
async fn api_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let snapshot = state.snapshot().await;

    Json(SummaryResponse {
        summary: network_summary(&snapshot.stations, &snapshot.lines),
        status_counts: status_counts(&snapshot.lines),
        disruption_by_mode: disruption_by_mode(&snapshot.lines),
    })
}

/// Filtered line statuses.
async fn api_lines(
    State(state): State<AppState>,
    Query(query): Query<LinesQuery>,
) -> Json<LinesResponse> {
    let lines = state.tfl.fetch_line_status(&state.config.line_modes).await;

    let selection = LineSelection::new(query.lines.as_deref(), query.statuses.as_deref(), &lines);
    let filtered = filter_lines(&lines, &selection.lines, &selection.statuses);
    let disruptions = disruption_alerts(&filtered).into_iter().cloned().collect();

    Json(LinesResponse {
        alerts: selected_line_alerts(&lines, &selection.lines),
        lines: filtered,
        disruptions,
    })
}

/// Bus route statuses, or the routes matching `route`.
async fn api_bus(State(state): State<AppState>, Query(query): Query<BusQuery>) -> Json<BusResponse> {
    let buses = state.tfl.fetch_bus_status().await;
    let search = query.route.as_deref().map(str::trim).filter(|r| !r.is_empty());

    let routes = match search {
        Some(route) => search_bus_routes(&buses, route),
        None => sorted_bus_table(&buses),
    };

    Json(BusResponse {
        query: search.map(str::to_string),
        routes: routes.into_iter().cloned().collect(),
    })
}

/// Station names for the journey planner selectors.
async fn api_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state.tfl.fetch_stations(&state.config.station_modes).await;
    Json(StationsResponse {
        stations: station_names(&stations),
    })
}

/// Station map markers.
async fn api_station_map(State(state): State<AppState>) -> Json<MapResponse> {
    let (stations, lines) = tokio::join!(
        state.tfl.fetch_stations(&state.config.station_modes),
        state.tfl.fetch_line_status(&state.config.line_modes),
    );

    Json(MapResponse {
        center: [MAP_CENTER.0, MAP_CENTER.1],
        zoom: MAP_ZOOM,
        markers: station_markers(&stations, &lines),
    })
}

/// Plan journeys between two stations given by name.
async fn api_journey(
    State(state): State<AppState>,
    Query(query): Query<JourneyQuery>,
) -> Result<Response, AppError> {
    let from = query.from.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let to = query.to.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (Some(from), Some(to)) = (from, to) else {
        return Err(AppError::BadRequest {
            message: "Both from and to stations are required".to_string(),
        });
    };

    let stations = state.tfl.fetch_stations(&state.config.station_modes).await;

    match plan(state.tfl.as_ref(), &stations, from, to).await {
        JourneyOutcome::Found(journeys) => Ok(Json(JourneyPlanResponse {
            journeys: journeys.iter().map(JourneyResult::from_journey).collect(),
        })
        .into_response()),
        outcome @ JourneyOutcome::Failed(_) => Err(AppError::Upstream {
            message: outcome.message().unwrap_or_default(),
        }),
        outcome => Ok(Json(MessageResponse {
            message: outcome.message().unwrap_or_default(),
        })
        .into_response()),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => message,
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CachedTflClient};
    use crate::config::DashboardConfig;
    use crate::tfl::{MockTflClient, TflBackend};

    const MOCK_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock_tfl");

    fn mock_state() -> AppState {
        let mock = MockTflClient::new(MOCK_DIR).unwrap();
        let client = CachedTflClient::new(TflBackend::Mock(mock), &CacheConfig::default());
        AppState::new(client, DashboardConfig::default())
    }

    /// State serving whatever fixtures `dir` holds; fetches without one fail.
    fn empty_state(dir: &tempfile::TempDir) -> AppState {
        let mock = MockTflClient::new(dir.path()).unwrap();
        let client = CachedTflClient::new(TflBackend::Mock(mock), &CacheConfig::default());
        AppState::new(client, DashboardConfig::default())
    }

    fn journey_query(from: &str, to: &str) -> Query<JourneyQuery> {
        Query(JourneyQuery {
            from: Some(from.into()),
            to: Some(to.into()),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn summary_from_fixtures() {
        let Json(response) = api_summary(State(mock_state())).await;

        assert_eq!(response.summary.station_count, 7);
        assert_eq!(response.summary.disrupted_line_count, 4);
        assert_eq!(response.summary.affected_station_count, 5);
        assert_eq!(response.disruption_by_mode.tube, 4);
        assert_eq!(response.disruption_by_mode.other, 1);
    }

    #[tokio::test]
    async fn summary_with_upstream_down() {
        let dir = tempfile::tempdir().unwrap();
        let Json(response) = api_summary(State(empty_state(&dir))).await;

        assert_eq!(response.summary.station_count, 0);
        assert_eq!(response.summary.disrupted_line_count, 0);
        assert!(response.status_counts.is_empty());
    }

    #[tokio::test]
    async fn lines_default_to_every_status() {
        let Json(response) = api_lines(State(mock_state()), Query(LinesQuery::default())).await;

        assert_eq!(response.lines.len(), 14);
        assert!(response.alerts.is_empty());
        assert_eq!(response.disruptions.len(), 5);
    }

    #[tokio::test]
    async fn lines_with_empty_status_selection() {
        let query = LinesQuery {
            lines: None,
            statuses: Some(String::new()),
        };
        let Json(response) = api_lines(State(mock_state()), Query(query)).await;

        assert!(response.lines.is_empty());
        assert!(response.disruptions.is_empty());
    }

    #[tokio::test]
    async fn lines_filtered_by_name_and_status() {
        let query = LinesQuery {
            lines: Some("Central,Northern,Victoria".into()),
            statuses: Some("Severe Delays,Good Service".into()),
        };
        let Json(response) = api_lines(State(mock_state()), Query(query)).await;

        let names: Vec<&str> = response.lines.iter().map(|l| l.line_name.as_str()).collect();
        assert_eq!(names, vec!["Northern", "Victoria"]);
        assert_eq!(response.alerts.len(), 3);
        assert_eq!(response.disruptions.len(), 1);
    }

    #[tokio::test]
    async fn bus_table_and_search() {
        let Json(all) = api_bus(State(mock_state()), Query(BusQuery::default())).await;
        let names: Vec<&str> = all.routes.iter().map(|b| b.route_name.as_str()).collect();
        assert_eq!(names, vec!["25", "390", "7", "73", "N73"]);
        assert_eq!(all.query, None);

        let query = BusQuery {
            route: Some("n7".into()),
        };
        let Json(found) = api_bus(State(mock_state()), Query(query)).await;
        assert_eq!(found.query.as_deref(), Some("n7"));
        assert_eq!(found.routes.len(), 1);
        assert_eq!(found.routes[0].route_name, "N73");
    }

    #[tokio::test]
    async fn station_names_sorted() {
        let Json(response) = api_stations(State(mock_state())).await;

        assert_eq!(response.stations.len(), 7);
        assert_eq!(response.stations[0], "Baker Street Underground Station");
    }

    #[tokio::test]
    async fn map_markers() {
        let Json(response) = api_station_map(State(mock_state())).await;

        assert_eq!(response.zoom, 11);
        assert_eq!(response.markers.len(), 7);

        let bank = response
            .markers
            .iter()
            .find(|m| m.name == "Bank Underground Station")
            .unwrap();
        assert_eq!(bank.color, "red");
        assert_eq!(bank.radius, 8);

        let brixton = response
            .markers
            .iter()
            .find(|m| m.name == "Brixton Underground Station")
            .unwrap();
        assert_eq!(brixton.color, "green");
    }

    #[tokio::test]
    async fn journey_found() {
        let response = api_journey(
            State(mock_state()),
            journey_query("bank underground station", "Oxford Circus Underground Station"),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("\"journeys\""));
        assert!(body.contains("\"mode_minutes\""));
    }

    #[tokio::test]
    async fn journey_same_station_is_a_message() {
        let state = mock_state();
        let response = api_journey(
            State(state),
            journey_query("Bank Underground Station", "Bank Underground Station"),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Start and end stations are the same."));
    }

    #[tokio::test]
    async fn journey_requires_both_stations() {
        let query = Query(JourneyQuery {
            from: Some("Bank Underground Station".into()),
            to: None,
        });
        let err = api_journey(State(mock_state()), query).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn journey_upstream_failure_is_bad_gateway() {
        // Stations resolve, but there is no journey fixture.
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(
            format!("{MOCK_DIR}/stops_tube.json"),
            dir.path().join("stops_tube.json"),
        )
        .unwrap();

        let err = api_journey(
            State(empty_state(&dir)),
            journey_query("Bank Underground Station", "Brixton Underground Station"),
        )
        .await
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(response).await.contains("API request failed"));
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let Html(html) = dashboard_page(State(mock_state()), Query(DashboardQuery::default()))
            .await
            .unwrap();

        assert!(html.contains("Network Summary"));
        assert!(html.contains("Waterloo &amp; City"));
        assert!(!html.contains("Option 1"));
    }

    #[tokio::test]
    async fn dashboard_with_journey_and_route_search() {
        let query = DashboardQuery {
            route: Some("390".into()),
            from: Some("Bank Underground Station".into()),
            to: Some("Oxford Circus Underground Station".into()),
            ..DashboardQuery::default()
        };
        let Html(html) = dashboard_page(State(mock_state()), Query(query))
            .await
            .unwrap();

        assert!(html.contains("Option 1"));
        assert!(html.contains("Option 2"));
        assert!(html.contains("Mode summary"));
    }

    #[tokio::test]
    async fn dashboard_renders_with_upstream_down() {
        let dir = tempfile::tempdir().unwrap();
        let Html(html) = dashboard_page(State(empty_state(&dir)), Query(DashboardQuery::default()))
            .await
            .unwrap();

        assert!(html.contains("All selected lines are running with Good Service."));
    }
}
