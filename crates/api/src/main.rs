use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use natal_core::domain::request::{ChartRequest, HouseSystem, SelectionState};
use natal_core::ingest::provider::{ChartService, HttpChartService};
use natal_core::time::calendar::day_options;
use natal_core::view::surface::ViewState;
use natal_core::viewer::{ChartViewer, FetchOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = natal_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let viewer = match HttpChartService::from_settings(&settings) {
        Ok(service) => {
            Some(Arc::new(ChartViewer::new(service).with_chart_size(settings.chart_size_px)))
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "chart service unavailable; starting API in degraded mode");
            None
        }
    };

    let app = router(AppState { viewer }).layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router<S: ChartService + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/view", get(get_view::<S>))
        .route("/api/form", get(get_form))
        .route("/api/house-systems", get(get_house_systems))
        .route("/api/days", get(get_days))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

struct AppState<S> {
    viewer: Option<Arc<ChartViewer<S>>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            viewer: self.viewer.clone(),
        }
    }
}

type ApiError = (StatusCode, String);

#[derive(Debug, Serialize)]
struct ApiView {
    outcome: FetchOutcome,
    view: ViewState,
}

async fn get_view<S: ChartService + 'static>(
    State(state): State<AppState<S>>,
    Query(req): Query<ChartRequest>,
) -> Result<(StatusCode, Json<ApiView>), ApiError> {
    let Some(viewer) = &state.viewer else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "chart service is not configured".to_string(),
        ));
    };

    req.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;

    // Every HTTP request renders onto its own surface.
    let mut view = ViewState::default();
    let outcome = viewer.fetch(&req, &mut view).await.map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "chart request failed");
        (StatusCode::BAD_GATEWAY, format!("{e:#}"))
    })?;

    let status = match outcome {
        FetchOutcome::Rendered { .. } => StatusCode::OK,
        FetchOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    Ok((status, Json(ApiView { outcome, view })))
}

#[derive(Debug, Serialize)]
struct ApiHouseSystem {
    label: &'static str,
    code: char,
}

async fn get_house_systems() -> Json<Vec<ApiHouseSystem>> {
    Json(
        HouseSystem::ALL
            .iter()
            .map(|hs| ApiHouseSystem {
                label: hs.label(),
                code: hs.code(),
            })
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
struct DaysQuery {
    year: i32,
    month: u32,
}

#[derive(Debug, Serialize)]
struct ApiDays {
    days: Vec<u32>,
}

async fn get_days(Query(q): Query<DaysQuery>) -> Result<Json<ApiDays>, ApiError> {
    if !(1..=12).contains(&q.month) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("month must be 1..=12 (got {})", q.month),
        ));
    }
    Ok(Json(ApiDays {
        days: day_options(q.year, q.month),
    }))
}

#[derive(Debug, Serialize)]
struct ApiForm {
    years: Vec<i32>,
    months: Vec<u32>,
    days: Vec<u32>,
    hours: Vec<u32>,
    minutes: Vec<u32>,
    defaults: ChartRequest,
}

async fn get_form() -> Json<ApiForm> {
    Json(form_for(chrono::Local::now().date_naive()))
}

fn form_for(today: NaiveDate) -> ApiForm {
    let defaults = SelectionState::defaults_at(today);
    ApiForm {
        years: SelectionState::year_options(today),
        months: (1..=12).collect(),
        days: day_options(defaults.year, defaults.month),
        hours: (0..=23).collect(),
        minutes: (0..=59).collect(),
        defaults: defaults.to_request(),
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &natal_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
