use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockboard_core::domain::columns::Column;
use stockboard_core::domain::detail::StockDetail;
use stockboard_core::domain::filter::FilterState;
use stockboard_core::domain::stats::Summary;
use stockboard_core::domain::view::{Page, SortDirection, SortSpec, ViewQuery};
use stockboard_core::ingest::source::CsvFileSource;
use stockboard_core::dataset::DatasetMeta;
use stockboard_core::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let source = CsvFileSource::new(&settings.csv_path);
    let dataset = match stockboard_core::load_dataset(&source).await {
        Ok(ds) => Some(Arc::new(ds)),
        Err(e) if e.is_empty_dataset() => {
            tracing::warn!(
                path = %settings.csv_path.display(),
                "stock data file has no valid rows; starting API in degraded mode"
            );
            None
        }
        Err(e) => {
            let err = anyhow::Error::new(e);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(
                path = %settings.csv_path.display(),
                error = %err,
                "stock data load failed; starting API in degraded mode"
            );
            None
        }
    };

    let state = AppState {
        dataset,
        default_page_size: settings.default_page_size,
    };

    let app = router(state);

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

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/meta", get(get_meta))
        .route("/stocks", get(get_stocks))
        .route("/stocks/:symbol", get(get_stock))
        .route("/summary", get(get_summary))
        .route("/sectors", get(get_sectors))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    dataset: Option<Arc<Dataset>>,
    default_page_size: usize,
}

impl AppState {
    fn dataset(&self) -> Result<&Dataset, StatusCode> {
        self.dataset
            .as_deref()
            .ok_or(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[derive(Debug, Default, Deserialize)]
struct StocksQuery {
    sector: Option<String>,
    recommendation: Option<String>,
    min_confidence: Option<u8>,
    search: Option<String>,
    sort: Option<String>,
    dir: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

impl StocksQuery {
    fn into_view_query(self, default_page_size: usize) -> Result<ViewQuery, StatusCode> {
        let mut sort = SortSpec::default();
        if let Some(key) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            sort.column = Column::from_key(key).ok_or(StatusCode::BAD_REQUEST)?;
        }
        if let Some(dir) = self.dir.as_deref().filter(|s| !s.trim().is_empty()) {
            sort.direction = SortDirection::from_key(dir).ok_or(StatusCode::BAD_REQUEST)?;
        }

        Ok(ViewQuery {
            filter: FilterState::new(
                self.sector.unwrap_or_default(),
                self.recommendation.unwrap_or_default(),
                self.min_confidence.unwrap_or(0),
            ),
            search: self.search,
            sort,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(default_page_size),
        })
    }
}

async fn get_meta(State(state): State<AppState>) -> Result<Json<DatasetMeta>, StatusCode> {
    let ds = state.dataset()?;
    Ok(Json(ds.meta()))
}

async fn get_stocks(
    State(state): State<AppState>,
    Query(query): Query<StocksQuery>,
) -> Result<Json<Page>, StatusCode> {
    let ds = state.dataset()?;
    let query = query.into_view_query(state.default_page_size)?;
    Ok(Json(ds.view(&query)))
}

async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockDetail>, StatusCode> {
    let ds = state.dataset()?;
    ds.detail(&symbol).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, StatusCode> {
    let ds = state.dataset()?;
    Ok(Json(ds.summary()))
}

async fn get_sectors(State(state): State<AppState>) -> Result<Json<Vec<String>>, StatusCode> {
    let ds = state.dataset()?;
    Ok(Json(ds.sectors()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &stockboard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
