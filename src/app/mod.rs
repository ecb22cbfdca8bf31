//! 应用层：路由、处理器与共享状态

pub mod home;
pub mod pages;
pub mod probe;
pub mod product;

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::infrastructure::database::DatabaseManager;
use pages::Templates;
use probe::service::{ConnectivityProbe, MySqlProbe};
use product::service::ProductService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 请求共享状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub product_service: ProductService,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Wires the MySQL probe and a lazily connected pool from `config`.
    pub fn new(config: AppConfig) -> Result<Self, minijinja::Error> {
        let probe = Arc::new(MySqlProbe::new(&config.database));
        Self::with_probe(config, probe)
    }

    pub fn with_probe(
        config: AppConfig,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Result<Self, minijinja::Error> {
        let database = DatabaseManager::connect_lazy(&config.database);
        Ok(Self {
            product_service: ProductService::new(database.get_pool().clone()),
            templates: Arc::new(Templates::load()?),
            config: Arc::new(config),
            probe,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    // One span per request; the completed response is logged at INFO.
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(home::handler::index))
        .route("/db-test", get(probe::handler::db_test_page))
        .route("/api/health/db", get(probe::handler::db_health))
        .route("/api/products", get(product::handler::list_products))
        .route("/api/products/:id", get(product::handler::get_product))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(trace)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
