use crate::cli::ServeArgs;
use crate::infra::{open_catalog, AppState, InMemoryAssessmentRepository};
use crate::routes::with_assessment_routes;
use archetype_assessment::assessment::{AssessmentService, ScoringEngine};
use archetype_assessment::config::AppConfig;
use archetype_assessment::error::AppError;
use archetype_assessment::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(open_catalog(&config.catalog)?);
    let categories = catalog.len();
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let assessment_service = Arc::new(AssessmentService::new(
        catalog,
        repository,
        ScoringEngine::default(),
    ));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, categories, "archetype assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
