use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_underwriting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use underwriter::config::AppConfig;
use underwriter::error::AppError;
use underwriter::telemetry;
use underwriter::workflows::underwriting::{
    EnrichmentSources, InMemoryApplicationRepository, UnderwritingService,
};

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

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let enrichment = EnrichmentSources::from_config(&config.enrichment);
    let underwriting_service = Arc::new(UnderwritingService::new(repository, enrichment));

    let app = with_underwriting_routes(underwriting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        enrichment = config.enrichment.enabled,
        "restaurant underwriter ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
