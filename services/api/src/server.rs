use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::scoring_router;
use axum_prometheus::PrometheusMetricLayer;
use intro_rubric::config::AppConfig;
use intro_rubric::error::AppError;
use intro_rubric::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let engine = Arc::new(build_engine(&config.scoring)?);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine,
        scoring: config.scoring,
    };

    let app = scoring_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_duration_sec = config.scoring.default_duration_sec,
        "transcript scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
