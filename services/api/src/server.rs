use crate::cli::ServeArgs;
use crate::infra::{AppState, SessionStore};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use funding_kitchen::config::AppConfig;
use funding_kitchen::error::AppError;
use funding_kitchen::telemetry;
use funding_kitchen::workflows::matching::MatchClient;
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
    let matcher = MatchClient::new(config.match_service.clone())?;
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        sessions: Arc::new(SessionStore::default()),
        matcher: Arc::new(matcher),
    };

    let app = with_intake_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        match_service = %config.match_service.base_url,
        "funding kitchen intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
