use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_office_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_office::config::AppConfig;
use estate_office::error::AppError;
use estate_office::office::OfficeService;
use estate_office::telemetry;
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

    let office = Arc::new(OfficeService::from_config(&config.office));

    let app = with_office_routes(office)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, region = %config.office.region, "estate office backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
