use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_gradebook_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gradebook::academics::{GradebookService, JsonFileStore};
use gradebook::config::AppConfig;
use gradebook::error::AppError;
use gradebook::telemetry;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(&config.storage)?);
    let store = Arc::new(JsonFileStore::new(config.storage.snapshot_path.clone()));
    let service = Arc::new(GradebookService::new(store, catalog)?);

    let app = with_gradebook_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        snapshot = %config.storage.snapshot_path.display(),
        "gradebook service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
