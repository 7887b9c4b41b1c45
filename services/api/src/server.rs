use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use purchase_desk::config::AppConfig;
use purchase_desk::error::AppError;
use purchase_desk::purchasing::PurchaseDeskService;
use purchase_desk::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, SqlitePurchaseGateway};
use crate::routes::with_desk_routes;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = Arc::new(SqlitePurchaseGateway::new(&config.database));
    let desk = Arc::new(PurchaseDeskService::new(gateway, &config.matching));

    let app = with_desk_routes(desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.database.path.display(),
        "purchase desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
