use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_registration_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use registration::config::AppConfig;
use registration::error::AppError;
use registration::intake::{EntropySource, RegistrationService, SeededEntropy, ThreadEntropy};
use registration::telemetry;
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
    if let Some(seed) = args.seed.take() {
        config.registration.seed = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    match config.registration.seed {
        Some(seed) => {
            info!(seed, "serving with a fixed random seed");
            serve(config, SeededEntropy::new(seed)).await
        }
        None => serve(config, ThreadEntropy).await,
    }
}

async fn serve<E>(config: AppConfig, entropy: E) -> Result<(), AppError>
where
    E: EntropySource + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(RegistrationService::new(
        Arc::new(entropy),
        config.registration.celebration_pieces,
    ));

    let app = with_registration_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "student registration form ready");

    axum::serve(listener, app).await?;
    Ok(())
}
