use std::net::SocketAddr;
use std::sync::Arc;

use livadai_api::{
    app,
    app_config::Config,
    state::{AppState, AuthConfig},
};
use livadai_booking::EligibilityEvaluator;
use livadai_core::SystemClock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "livadai_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting LIVADAI API on port {}", config.server.port);

    let policy = config.windows.policy()?;
    tracing::debug!(?policy, "window policy loaded");

    let app_state = AppState {
        clock: Arc::new(SystemClock),
        evaluator: EligibilityEvaluator::new(policy),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
