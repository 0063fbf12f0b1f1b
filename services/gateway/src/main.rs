use std::time::Duration;

use tracing::info;

use uco_auth_types::token::TokenSettings;
use uco_gateway::config::GatewayConfig;
use uco_gateway::router::build_router;
use uco_gateway::state::AppState;

#[tokio::main]
async fn main() {
    uco_core::tracing::init_tracing();

    let config = GatewayConfig::from_env();
    let tokens = TokenSettings {
        secret: config.jwt_secret,
        issuer: config.jwt_issuer,
        audience: config.jwt_audience,
    };
    let state = AppState::new(
        tokens,
        &config.users_service_url,
        Duration::from_secs(config.upstream_timeout_secs),
    )
    .expect("failed to build gateway state");

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.gateway_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gateway listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
