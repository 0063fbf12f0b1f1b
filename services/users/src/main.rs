use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use uco_users::config::UsersConfig;
use uco_users::infra::notification::HttpNotificationClient;
use uco_users::infra::parameters::HttpParametersClient;
use uco_users::router::build_router;
use uco_users::state::AppState;

#[tokio::main]
async fn main() {
    uco_core::tracing::init_tracing();

    let config = UsersConfig::from_env();
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let notifier = HttpNotificationClient::new(
        &config.notification_api_url,
        &config.notification_api_key,
        timeout,
    )
    .expect("invalid NOTIFICATION_API_URL");
    let parameters = HttpParametersClient::new(&config.parameters_service_url, timeout)
        .expect("invalid PARAMETERS_SERVICE_URL");

    let state = AppState {
        db,
        redis,
        notifier,
        parameters,
        admin_email: config.admin_email,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.users_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("users service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
