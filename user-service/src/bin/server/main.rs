use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use axum::Router;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::auth::ports::AuthServicePort;
use user_service::domain::auth::service::AuthService;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

fn build_application<UR: UserRepository>(
    user_repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(user_repository, authenticator));

    create_router(user_service, auth_service)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        token_lifetime_minutes = config.auth.token_lifetime_minutes,
        "Configuration loaded"
    );

    // One key per process; every token dies with it.
    let signing_key = Arc::new(SigningKey::generate());
    let authenticator = Arc::new(Authenticator::new(
        signing_key,
        Duration::minutes(config.auth.token_lifetime_minutes),
    ));

    let http_application = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(Arc::new(PostgresUserRepository::new(pg_pool)), authenticator)
        }
        None => {
            tracing::warn!("No database URL configured, users are kept in memory");
            build_application(Arc::new(InMemoryUserRepository::new()), authenticator)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
