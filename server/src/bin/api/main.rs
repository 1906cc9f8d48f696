use destination_relay::app_state::AppState;
use destination_relay::database::Database;
use destination_relay::environment::Environment;
use destination_relay::http_gateway::HttpGateway;
use destination_relay_server::routes::Routes;
use sqlx::{Pool, Postgres};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::log::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO,sqlx::postgres::notice=WARN,sqlx::query=WARN");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let db_config = Database::from_env();
    let postgres_pool: Pool<Postgres> = db_config.create_db_pool().await?;
    Database::run_migrations(&postgres_pool).await?;

    let http_gateway = HttpGateway::new(Environment::u64("HTTP_TIMEOUT_IN_MILLIS", 3000))?;

    let app_state = AppState { postgres_pool, http_gateway };

    init_http_server(app_state).await;

    info!("Stopped!");

    Ok(())
}

async fn init_http_server(app_state: AppState) {
    info!("Starting http server...");
    let routes = Routes::routes(&app_state).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], Environment::u16("HTTP_PORT", 9095)));

    if let Ok(listener) = TcpListener::bind(addr).await {
        info!("Running http server...");
        let _ = axum::serve(listener, routes).with_graceful_shutdown(shutdown_signal("Stopping http server...")).await;
    }

    info!("Http server stopped!");
}

async fn shutdown_signal(message: &str) {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("{message}");
}
