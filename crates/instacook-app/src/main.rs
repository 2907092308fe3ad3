use instacook_app::app::api::routes;
use instacook_app::config::ConfigHandler;
use instacook_app::db_handler::DbProviderHandler;
use instacook_core::config::load_config;
use instacook_db::db::connection::create_pool;
use instacook_db::db::migrate::run_migrations;
use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting InstaCook recipe API");

    let config = load_config()?;

    // The database URL may carry a password, so only the safe parts are logged.
    tracing::info!(
        server = ?config.server,
        auth = ?config.auth,
        pagination = ?config.pagination,
        pool_size = config.database.max_connections,
        "Configuration loaded"
    );

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    if config.database.run_migrations {
        run_migrations(&config.database.url).await?;
    }

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(salvo::logging::Logger::new())
        .hoop(DbProviderHandler::new(pool))
        .hoop(ConfigHandler::new(config))
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
