use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pilot_locator::config::{LoggingSettings, Settings};
use pilot_locator::core::QueryEngine;
use pilot_locator::routes::{self, pilots::AppState};
use pilot_locator::services::build_source;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; `RUST_LOG` overrides the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting Pilot Locator service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        startup_error(e)
    })?;

    info!("Configuration loaded successfully");

    let defaults = settings.query.to_parameters().map_err(|e| {
        error!("Invalid query defaults: {}", e);
        startup_error(e)
    })?;

    let source = build_source(&settings.source).map_err(|e| {
        error!("Failed to initialize pilot source: {}", e);
        startup_error(e)
    })?;

    info!("Pilot source initialized: {}", source.describe());

    let engine = QueryEngine::new(defaults);

    info!("Query engine initialized with defaults: {:?}", engine.defaults());

    let app_state = AppState {
        source,
        engine,
        max_limit: settings.query.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
