mod config;
mod detector;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use detector::DetectorClient;
use routes::configure_routes;
use std::env;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let detector = DetectorClient::new(config.detector_url.clone(), config.detector_timeout)
        .map_err(|e| {
            log::error!("Failed to build detector client: {}", e);
            io::Error::other(e.to_string())
        })?;

    if !config.frontend_dir.is_dir() {
        log::warn!(
            "Frontend directory {} does not exist; build the frontend with `trunk build`.",
            config.frontend_dir.display()
        );
    }

    log::info!("Detector endpoint: {}", config.detector_url);
    log::info!(
        "Detector timeout: {}s, max payload: {} bytes",
        config.detector_timeout.as_secs(),
        config.max_payload_bytes
    );

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    let detector = web::Data::new(detector);
    let frontend_dir = config.frontend_dir.clone();
    let max_payload_bytes = config.max_payload_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(detector.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone(), max_payload_bytes))
    })
    .bind(&bind_address)?
    .run()
    .await
}
