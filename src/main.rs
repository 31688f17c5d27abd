use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use linkshrink::config::AppConfig;
use linkshrink::db::open_store;
use linkshrink::routes::init_routes;
use linkshrink::state::app_state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let store = open_store(&config).context("Error opening the mapping store")?;

    // Create shared state
    let app_state = web::Data::new(AppState::from_config(&config, store));
    info!(
        "Serving short links on {}:{} ({} resolver), public base {}",
        config.bind_addr,
        config.port,
        app_state.resolver.mode_name(),
        config.public_base_url
    );

    let cors_origins = config.cors_origins.clone();
    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
