use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use taskledger::config::Config;
use taskledger::routes;
use taskledger::state::AppState;
use taskledger::store::{MemoryStore, PgStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            store
                .migrate()
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            log::info!("connected to Postgres, schema is up to date");
            AppState::with_store(Arc::new(store), &config)
        }
        None => {
            log::warn!("DATABASE_URL is not set; using the in-memory store, data will not survive a restart");
            AppState::with_store(Arc::new(MemoryStore::new()), &config)
        }
    };
    let state = web::Data::new(state);

    log::info!("starting taskledger server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::configure(cfg, state))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
