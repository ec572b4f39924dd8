mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use actix_web::middleware::NormalizePath;
use actix_cors::Cors;
use config::Config;
use services::{accounts::AccountStore, gazetteer::Gazetteer};
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Starting RuralCare on {}:{}", config.host, config.port);
    log::info!("Database: {}", config.database_url);

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let accounts = AccountStore::new(pool, config.bcrypt_cost);

    let gazetteer = Gazetteer::load_or_unavailable(&config.city_dataset);
    if gazetteer.is_available() && gazetteer.is_empty() {
        log::warn!("City dataset {} has no usable rows", config.city_dataset.display());
    } else {
        log::info!(
            "Loaded {} cities from {}",
            gazetteer.len(),
            config.city_dataset.display()
        );
    }

    let app_state = web::Data::new(AppState::new(accounts, gazetteer, config.specialist_count));

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .route("/", web::get().to(handlers::main))
            .route("/health", web::get().to(handlers::health_check))

            .route("/api/auth/signup", web::post().to(handlers::auth::signup))
            .route("/api/auth/login", web::post().to(handlers::auth::login))
            .route("/api/auth/check-user", web::get().to(handlers::auth::email_exists))

            .route("/api/cities/validate", web::get().to(handlers::cities::validate_city))
            .route("/api/cities/coordinates", web::get().to(handlers::cities::city_coordinates))

            .route("/api/specialists/categories", web::get().to(handlers::specialists::get_categories))
            .route("/api/specialists/search", web::post().to(handlers::specialists::search))
            .route("/api/specialists/select", web::post().to(handlers::specialists::select))
            .route("/api/specialists/reset", web::post().to(handlers::specialists::reset))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
