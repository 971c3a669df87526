use std::io;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use category_api::db::{establish_sized_connection_pool, run_migrations};
use category_api::models::config::ServerConfig;
use category_api::repository::DieselRepository;
use category_api::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_sized_connection_pool(&server_config.database_url, server_config.pool_size)
        .map_err(|e| {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            io::Error::other(e)
        })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("{e}");
        io::Error::other(e)
    })?;

    let repo = web::Data::new(DieselRepository::new(pool));

    log::info!(
        "Serving category API on http://{}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .configure(routes::configure)
    })
    .bind(server_config.bind_address())?
    .run()
    .await
}
