use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use addressbook_core::db::open_pool;
use addressbook_core::init_logging;
use addressbook_server::middleware::process_time;
use addressbook_server::{routes, AppState, ServerConfig};
use log::{error, info};

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(std::io::Error::other)?;

    let pool = open_pool(&config.db_path, config.pool_size).map_err(|err| {
        error!(
            "event=server_start module=server status=error db_path={} error={}",
            config.db_path.display(),
            err
        );
        std::io::Error::other(err)
    })?;
    let state = web::Data::new(AppState::new(pool));

    info!(
        "event=server_start module=server status=ok bind={} pool_size={}",
        config.bind_addr, config.pool_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(from_fn(process_time))
            .configure(routes::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
