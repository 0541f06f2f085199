use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};

use crate::{config, handlers};

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

pub async fn run(config: &config::Server, services: handlers::Services) -> std::io::Result<()> {
    let services = web::Data::new(services);
    let origins = config.cors_origins.clone();
    let body_limit = config.body_limit;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&origins))
            .app_data(services.clone())
            .app_data(handlers::json_config(body_limit))
            .configure(handlers::configure)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    log::info!("Listening on {}:{}", config.host, config.port);
    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
