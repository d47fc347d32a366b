use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::data::post_store::JsonFilePostStore;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::RequestContext;

/// Mounts the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::health::health)
            .service(handlers::post::scope()),
    );
}

pub fn build_post_service(config: &AppConfig) -> PostService {
    let store = Arc::new(JsonFilePostStore::new(&config.posts_file));
    PostService::new(Arc::new(PostRepository::new(store)))
}

pub async fn start_rest_server(config: AppConfig) -> anyhow::Result<()> {
    let post_service = build_post_service(&config);
    let bind_address = (config.host.clone(), config.port);

    info!(
        host = %bind_address.0,
        port = bind_address.1,
        posts_file = %config.posts_file.display(),
        "HTTP server starting"
    );

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .wrap(RequestContext)
            .app_data(web::Data::new(post_service.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config
        .cors_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
