pub mod application;
pub mod config;
pub mod docs;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use infrastructure::product_catalog::InMemoryProductCatalog;
use infrastructure::quote_repo::InMemoryQuoteRepository;

pub use config::AppConfig;

/// The service wired with the in-memory adapters the server runs on.
pub type AppService = OrderService<InMemoryProductCatalog, InMemoryQuoteRepository>;

/// Register the `/v1/orders` routes. Expects `web::Data<AppService>` in app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/orders")
            .app_data(handlers::orders::json_config())
            .route("", web::post().to(handlers::orders::finalize_order))
            .route("/quote", web::post().to(handlers::orders::create_quote))
            .route("/calculate", web::post().to(handlers::orders::calculate_order)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<AppService>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = docs::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(routes)
            .service(
                SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
