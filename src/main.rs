use std::io;
use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use order_pricing::application::order_service::OrderService;
use order_pricing::domain::ports::Clock;
use order_pricing::infrastructure::clock::SystemClock;
use order_pricing::infrastructure::product_catalog::InMemoryProductCatalog;
use order_pricing::infrastructure::quote_repo::InMemoryQuoteRepository;
use order_pricing::infrastructure::quote_sweeper::spawn_quote_sweeper;
use order_pricing::{build_server, AppConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let quotes = InMemoryQuoteRepository::new(clock.clone());

    if let Some(every) = config.quote_sweep_interval {
        log::info!("Sweeping expired quotes every {:?}", every);
        spawn_quote_sweeper(quotes.clone(), clock.clone(), every);
    }

    let service = OrderService::new(InMemoryProductCatalog::seeded(), quotes, clock)
        .with_quote_ttl(config.quote_ttl());

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!(
        "Swagger UI available at http://{}:{}/api-docs/",
        config.host,
        config.port
    );

    build_server(web::Data::new(service), &config.host, config.port)?.await
}
