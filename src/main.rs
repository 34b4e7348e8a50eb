use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dream_itinerary_api::{config::AppConfig, routes, services::itinerary_service::ItineraryService};
use env_logger::Env;
use log::{error, info};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let config = AppConfig::from_env();

    if let Err(e) = std::fs::create_dir_all(&config.images_dir) {
        error!(
            "Error creating images directory {}: {}",
            config.images_dir.display(),
            e
        );
    }

    let service = ItineraryService::new(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let config = web::Data::new(config);
    let service = web::Data::new(service);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
