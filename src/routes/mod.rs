use crate::models::request::ErrorResponse;
use crate::services::itinerary_service::ItineraryError;
use crate::services::response_parser::ParseFailure;
use actix_web::{error, web, HttpResponse};
use log::warn;

pub mod destination_image;
pub mod dream_vacation;
pub mod featured_vacation;
pub mod health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/generate-itinerary", web::post().to(dream_vacation::generate))
        .route("/generate-image", web::post().to(destination_image::generate))
        .route("/recent-searches", web::get().to(featured_vacation::get_all))
        .route("/images/{file}", web::get().to(destination_image::serve));
}

/// Malformed or wrong-typed bodies answer `400 { error }` like other input errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid request body")),
        )
        .into()
    })
}

/// Only a short message reaches the caller; details stay in the server log.
pub fn itinerary_error_response(err: &ItineraryError) -> HttpResponse {
    match err {
        ItineraryError::InvalidInput(msg) => HttpResponse::BadRequest().json(ErrorResponse::new(msg)),
        ItineraryError::Provider(_) => HttpResponse::InternalServerError().json(ErrorResponse::new(
            "Failed to generate itinerary. Check server logs for details.",
        )),
        ItineraryError::Parse(ParseFailure::InvalidJson(_) | ParseFailure::NotAnObject) => {
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to parse itinerary from response"))
        }
        ItineraryError::Parse(_) => HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Invalid itinerary structure received")),
    }
}
