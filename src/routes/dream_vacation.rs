use crate::models::request::{DreamRequest, ErrorResponse};
use crate::routes::itinerary_error_response;
use crate::services::itinerary_service::ItineraryService;
use actix_web::{web, HttpResponse, Responder};
use log::error;

/*
    /generate-itinerary
*/
pub async fn generate(
    service: web::Data<ItineraryService>,
    input: web::Json<DreamRequest>,
) -> impl Responder {
    match service.generate(&input).await {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(err) => {
            error!("Error generating itinerary: {}", err);
            itinerary_error_response(&err)
        }
    }
}
