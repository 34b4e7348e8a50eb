use crate::models::travel_idea::curated_travel_ideas;
use actix_web::{HttpResponse, Responder};

/*
    /recent-searches
*/
pub async fn get_all() -> impl Responder {
    HttpResponse::Ok().json(curated_travel_ideas())
}
