use crate::config::AppConfig;
use crate::models::request::{DestinationImageRequest, ErrorResponse, ImageResponse};
use crate::routes::itinerary_error_response;
use crate::services::image_service::content_type_for;
use crate::services::itinerary_service::ItineraryService;
use actix_web::{web, HttpResponse, Responder};
use log::{error, warn};

/*
    /generate-image
*/
pub async fn generate(
    service: web::Data<ItineraryService>,
    input: web::Json<DestinationImageRequest>,
) -> impl Responder {
    match service.destination_image(input.destination.as_deref()).await {
        Ok(image) => HttpResponse::Ok().json(ImageResponse { image }),
        Err(err) => {
            error!("Error generating destination image: {}", err);
            itinerary_error_response(&err)
        }
    }
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/*
    /images/{file}
*/
pub async fn serve(config: web::Data<AppConfig>, path: web::Path<String>) -> impl Responder {
    let file_name = path.into_inner();

    let content_type = match content_type_for(&file_name) {
        Some(content_type) if is_safe_file_name(&file_name) => content_type,
        _ => return HttpResponse::NotFound().json(ErrorResponse::new("Image not found")),
    };

    match tokio::fs::read(config.images_dir.join(&file_name)).await {
        Ok(bytes) => HttpResponse::Ok().content_type(content_type).body(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("Image not found"))
        }
        Err(e) => {
            warn!("Failed to read image {}: {}", file_name, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to load image"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_safe_file_name() {
        assert!(is_safe_file_name("asturias-itinerary.png"));
        assert!(is_safe_file_name("Asturias.png"));
        assert!(!is_safe_file_name("../secret.png"));
        assert!(!is_safe_file_name(".hidden.png.tmp"));
        assert!(!is_safe_file_name("a/b.png"));
        assert!(!is_safe_file_name(""));
    }
}
